/* This file is part of Gegofi (https://gego.fi)
 *
 * Copyright (C) 2021-2026 Gegofi foundation
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

//! Client flows driven end to end through an in-memory gateway: the
//! dual-generation fetch/merge, the farm pool pair, and the gas-estimated
//! transaction path with its tagged failure taxonomy.
use std::collections::HashMap;

use async_trait::async_trait;
use num_bigint::BigUint;
use tinyjson::JsonValue;

use gegofi::{
    contract::{caller::Caller, uint_arg, ContractCall, TxEvent, TxReceipt},
    error::RpcError,
    net_config::{chain_config, ChainConfig, MAINNET_CHAIN_ID, TESTNET_CHAIN_ID},
    state::{farm, nft},
    Error, Result, TxFailed,
};

fn wad(units: u64) -> BigUint {
    BigUint::from(units) * BigUint::from(10u64.pow(18))
}

fn hex(value: u64) -> JsonValue {
    uint_arg(&BigUint::from(value))
}

fn id_list(ids: &[u64]) -> JsonValue {
    JsonValue::Array(ids.iter().map(|id| hex(*id)).collect())
}

/// In-memory gateway double. Serves two owned items (1, 2), one item
/// staked in the legacy mine (3) and two in the current mine (2, 4).
struct MockCaller {
    chain: &'static ChainConfig,
    fail_multicall: bool,
    revert_sends: bool,
    bad_status: bool,
    omit_events: bool,
}

impl MockCaller {
    fn new(chain: &'static ChainConfig) -> Self {
        Self {
            chain,
            fail_multicall: false,
            revert_sends: false,
            bad_status: false,
            omit_events: false,
        }
    }

    fn tuple_for(&self, call: &ContractCall) -> Result<Vec<JsonValue>> {
        match call.method.as_str() {
            // grade, quality, amount, resBaseId, createdTime, blockNum,
            // lockedDays, expiringTime
            "getGego" => Ok(vec![
                hex(1),
                hex(2500),
                uint_arg(&wad(1)),
                hex(0),
                hex(1620000000),
                hex(9000000),
                hex(0),
                hex(0),
            ]),

            "totalStaked" | "totalDeposits" => Ok(vec![uint_arg(&wad(1000))]),
            "rewardRate" => Ok(vec![uint_arg(&wad(3))]),
            "stakedOf" | "sharesOf" => Ok(vec![uint_arg(&wad(25))]),
            "earned" | "pendingRewardOf" => Ok(vec![uint_arg(&wad(2))]),

            _ => Err(Error::DecodeError("Unexpected mock method")),
        }
    }
}

#[async_trait]
impl Caller for MockCaller {
    async fn call(&self, call: &ContractCall) -> Result<Vec<JsonValue>> {
        match call.method.as_str() {
            "tokensOfOwner" => Ok(vec![id_list(&[1, 2])]),

            "stakedGegoIdsOf" => {
                if Some(&call.address) == self.chain.legacy_mine().as_ref() {
                    return Ok(vec![id_list(&[3])])
                }
                if Some(&call.address) == self.chain.current_mine().as_ref() {
                    return Ok(vec![id_list(&[2, 4])])
                }
                Err(Error::DecodeError("Unexpected mock mine address"))
            }

            _ => Err(Error::DecodeError("Unexpected mock method")),
        }
    }

    async fn multicall(&self, calls: &[ContractCall]) -> Result<Vec<Vec<JsonValue>>> {
        if self.fail_multicall {
            return Err(Error::NetworkOperationFailed)
        }

        calls.iter().map(|call| self.tuple_for(call)).collect()
    }

    async fn gas_price(&self) -> Result<BigUint> {
        Ok(BigUint::from(5_000_000_000u64))
    }

    async fn send(&self, _call: &ContractCall, _gas_price: &BigUint) -> Result<String> {
        if self.revert_sends {
            return Err(RpcError::Server(-32000, "GEGO: amount too small".to_string()).into())
        }

        Ok("0x6265656663616665".to_string())
    }

    async fn confirm(&self, tx_hash: &str) -> Result<TxReceipt> {
        let events = if self.omit_events {
            vec![]
        } else {
            vec![TxEvent {
                name: "GegoAdded".to_string(),
                args: HashMap::from([("id".to_string(), hex(42))]),
            }]
        };

        Ok(TxReceipt {
            tx_hash: tx_hash.to_string(),
            status: if self.bad_status { 0 } else { 1 },
            events,
        })
    }
}

#[test]
fn generation_views_merge_through_the_full_fetch() {
    smol::block_on(async {
        let chain = chain_config(MAINNET_CHAIN_ID).unwrap();
        let caller = MockCaller::new(chain);
        let collection = chain.gego_token().unwrap();
        let owner = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1".parse().unwrap();

        let views = nft::fetch_gegos(&caller, chain, &collection, &owner).await.unwrap();

        let legacy: Vec<(&str, bool)> =
            views.legacy.iter().map(|g| (g.id.as_str(), g.staked)).collect();
        assert_eq!(legacy, vec![("1", false), ("2", false), ("3", true)]);

        // Id 2 is both owned and staked-in-current; the unstaked list wins
        let current: Vec<(&str, bool)> =
            views.current.iter().map(|g| (g.id.as_str(), g.staked)).collect();
        assert_eq!(current, vec![("1", false), ("2", false), ("4", true)]);

        // Efficiency was computed during the decode:
        // (2500 - 0) * 10000 / 5000 + 110000
        assert_eq!(views.legacy[0].efficiency, 115000.into());
        assert_eq!(views.legacy[0].amount, wad(1));
    });
}

#[test]
fn rejecting_batch_decode_rejects_the_whole_merge() {
    smol::block_on(async {
        let chain = chain_config(MAINNET_CHAIN_ID).unwrap();
        let mut caller = MockCaller::new(chain);
        caller.fail_multicall = true;

        let collection = chain.gego_token().unwrap();
        let owner = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1".parse().unwrap();

        let result = nft::fetch_gegos(&caller, chain, &collection, &owner).await;
        assert!(matches!(result, Err(Error::NetworkOperationFailed)));
    });
}

#[test]
fn absent_generation_contracts_yield_empty_staked_sets() {
    smol::block_on(async {
        // The testnet deployment has no legacy mine
        let chain = chain_config(TESTNET_CHAIN_ID).unwrap();
        let caller = MockCaller::new(chain);
        let collection = chain.gego_token().unwrap();
        let owner = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1".parse().unwrap();

        let views = nft::fetch_gegos(&caller, chain, &collection, &owner).await.unwrap();
        assert!(views.legacy.iter().all(|g| !g.staked));

        let pools = farm::fetch_pools(&caller, chain, &owner).await.unwrap();
        assert!(pools.old.is_none());
        let new = pools.new.unwrap();
        assert_eq!(new.staked_total, wad(1000));
        assert_eq!(new.user_pending, wad(2));
    });
}

#[test]
fn mint_extracts_the_new_item_id_from_the_event() {
    smol::block_on(async {
        let chain = chain_config(MAINNET_CHAIN_ID).unwrap();
        let caller = MockCaller::new(chain);

        let outcome = nft::mint(&caller, chain, &wad(10)).await.unwrap();
        assert_eq!(outcome.receipt.status, 1);
        assert_eq!(outcome.gego_id.as_deref(), Some("42"));
    });
}

#[test]
fn absent_mint_event_is_a_soft_null() {
    smol::block_on(async {
        let chain = chain_config(MAINNET_CHAIN_ID).unwrap();
        let mut caller = MockCaller::new(chain);
        caller.omit_events = true;

        let outcome = nft::mint(&caller, chain, &wad(10)).await.unwrap();
        assert!(outcome.gego_id.is_none());
    });
}

#[test]
fn reverted_send_surfaces_the_contract_message() {
    smol::block_on(async {
        let chain = chain_config(MAINNET_CHAIN_ID).unwrap();
        let mut caller = MockCaller::new(chain);
        caller.revert_sends = true;

        match nft::mint(&caller, chain, &wad(10)).await {
            Err(Error::TxFailed(TxFailed::Reverted { message })) => {
                assert_eq!(message.as_deref(), Some("GEGO: amount too small"))
            }
            other => panic!("expected revert, got {other:?}"),
        }
    });
}

#[test]
fn failure_status_receipt_is_a_transaction_failure() {
    smol::block_on(async {
        let chain = chain_config(MAINNET_CHAIN_ID).unwrap();
        let mut caller = MockCaller::new(chain);
        caller.bad_status = true;

        let result = nft::mint(&caller, chain, &wad(10)).await;
        assert!(matches!(result, Err(Error::TxFailed(TxFailed::BadStatus(0)))));
    });
}
