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

//! Gego collection state. The protocol runs two live mine generations
//! that track overlapping but distinct staked-id sets; this module
//! fetches both plus the unstaked items and merges them into one
//! normalized view per generation.
use std::collections::{HashMap, HashSet};

use log::debug;
use num_bigint::BigUint;
use tinyjson::JsonValue;

use super::Generation;
use crate::{
    contract::{
        caller::Caller, decode_uint, str_arg, tx::send_with_gas_estimate, uint_arg, Address,
        ContractCall, TxReceipt,
    },
    gego::Gego,
    net_config::ChainConfig,
    Error, Result,
};

/// The per-generation views of one collection's items.
#[derive(Clone, Debug, Default)]
pub struct GenerationViews {
    /// Unstaked items plus items staked in the legacy mine
    pub legacy: Vec<Gego>,
    /// Unstaked items plus items staked in the current mine
    pub current: Vec<Gego>,
}

/// NFT slice of the session store.
#[derive(Default)]
pub struct NftState {
    pub views: Option<GenerationViews>,
}

impl NftState {
    pub fn apply(&mut self, views: GenerationViews) {
        self.views = Some(views);
    }
}

/// Outcome of a mint submission. The item id is extracted from the
/// `GegoAdded` event and is a soft null when the event was not emitted.
#[derive(Clone, Debug)]
pub struct MintOutcome {
    pub receipt: TxReceipt,
    pub gego_id: Option<String>,
}

/// Merge the three fetched id collections and the decoded records into
/// the per-generation views.
///
/// Each view lists unstaked items first, then that generation's staked
/// items, both groups in stable first-seen order. An id present in the
/// unstaked list wins over the staked lists: it is emitted once, tagged
/// unstaked, regardless of input order. Ids without a decoded record are
/// skipped. Merging always produces fresh copies.
pub fn merge_generations(
    unstaked_ids: &[String],
    old_staked_ids: &[String],
    new_staked_ids: &[String],
    records: &HashMap<String, Gego>,
) -> GenerationViews {
    GenerationViews {
        legacy: build_view(unstaked_ids, old_staked_ids, records),
        current: build_view(unstaked_ids, new_staked_ids, records),
    }
}

fn build_view(
    unstaked_ids: &[String],
    staked_ids: &[String],
    records: &HashMap<String, Gego>,
) -> Vec<Gego> {
    let mut out = Vec::with_capacity(unstaked_ids.len() + staked_ids.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for id in unstaked_ids {
        if !seen.insert(id) {
            continue
        }

        let Some(record) = records.get(id) else {
            debug!(target: "state::nft", "No record for listed gego {id}, skipping");
            continue
        };

        let mut gego = record.clone();
        gego.staked = false;
        out.push(gego);
    }

    for id in staked_ids {
        if !seen.insert(id) {
            continue
        }

        let Some(record) = records.get(id) else {
            debug!(target: "state::nft", "No record for staked gego {id}, skipping");
            continue
        };

        let mut gego = record.clone();
        gego.staked = true;
        out.push(gego);
    }

    out
}

/// Fetch one collection's items for an owner and produce the merged
/// per-generation views. The three id lists are independent reads and go
/// out concurrently; the record batch is one multicall round trip. Any
/// rejecting read rejects the whole operation, no partial views.
pub async fn fetch_gegos(
    caller: &dyn Caller,
    chain: &ChainConfig,
    collection: &Address,
    owner: &Address,
) -> Result<GenerationViews> {
    let collections = chain.collections()?;

    let unstaked_call =
        ContractCall::new(collection, "tokensOfOwner", vec![str_arg(owner.as_str())]);
    let old_call = chain.legacy_mine().map(|mine| staked_ids_call(&mine, collection, owner));
    let new_call = chain.current_mine().map(|mine| staked_ids_call(&mine, collection, owner));

    let (unstaked, old_staked, new_staked) = futures::try_join!(
        fetch_id_list(caller, Some(&unstaked_call)),
        fetch_id_list(caller, old_call.as_ref()),
        fetch_id_list(caller, new_call.as_ref()),
    )?;

    // One decode per distinct id, in first-seen order
    let mut ordered: Vec<String> = vec![];
    let mut seen: HashSet<&String> = HashSet::new();
    for id in unstaked.iter().chain(old_staked.iter()).chain(new_staked.iter()) {
        if seen.insert(id) {
            ordered.push(id.clone());
        }
    }

    if ordered.is_empty() {
        return Ok(GenerationViews::default())
    }

    let calls: Vec<ContractCall> = ordered
        .iter()
        .map(|id| ContractCall::new(collection, "getGego", vec![str_arg(id)]))
        .collect();
    let tuples = caller.multicall(&calls).await?;
    if tuples.len() != calls.len() {
        return Err(Error::DecodeError("Multicall reply length mismatch"))
    }

    let mut records = HashMap::with_capacity(ordered.len());
    for (id, tuple) in ordered.iter().zip(tuples.iter()) {
        records.insert(id.clone(), Gego::decode(id, collection, tuple, &collections)?);
    }

    Ok(merge_generations(&unstaked, &old_staked, &new_staked, &records))
}

/// Mint a new gego item backed by the given token amount.
pub async fn mint(
    caller: &dyn Caller,
    chain: &ChainConfig,
    amount: &BigUint,
) -> Result<MintOutcome> {
    let Some(factory) = chain.nft_factory() else { return Err(Error::FeatureUnavailable) };

    let call = ContractCall::new(&factory, "mint", vec![uint_arg(amount)]);
    let receipt = send_with_gas_estimate(caller, &call).await?;

    let gego_id = receipt
        .find_event("GegoAdded")
        .and_then(|ev| ev.args.get("id"))
        .and_then(|raw| decode_uint(raw).ok())
        .map(|id| id.to_str_radix(10));

    Ok(MintOutcome { receipt, gego_id })
}

/// Stake an item into the given mine generation.
pub async fn stake(
    caller: &dyn Caller,
    chain: &ChainConfig,
    generation: Generation,
    collection: &Address,
    id: &str,
) -> Result<TxReceipt> {
    let mine = mine_for(chain, generation)?;
    let call =
        ContractCall::new(&mine, "stakeGego", vec![str_arg(collection.as_str()), str_arg(id)]);
    send_with_gas_estimate(caller, &call).await
}

/// Withdraw an item from the given mine generation.
pub async fn unstake(
    caller: &dyn Caller,
    chain: &ChainConfig,
    generation: Generation,
    collection: &Address,
    id: &str,
) -> Result<TxReceipt> {
    let mine = mine_for(chain, generation)?;
    let call =
        ContractCall::new(&mine, "unstakeGego", vec![str_arg(collection.as_str()), str_arg(id)]);
    send_with_gas_estimate(caller, &call).await
}

fn mine_for(chain: &ChainConfig, generation: Generation) -> Result<Address> {
    let mine = match generation {
        Generation::Legacy => chain.legacy_mine(),
        Generation::Current => chain.current_mine(),
    };

    mine.ok_or(Error::FeatureUnavailable)
}

fn staked_ids_call(mine: &Address, collection: &Address, owner: &Address) -> ContractCall {
    ContractCall::new(
        mine,
        "stakedGegoIdsOf",
        vec![str_arg(collection.as_str()), str_arg(owner.as_str())],
    )
}

async fn fetch_id_list(caller: &dyn Caller, call: Option<&ContractCall>) -> Result<Vec<String>> {
    let Some(call) = call else { return Ok(vec![]) };

    let values = caller.call(call).await?;
    let Some(JsonValue::Array(raw_ids)) = values.first() else {
        return Err(Error::DecodeError("Id list reply is not an array"))
    };

    let mut ids = Vec::with_capacity(raw_ids.len());
    for raw in raw_ids {
        ids.push(decode_uint(raw)?.to_str_radix(10));
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn record(id: &str) -> Gego {
        Gego {
            id: id.to_string(),
            address: "0x13fa31e45a91b59fbf20ed38a9ba1997e4c4092f".parse().unwrap(),
            grade: 1,
            quality: 2500,
            locked_days: 0,
            block_num: BigUint::from(1u32),
            created_time: 1620000000,
            res_base_id: BigUint::from(0u32),
            amount: BigUint::from(10u64.pow(18)),
            efficiency: Decimal::from(115000),
            expiring_time: BigUint::from(0u32),
            staked: false,
        }
    }

    fn records(ids: &[&str]) -> HashMap<String, Gego> {
        ids.iter().map(|id| (id.to_string(), record(id))).collect()
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn generation_merge() {
        let views = merge_generations(
            &ids(&["1", "2"]),
            &ids(&["3"]),
            &ids(&["2", "4"]),
            &records(&["1", "2", "3", "4"]),
        );

        let legacy: Vec<(&str, bool)> =
            views.legacy.iter().map(|g| (g.id.as_str(), g.staked)).collect();
        assert_eq!(legacy, vec![("1", false), ("2", false), ("3", true)]);

        // Id 2 appears in both the unstaked and the new-staked list; the
        // unstaked list wins and tags it unstaked exactly once.
        let current: Vec<(&str, bool)> =
            views.current.iter().map(|g| (g.id.as_str(), g.staked)).collect();
        assert_eq!(current, vec![("1", false), ("2", false), ("4", true)]);
    }

    #[test]
    fn merge_skips_ids_without_records() {
        let views =
            merge_generations(&ids(&["1", "9"]), &ids(&[]), &ids(&["7"]), &records(&["1"]));

        assert_eq!(views.legacy.len(), 1);
        assert_eq!(views.legacy[0].id, "1");
        assert_eq!(views.current.len(), 1);
    }

    #[test]
    fn merge_deduplicates_staked_ids() {
        let views = merge_generations(
            &ids(&[]),
            &ids(&["5", "5"]),
            &ids(&[]),
            &records(&["5"]),
        );

        assert_eq!(views.legacy.len(), 1);
        assert!(views.legacy[0].staked);
        assert!(views.current.is_empty());
    }
}
