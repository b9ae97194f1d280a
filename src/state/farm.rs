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

//! Mining farm pool state across the two mine generations.
use num_bigint::BigUint;

use super::{decode_first, GenerationPair};
use crate::{
    contract::{caller::Caller, str_arg, Address, ContractCall},
    net_config::ChainConfig,
    Error, Result,
};

/// Decoded pool figures of one mine generation. All amounts are
/// 18-decimal fixed point.
#[derive(Clone, Debug)]
pub struct PoolInfo {
    pub address: Address,
    pub staked_total: BigUint,
    pub reward_rate: BigUint,
    pub user_staked: BigUint,
    pub user_pending: BigUint,
}

/// Farm slice of the session store.
#[derive(Default)]
pub struct FarmState {
    pub pools: Option<GenerationPair<Option<PoolInfo>>>,
}

impl FarmState {
    pub fn apply(&mut self, pools: GenerationPair<Option<PoolInfo>>) {
        self.pools = Some(pools);
    }
}

/// Fetch both mine generations' pool figures for an owner. The two
/// generations have no ordering dependency and go out concurrently; a
/// generation that is not deployed on this network comes back as `None`.
pub async fn fetch_pools(
    caller: &dyn Caller,
    chain: &ChainConfig,
    owner: &Address,
) -> Result<GenerationPair<Option<PoolInfo>>> {
    let (old, new) = futures::try_join!(
        fetch_generation(caller, chain.legacy_mine(), owner),
        fetch_generation(caller, chain.current_mine(), owner),
    )?;

    Ok(GenerationPair { old, new })
}

async fn fetch_generation(
    caller: &dyn Caller,
    mine: Option<Address>,
    owner: &Address,
) -> Result<Option<PoolInfo>> {
    let Some(mine) = mine else { return Ok(None) };

    let calls = [
        ContractCall::new(&mine, "totalStaked", vec![]),
        ContractCall::new(&mine, "rewardRate", vec![]),
        ContractCall::new(&mine, "stakedOf", vec![str_arg(owner.as_str())]),
        ContractCall::new(&mine, "earned", vec![str_arg(owner.as_str())]),
    ];

    let tuples = caller.multicall(&calls).await?;
    if tuples.len() != calls.len() {
        return Err(Error::DecodeError("Multicall reply length mismatch"))
    }

    Ok(Some(PoolInfo {
        address: mine,
        staked_total: decode_first(&tuples[0])?,
        reward_rate: decode_first(&tuples[1])?,
        user_staked: decode_first(&tuples[2])?,
        user_pending: decode_first(&tuples[3])?,
    }))
}
