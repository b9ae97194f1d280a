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

//! Vault pool state across the two vault generations.
use num_bigint::BigUint;

use super::{decode_first, GenerationPair};
use crate::{
    contract::{caller::Caller, str_arg, Address, ContractCall},
    net_config::ChainConfig,
    Error, Result,
};

/// Decoded figures of one vault generation.
#[derive(Clone, Debug)]
pub struct VaultInfo {
    pub address: Address,
    pub total_deposits: BigUint,
    pub user_shares: BigUint,
    pub user_pending: BigUint,
}

/// Vault slice of the session store.
#[derive(Default)]
pub struct VaultState {
    pub vaults: Option<GenerationPair<Option<VaultInfo>>>,
}

impl VaultState {
    pub fn apply(&mut self, vaults: GenerationPair<Option<VaultInfo>>) {
        self.vaults = Some(vaults);
    }
}

/// Fetch both vault generations' figures for an owner, concurrently.
pub async fn fetch_vaults(
    caller: &dyn Caller,
    chain: &ChainConfig,
    owner: &Address,
) -> Result<GenerationPair<Option<VaultInfo>>> {
    let (old, new) = futures::try_join!(
        fetch_generation(caller, chain.legacy_vault(), owner),
        fetch_generation(caller, chain.current_vault(), owner),
    )?;

    Ok(GenerationPair { old, new })
}

async fn fetch_generation(
    caller: &dyn Caller,
    vault: Option<Address>,
    owner: &Address,
) -> Result<Option<VaultInfo>> {
    let Some(vault) = vault else { return Ok(None) };

    let calls = [
        ContractCall::new(&vault, "totalDeposits", vec![]),
        ContractCall::new(&vault, "sharesOf", vec![str_arg(owner.as_str())]),
        ContractCall::new(&vault, "pendingRewardOf", vec![str_arg(owner.as_str())]),
    ];

    let tuples = caller.multicall(&calls).await?;
    if tuples.len() != calls.len() {
        return Err(Error::DecodeError("Multicall reply length mismatch"))
    }

    Ok(Some(VaultInfo {
        address: vault,
        total_deposits: decode_first(&tuples[0])?,
        user_shares: decode_first(&tuples[1])?,
        user_pending: decode_first(&tuples[2])?,
    }))
}
