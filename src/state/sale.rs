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

//! Token sale round state and participation.
use num_bigint::BigUint;

use super::decode_first;
use crate::{
    contract::{
        caller::Caller, str_arg, tx::send_with_gas_estimate, uint_arg, Address, ContractCall,
        TxReceipt,
    },
    net_config::ChainConfig,
    Error, Result,
};

/// Decoded figures of the active sale round.
#[derive(Clone, Debug)]
pub struct SaleInfo {
    /// Price per sold unit, 18-decimal fixed point
    pub price: BigUint,
    /// Round cap
    pub cap: BigUint,
    /// Amount sold so far
    pub sold: BigUint,
    /// Amount already purchased by the querying owner
    pub purchased: BigUint,
}

/// Sale slice of the session store.
#[derive(Default)]
pub struct SaleState {
    pub info: Option<SaleInfo>,
}

impl SaleState {
    pub fn apply(&mut self, info: SaleInfo) {
        self.info = Some(info);
    }
}

/// Fetch the active sale round figures for an owner, one multicall
/// round trip.
pub async fn fetch_sale(
    caller: &dyn Caller,
    chain: &ChainConfig,
    owner: &Address,
) -> Result<SaleInfo> {
    let Some(sale) = chain.sale() else { return Err(Error::FeatureUnavailable) };

    let calls = [
        ContractCall::new(&sale, "salePrice", vec![]),
        ContractCall::new(&sale, "saleCap", vec![]),
        ContractCall::new(&sale, "totalSold", vec![]),
        ContractCall::new(&sale, "purchasedOf", vec![str_arg(owner.as_str())]),
    ];

    let tuples = caller.multicall(&calls).await?;
    if tuples.len() != calls.len() {
        return Err(Error::DecodeError("Multicall reply length mismatch"))
    }

    Ok(SaleInfo {
        price: decode_first(&tuples[0])?,
        cap: decode_first(&tuples[1])?,
        sold: decode_first(&tuples[2])?,
        purchased: decode_first(&tuples[3])?,
    })
}

/// Buy into the active sale round.
pub async fn buy(caller: &dyn Caller, chain: &ChainConfig, amount: &BigUint) -> Result<TxReceipt> {
    let Some(sale) = chain.sale() else { return Err(Error::FeatureUnavailable) };

    let call = ContractCall::new(&sale, "buy", vec![uint_arg(amount)]);
    send_with_gas_estimate(caller, &call).await
}
