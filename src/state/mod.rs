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

//! The in-memory session store and the per-feature data fetchers that
//! fill it. Slices are replaced wholesale from fresh fetch results; a
//! failed fetch leaves the previous contents untouched.
use num_bigint::BigUint;
use tinyjson::JsonValue;

use crate::{contract::decode_uint, util::id_set::IdSet, Error, Result};

/// Burn history and governance proposal fetchers
pub mod analytics;

/// Mining farm pool fetchers
pub mod farm;

/// Gego collection fetchers and the generation merge
pub mod nft;

/// Token sale fetchers and purchase
pub mod sale;

/// Vault pool fetchers
pub mod vault;

/// Result shape of anything fetched across the two live contract
/// generations.
#[derive(Clone, Debug)]
pub struct GenerationPair<T> {
    pub old: T,
    pub new: T,
}

/// Which contract generation a write operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    Legacy,
    Current,
}

/// The session state store, constructed once at application start and
/// passed by reference to whatever presents it. No ambient singletons.
#[derive(Default)]
pub struct Store {
    pub nft: nft::NftState,
    pub farm: farm::FarmState,
    pub vault: vault::VaultState,
    pub sale: sale::SaleState,
    pub analytics: analytics::AnalyticsState,
    /// Multi-select state over item ids
    pub selection: IdSet,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Decode the first (and only) value of a reply tuple as an integer.
pub(crate) fn decode_first(tuple: &[JsonValue]) -> Result<BigUint> {
    let Some(value) = tuple.first() else { return Err(Error::DecodeError("Empty reply tuple")) };
    decode_uint(value)
}
