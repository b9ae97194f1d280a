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

//! Client library for the Gego NFT-mining protocol. Reads contract state
//! and submits transactions through the `gegod` JSON-RPC gateway, and
//! normalizes the results for presentation.

/// Error codes
pub mod error;
pub use error::{Error, Result, TxFailed};

/// JSON-RPC primitives and client
pub mod rpc;

/// Contract call/send primitives and the gateway seam
pub mod contract;

/// Gego item model, grade tables and efficiency rating
pub mod gego;

/// Session state store and per-feature data fetchers
pub mod state;

/// Per-network contract address tables
pub mod net_config;

/// Utility functions
pub mod util;

#[macro_export]
macro_rules! cli_desc {
    () => {{
        let desc = format!(
            "{} {}\n{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_DESCRIPTION"),
        );

        Box::leak(desc.into_boxed_str()) as &'static str
    }};
}
