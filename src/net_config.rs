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

//! Per-network contract address tables. An empty string means the feature
//! is not deployed on that network and surfaces as `None`.
use crate::{contract::Address, gego::Collections, Error, Result};

pub type ChainId = u64;

pub const MAINNET_CHAIN_ID: ChainId = 56;
pub const TESTNET_CHAIN_ID: ChainId = 97;

/// Contract addresses of one network deployment.
#[derive(Clone, Copy, Debug)]
pub struct ChainConfig {
    pub chain_id: ChainId,
    gego_token: &'static str,
    gego_signature_token: &'static str,
    nft_factory: &'static str,
    legacy_mine: &'static str,
    current_mine: &'static str,
    legacy_vault: &'static str,
    current_vault: &'static str,
    sale: &'static str,
    burn_ledger: &'static str,
    governance: &'static str,
}

const MAINNET: ChainConfig = ChainConfig {
    chain_id: MAINNET_CHAIN_ID,
    gego_token: "0x13fa31e45a91b59fbf20ed38a9ba1997e4c4092f",
    gego_signature_token: "0x2b50453e0e50ccdbb2bcbe73d33ba7f388a141e7",
    nft_factory: "0x5c1d07eb875f5bd2d0e6b0f565b28f3b2ccf9c91",
    legacy_mine: "0x7dce26dfa38a4b0553da752e8fb95cec1e3897f4",
    current_mine: "0x9a31f5e0a8f7c60c1d3b9f4b6b64edc0a2f0e4da",
    legacy_vault: "0x3e84a1dbd78cd58f85ab9d3e8b01927de3ad8c29",
    current_vault: "0x6f02b6dda9f194c8e06bbd1a9c61f9c5eae34b7d",
    sale: "0x84d0f7a1b2933fcb14e2a59c256ed5be45a52c3e",
    burn_ledger: "0xa7b8f0cd3a54b9c15a2de8b7e1df06f3e9ab42c5",
    governance: "0xc95a310fe8a62dd8b01cb9742a30b7df4c8ee2b6",
};

const TESTNET: ChainConfig = ChainConfig {
    chain_id: TESTNET_CHAIN_ID,
    gego_token: "0xf2e4209afa4bbbe160e8b3756a3e4f0cfc87d1aa",
    gego_signature_token: "0xd24b1aa8fc99c6a01f1d5f4e0f9ad9b7e8c3250b",
    nft_factory: "0x1bf97da28c0e9a35e1e9f29c5a7830d5b5ee84f0",
    legacy_mine: "",
    current_mine: "0x40e43a9d1f7e6b0d91da66b6ab27efc6ae80c2e9",
    legacy_vault: "",
    current_vault: "0x52c7b3ea0dd4eb84d3e5c4fdc1e27b9b3f95a0d8",
    sale: "0x68fa0e29d8e14cbf23d8a17e4d9cf0adbc4321e7",
    burn_ledger: "",
    governance: "0x7ce80b2a91cf34dfa6e35c47dd2a8e1b0f964d30",
};

/// Look up the deployment table of a chain.
pub fn chain_config(chain_id: ChainId) -> Result<&'static ChainConfig> {
    match chain_id {
        MAINNET_CHAIN_ID => Ok(&MAINNET),
        TESTNET_CHAIN_ID => Ok(&TESTNET),
        id => Err(Error::UnknownChainId(id)),
    }
}

impl ChainConfig {
    pub fn gego_token(&self) -> Option<Address> {
        parse_entry(self.gego_token)
    }

    pub fn gego_signature_token(&self) -> Option<Address> {
        parse_entry(self.gego_signature_token)
    }

    pub fn nft_factory(&self) -> Option<Address> {
        parse_entry(self.nft_factory)
    }

    pub fn legacy_mine(&self) -> Option<Address> {
        parse_entry(self.legacy_mine)
    }

    pub fn current_mine(&self) -> Option<Address> {
        parse_entry(self.current_mine)
    }

    pub fn legacy_vault(&self) -> Option<Address> {
        parse_entry(self.legacy_vault)
    }

    pub fn current_vault(&self) -> Option<Address> {
        parse_entry(self.current_vault)
    }

    pub fn sale(&self) -> Option<Address> {
        parse_entry(self.sale)
    }

    pub fn burn_ledger(&self) -> Option<Address> {
        parse_entry(self.burn_ledger)
    }

    pub fn governance(&self) -> Option<Address> {
        parse_entry(self.governance)
    }

    /// Collection families of this network. The standard collection is
    /// part of every deployment.
    pub fn collections(&self) -> Result<Collections> {
        let Some(standard) = self.gego_token() else { return Err(Error::FeatureUnavailable) };
        Ok(Collections { standard, signature: self.gego_signature_token() })
    }
}

fn parse_entry(raw: &'static str) -> Option<Address> {
    if raw.is_empty() {
        return None
    }

    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chains_resolve() {
        assert_eq!(chain_config(56).unwrap().chain_id, 56);
        assert_eq!(chain_config(97).unwrap().chain_id, 97);
        assert!(matches!(chain_config(1), Err(Error::UnknownChainId(1))));
    }

    #[test]
    fn empty_entries_mean_unavailable() {
        let testnet = chain_config(TESTNET_CHAIN_ID).unwrap();
        assert!(testnet.legacy_mine().is_none());
        assert!(testnet.burn_ledger().is_none());
        assert!(testnet.current_mine().is_some());

        let mainnet = chain_config(MAINNET_CHAIN_ID).unwrap();
        assert!(mainnet.legacy_mine().is_some());

        let collections = mainnet.collections().unwrap();
        assert!(collections.signature.is_some());
    }
}
