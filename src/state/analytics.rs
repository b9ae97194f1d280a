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

//! Read-only on-chain analytics: burn history and governance proposals.
use std::fmt;

use num_bigint::BigUint;
use tinyjson::JsonValue;

use crate::{
    contract::{caller::Caller, decode_string, decode_u64, decode_uint, ContractCall},
    net_config::ChainConfig,
    Error, Result,
};

/// One entry of the token burn ledger.
#[derive(Clone, Debug)]
pub struct BurnRecord {
    pub id: String,
    pub amount: BigUint,
    /// Unix seconds
    pub timestamp: u64,
}

/// A governance proposal in its aggregate form.
#[derive(Clone, Debug)]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub state: ProposalState,
    pub votes_for: BigUint,
    pub votes_against: BigUint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProposalState {
    Pending,
    Active,
    Passed,
    Rejected,
    Executed,
}

impl ProposalState {
    fn decode(value: &JsonValue) -> Result<Self> {
        match decode_u64(value)? {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Active),
            2 => Ok(Self::Passed),
            3 => Ok(Self::Rejected),
            4 => Ok(Self::Executed),
            _ => Err(Error::DecodeError("Unknown proposal state")),
        }
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
            Self::Executed => "executed",
        };
        write!(f, "{s}")
    }
}

/// Analytics slice of the session store.
#[derive(Default)]
pub struct AnalyticsState {
    pub burns: Option<Vec<BurnRecord>>,
    pub proposals: Option<Vec<Proposal>>,
}

impl AnalyticsState {
    pub fn apply_burns(&mut self, burns: Vec<BurnRecord>) {
        self.burns = Some(burns);
    }

    pub fn apply_proposals(&mut self, proposals: Vec<Proposal>) {
        self.proposals = Some(proposals);
    }
}

/// Fetch the full burn history from the burn ledger.
pub async fn fetch_burn_history(
    caller: &dyn Caller,
    chain: &ChainConfig,
) -> Result<Vec<BurnRecord>> {
    let Some(ledger) = chain.burn_ledger() else { return Err(Error::FeatureUnavailable) };

    let call = ContractCall::new(&ledger, "burnHistory", vec![]);
    let values = caller.call(&call).await?;
    let Some(JsonValue::Array(raw_records)) = values.first() else {
        return Err(Error::DecodeError("Burn history reply is not an array"))
    };

    let mut records = Vec::with_capacity(raw_records.len());
    for raw in raw_records {
        let JsonValue::Array(tuple) = raw else {
            return Err(Error::DecodeError("Burn record is not an array"))
        };
        if tuple.len() != 3 {
            return Err(Error::DecodeError("Burn record tuple length mismatch"))
        }

        records.push(BurnRecord {
            id: decode_uint(&tuple[0])?.to_str_radix(10),
            amount: decode_uint(&tuple[1])?,
            timestamp: decode_u64(&tuple[2])?,
        });
    }

    Ok(records)
}

/// Fetch all governance proposals in their aggregate form.
pub async fn fetch_proposals(caller: &dyn Caller, chain: &ChainConfig) -> Result<Vec<Proposal>> {
    let Some(governance) = chain.governance() else { return Err(Error::FeatureUnavailable) };

    let call = ContractCall::new(&governance, "proposals", vec![]);
    let values = caller.call(&call).await?;
    let Some(JsonValue::Array(raw_proposals)) = values.first() else {
        return Err(Error::DecodeError("Proposals reply is not an array"))
    };

    let mut proposals = Vec::with_capacity(raw_proposals.len());
    for raw in raw_proposals {
        let JsonValue::Array(tuple) = raw else {
            return Err(Error::DecodeError("Proposal is not an array"))
        };
        if tuple.len() != 5 {
            return Err(Error::DecodeError("Proposal tuple length mismatch"))
        }

        proposals.push(Proposal {
            id: decode_uint(&tuple[0])?.to_str_radix(10),
            title: decode_string(&tuple[1])?,
            state: ProposalState::decode(&tuple[2])?,
            votes_for: decode_uint(&tuple[3])?,
            votes_against: decode_uint(&tuple[4])?,
        });
    }

    Ok(proposals)
}
