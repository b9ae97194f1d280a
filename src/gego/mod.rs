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

//! The Gego item model: an individual minted NFT game item whose grade
//! and quality determine its reward-weighting.
use num_bigint::BigUint;
use rust_decimal::Decimal;
use tinyjson::JsonValue;

use crate::{
    contract::{decode_u64, decode_uint, Address},
    Error, Result,
};

/// Grade tables
pub mod grade;
use grade::GradeConfig;

/// Mining-efficiency schedule
pub mod rate;
use rate::Family;

/// Number of raw values in a `getGego` reply tuple:
/// grade, quality, amount, resBaseId, createdTime, blockNum, lockedDays,
/// expiringTime.
const GEGO_TUPLE_LEN: usize = 8;

/// An owned Gego item, decoded from a contract read or a mint-event
/// payload. Instances live only in the in-memory session store and are
/// replaced wholesale on every re-fetch.
#[derive(Clone, Debug)]
pub struct Gego {
    /// Item id as a decimal string
    pub id: String,
    /// Collection the item was decoded from
    pub address: Address,
    pub grade: u32,
    pub quality: u32,
    pub locked_days: u32,
    pub block_num: BigUint,
    /// Mint time, unix seconds
    pub created_time: u64,
    pub res_base_id: BigUint,
    /// Staked principal, 18-decimal fixed point
    pub amount: BigUint,
    /// Reward-weighting value, efficiency scaled by 100000
    pub efficiency: Decimal,
    pub expiring_time: BigUint,
    /// Tagged by the generation merge, never by the decode itself
    pub staked: bool,
}

impl Gego {
    /// Decode an item from the positional `getGego` reply tuple of the
    /// given collection.
    pub fn decode(
        id: &str,
        collection: &Address,
        raw: &[JsonValue],
        collections: &Collections,
    ) -> Result<Self> {
        if raw.len() != GEGO_TUPLE_LEN {
            return Err(Error::DecodeError("Gego reply tuple length mismatch"))
        }

        let grade = decode_u32(&raw[0])?;
        let quality = decode_u32(&raw[1])?;
        let amount = decode_uint(&raw[2])?;
        let res_base_id = decode_uint(&raw[3])?;
        let created_time = decode_u64(&raw[4])?;
        let block_num = decode_uint(&raw[5])?;
        let locked_days = decode_u32(&raw[6])?;
        let expiring_time = decode_uint(&raw[7])?;

        let efficiency = collections.fix_rate(grade, quality, Some(collection));

        Ok(Self {
            id: id.to_string(),
            address: collection.clone(),
            grade,
            quality,
            locked_days,
            block_num,
            created_time,
            res_base_id,
            amount,
            efficiency,
            expiring_time,
            staked: false,
        })
    }

    /// Grade table row this item falls into, for display.
    pub fn grade_config(&self, collections: &Collections) -> &'static GradeConfig {
        grade::grade_for_quality(collections.grades_for(Some(&self.address)), self.quality)
    }
}

/// The two live collection families of the current network, so schedule
/// and table selection needs no ambient globals.
#[derive(Clone, Debug)]
pub struct Collections {
    /// Standard collection token address
    pub standard: Address,
    /// Signature collection token address, when deployed on this network
    pub signature: Option<Address>,
}

impl Collections {
    /// Family of a collection address. Anything that is not the signature
    /// token, including an absent address, rates on the standard family.
    pub fn family_of(&self, address: Option<&Address>) -> Family {
        match (address, &self.signature) {
            (Some(addr), Some(signature)) if addr == signature => Family::Signature,
            _ => Family::Standard,
        }
    }

    /// Ordered grade table for a collection address.
    pub fn grades_for(&self, address: Option<&Address>) -> &'static [GradeConfig] {
        match self.family_of(address) {
            Family::Standard => &grade::STANDARD_GRADES,
            Family::Signature => &grade::SIGNATURE_GRADES,
        }
    }

    /// Rate `(grade, quality)` on the schedule of a collection address.
    pub fn fix_rate(&self, grade: u32, quality: u32, address: Option<&Address>) -> Decimal {
        rate::fix_rate(self.family_of(address), grade, quality)
    }
}

fn decode_u32(value: &JsonValue) -> Result<u32> {
    u32::try_from(decode_u64(value)?).map_err(|_| Error::DecodeError("Numeric value exceeds u32"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collections() -> Collections {
        Collections {
            standard: "0x13fa31e45a91b59fbf20ed38a9ba1997e4c4092f".parse().unwrap(),
            signature: Some("0x2b50453e0e50ccdbb2bcbe73d33ba7f388a141e7".parse().unwrap()),
        }
    }

    #[test]
    fn family_selection_is_case_insensitive() {
        let c = collections();
        let upper: Address = "0x2B50453E0E50CCDBB2BCBE73D33BA7F388A141E7".parse().unwrap();

        assert_eq!(c.family_of(None), Family::Standard);
        assert_eq!(c.family_of(Some(&c.standard)), Family::Standard);
        assert_eq!(c.family_of(Some(&upper)), Family::Signature);

        assert_eq!(c.grades_for(None).len(), 6);
        assert_eq!(c.grades_for(Some(&upper)).len(), 5);
    }

    #[test]
    fn schedule_selection_through_collections() {
        let c = collections();
        let signature = c.signature.clone().unwrap();

        assert_eq!(c.fix_rate(1, 0, None), Decimal::from(110000));
        assert_eq!(c.fix_rate(1, 0, Some(&signature)), Decimal::from(200000));
        assert_eq!(c.fix_rate(5, 10000, Some(&signature)), Decimal::from(400000));
    }

    #[test]
    fn gego_tuple_decode() {
        let c = collections();
        let raw: JsonValue = r#"[
            {"_hex": "0x03"},
            {"_hex": "0x2134"},
            {"_hex": "0x0de0b6b3a7640000"},
            {"_hex": "0x01"},
            {"_hex": "0x60e316ac"},
            {"_hex": "0x89aa5f"},
            {"_hex": "0x1e"},
            {"_hex": "0x00"}
        ]"#
        .parse()
        .unwrap();
        let JsonValue::Array(raw) = raw else { unreachable!() };

        let gego = Gego::decode("421", &c.standard, &raw, &c).unwrap();
        assert_eq!(gego.id, "421");
        assert_eq!(gego.grade, 3);
        assert_eq!(gego.quality, 8500);
        assert_eq!(gego.locked_days, 30);
        assert_eq!(gego.amount, BigUint::from(10u64.pow(18)));
        assert!(!gego.staked);
        // (8500 - 8000) * 10000 / 1000 + 130000
        assert_eq!(gego.efficiency, Decimal::from(135000));
        assert_eq!(gego.grade_config(&c).level, 3);

        let short = vec![JsonValue::Number(1.0)];
        assert!(Gego::decode("1", &c.standard, &short, &c).is_err());
    }
}
