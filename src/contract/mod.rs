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

//! Contract call/send primitives. Raw numeric values travel over the
//! gateway as `{"_hex": "0x..."}` wrappers and are decoded to
//! arbitrary-precision integers before any use.
use std::{collections::HashMap, fmt, str::FromStr};

use num_bigint::BigUint;
use tinyjson::JsonValue;

use crate::{error::RpcError, Error, Result};

/// Gateway seam and its JSON-RPC implementation
pub mod caller;

/// Gas-estimated transaction submission
pub mod tx;

/// A contract (or account) address on the host chain. Comparisons and
/// lookups are ASCII-case-insensitive since on-chain addresses may or may
/// not carry mixed-case checksums.
#[derive(Clone, Debug, Eq)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::ParseFailed("Invalid contract address"))
        }

        Ok(Self(format!("0x{hex}")))
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single contract method invocation, read or write.
#[derive(Clone, Debug)]
pub struct ContractCall {
    /// Target contract address
    pub address: Address,
    /// Method name
    pub method: String,
    /// ABI-ready positional arguments
    pub args: Vec<JsonValue>,
}

impl ContractCall {
    pub fn new(address: &Address, method: &str, args: Vec<JsonValue>) -> Self {
        Self { address: address.clone(), method: method.to_string(), args }
    }
}

impl From<&ContractCall> for JsonValue {
    fn from(call: &ContractCall) -> JsonValue {
        JsonValue::Object(HashMap::from([
            ("address".to_string(), JsonValue::String(call.address.to_string())),
            ("method".to_string(), JsonValue::String(call.method.clone())),
            ("args".to_string(), JsonValue::Array(call.args.clone())),
        ]))
    }
}

/// An event emitted by a confirmed transaction, with its decoded
/// arguments mapping.
#[derive(Clone, Debug)]
pub struct TxEvent {
    pub name: String,
    pub args: HashMap<String, JsonValue>,
}

/// A confirmed-transaction receipt. Status 1 means success.
#[derive(Clone, Debug)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub status: u64,
    pub events: Vec<TxEvent>,
}

impl TxReceipt {
    /// Look up the first emitted event with the given name. Returns `None`
    /// when the event was not emitted; absence is a soft null, not an
    /// error, so callers can proceed without the derived data.
    pub fn find_event(&self, name: &str) -> Option<&TxEvent> {
        self.events.iter().find(|ev| ev.name == name)
    }
}

impl TryFrom<&JsonValue> for TxReceipt {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        if !value.is_object() {
            return Err(RpcError::InvalidJson("Receipt is not a JSON object".to_string()).into())
        }
        let map: &HashMap<String, JsonValue> = value.get().unwrap();

        let Some(JsonValue::String(tx_hash)) = map.get("txHash") else {
            return Err(Error::DecodeError("Receipt without \"txHash\" field"))
        };

        let Some(status) = map.get("status") else {
            return Err(Error::DecodeError("Receipt without \"status\" field"))
        };
        let status = decode_u64(status)?;

        let Some(JsonValue::Array(raw_events)) = map.get("events") else {
            return Err(Error::DecodeError("Receipt without \"events\" field"))
        };

        let mut events = Vec::with_capacity(raw_events.len());
        for raw in raw_events {
            let Some(ev) = raw.get::<HashMap<String, JsonValue>>() else {
                return Err(Error::DecodeError("Receipt event is not a JSON object"))
            };

            let Some(JsonValue::String(name)) = ev.get("name") else {
                return Err(Error::DecodeError("Receipt event without \"name\" field"))
            };

            let Some(args) = ev.get("args").and_then(|a| a.get::<HashMap<String, JsonValue>>())
            else {
                return Err(Error::DecodeError("Receipt event without \"args\" field"))
            };

            events.push(TxEvent { name: name.clone(), args: args.clone() });
        }

        Ok(Self { tx_hash: tx_hash.clone(), status, events })
    }
}

/// Decode a raw numeric reply value into a [`BigUint`]. Accepts the
/// gateway's `{"_hex": "0x..."}` wrapper or a plain base-10 string.
pub fn decode_uint(value: &JsonValue) -> Result<BigUint> {
    match value {
        JsonValue::Object(map) => {
            let Some(JsonValue::String(hex)) = map.get("_hex") else {
                return Err(Error::DecodeError("Numeric object without \"_hex\" field"))
            };

            let hex = hex.strip_prefix("0x").unwrap_or(hex);
            if hex.is_empty() {
                return Err(Error::DecodeError("Empty hex payload"))
            }

            BigUint::parse_bytes(hex.as_bytes(), 16)
                .ok_or(Error::DecodeError("Malformed hex payload"))
        }

        JsonValue::String(dec) => Ok(dec.parse::<BigUint>()?),

        _ => Err(Error::DecodeError("Value is not numeric")),
    }
}

/// Decode a raw numeric reply value that must fit in a `u64`.
pub fn decode_u64(value: &JsonValue) -> Result<u64> {
    // Plain JSON numbers appear for small fields like receipt status.
    if let Some(n) = value.get::<f64>() {
        return Ok(*n as u64)
    }

    u64::try_from(decode_uint(value)?).map_err(|_| Error::DecodeError("Numeric value exceeds u64"))
}

/// Decode a raw reply value that must be a string.
pub fn decode_string(value: &JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s.clone()),
        _ => Err(Error::DecodeError("Value is not a string")),
    }
}

/// Encode a [`BigUint`] as the gateway's `{"_hex": "0x..."}` argument form.
pub fn uint_arg(value: &BigUint) -> JsonValue {
    JsonValue::Object(HashMap::from([(
        "_hex".to_string(),
        JsonValue::String(format!("0x{}", value.to_str_radix(16))),
    )]))
}

/// Encode a string-ish argument (addresses, decimal item ids).
pub fn str_arg(value: &str) -> JsonValue {
    JsonValue::String(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_comparison_is_case_insensitive() {
        let lower: Address = "0x88ef27e69108b2633f8e1c184cc37940a075cc02".parse().unwrap();
        let upper: Address = "0x88EF27E69108B2633F8E1C184CC37940A075CC02".parse().unwrap();
        assert_eq!(lower, upper);

        assert!("".parse::<Address>().is_err());
        assert!("0x1234".parse::<Address>().is_err());
        assert!("0xZZef27e69108b2633f8e1c184cc37940a075cc02".parse::<Address>().is_err());
    }

    #[test]
    fn uint_decoding() {
        let wrapped: JsonValue = r#"{"_hex":"0x0de0b6b3a7640000"}"#.parse().unwrap();
        assert_eq!(decode_uint(&wrapped).unwrap(), BigUint::from(10u64.pow(18)));

        let plain = JsonValue::String("12345".to_string());
        assert_eq!(decode_uint(&plain).unwrap(), BigUint::from(12345u32));

        let empty: JsonValue = r#"{"_hex":"0x"}"#.parse().unwrap();
        assert!(decode_uint(&empty).is_err());

        let malformed: JsonValue = r#"{"_hex":"0xzz"}"#.parse().unwrap();
        assert!(decode_uint(&malformed).is_err());

        let wrong_shape: JsonValue = r#"{"hex":"0x01"}"#.parse().unwrap();
        assert!(decode_uint(&wrong_shape).is_err());
    }

    #[test]
    fn receipt_decoding_and_event_lookup() {
        let raw: JsonValue = r#"{
            "txHash": "0xdeadbeef",
            "status": 1,
            "events": [
                {"name": "Transfer", "args": {"value": {"_hex": "0x64"}}},
                {"name": "GegoAdded", "args": {"id": {"_hex": "0x2a"}}}
            ]
        }"#
        .parse()
        .unwrap();

        let receipt = TxReceipt::try_from(&raw).unwrap();
        assert_eq!(receipt.status, 1);
        assert_eq!(receipt.events.len(), 2);

        let ev = receipt.find_event("GegoAdded").unwrap();
        assert_eq!(decode_uint(&ev.args["id"]).unwrap(), BigUint::from(42u32));

        // Absent events are a soft null
        assert!(receipt.find_event("Burned").is_none());

        let missing_status: JsonValue =
            r#"{"txHash": "0x00", "events": []}"#.parse().unwrap();
        assert!(TxReceipt::try_from(&missing_status).is_err());
    }
}
