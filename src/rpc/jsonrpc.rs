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

//! JSON-RPC 2.0 object definitions
use std::collections::HashMap;

use rand::{rngs::OsRng, Rng};
use tinyjson::JsonValue;

use crate::{error::RpcError, Result};

/// Wrapping enum around the available JSON-RPC object types
#[derive(Clone, Debug)]
pub enum JsonResult {
    Response(JsonResponse),
    Error(JsonError),
    Notification(JsonNotification),
}

impl JsonResult {
    pub fn try_from_value(value: &JsonValue) -> Result<Self> {
        if let Ok(response) = JsonResponse::try_from(value) {
            return Ok(Self::Response(response))
        }

        if let Ok(error) = JsonError::try_from(value) {
            return Ok(Self::Error(error))
        }

        if let Ok(notification) = JsonNotification::try_from(value) {
            return Ok(Self::Notification(notification))
        }

        Err(RpcError::InvalidJson("Invalid JSON-RPC result".to_string()).into())
    }
}

/// A JSON-RPC request object
#[derive(Clone, Debug)]
pub struct JsonRequest {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Request ID
    pub id: u16,
    /// Request method
    pub method: String,
    /// Request parameters
    pub params: JsonValue,
}

impl JsonRequest {
    /// Create a new [`JsonRequest`] object with the given method and parameters.
    /// The request ID is chosen randomly.
    pub fn new(method: &str, params: JsonValue) -> Self {
        assert!(params.is_object() || params.is_array());
        Self { jsonrpc: "2.0", id: OsRng.gen(), method: method.to_string(), params }
    }

    /// Convert the object into a JSON string
    pub fn stringify(&self) -> Result<String> {
        let v: JsonValue = self.into();
        Ok(v.stringify()?)
    }
}

impl From<&JsonRequest> for JsonValue {
    fn from(req: &JsonRequest) -> JsonValue {
        JsonValue::Object(HashMap::from([
            ("jsonrpc".to_string(), JsonValue::String(req.jsonrpc.to_string())),
            ("id".to_string(), JsonValue::Number(req.id.into())),
            ("method".to_string(), JsonValue::String(req.method.clone())),
            ("params".to_string(), req.params.clone()),
        ]))
    }
}

/// A JSON-RPC response object
#[derive(Clone, Debug)]
pub struct JsonResponse {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Response ID, matching the request ID
    pub id: u16,
    /// Response result payload
    pub result: JsonValue,
}

impl TryFrom<&JsonValue> for JsonResponse {
    type Error = RpcError;

    fn try_from(value: &JsonValue) -> std::result::Result<Self, RpcError> {
        let map = as_rpc_object(value, "Response")?;

        if !map.contains_key("id") || !map["id"].is_number() {
            return Err(RpcError::InvalidJson(
                "Response does not contain valid \"id\" field".to_string(),
            ))
        }

        if !map.contains_key("result") {
            return Err(RpcError::InvalidJson(
                "Response does not contain \"result\" field".to_string(),
            ))
        }

        Ok(Self {
            jsonrpc: "2.0",
            id: *map["id"].get::<f64>().unwrap() as u16,
            result: map["result"].clone(),
        })
    }
}

/// A JSON-RPC error reply object
#[derive(Clone, Debug)]
pub struct JsonError {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Reply ID
    pub id: u16,
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl TryFrom<&JsonValue> for JsonError {
    type Error = RpcError;

    fn try_from(value: &JsonValue) -> std::result::Result<Self, RpcError> {
        let map = as_rpc_object(value, "Error")?;

        if !map.contains_key("id") || !map["id"].is_number() {
            return Err(RpcError::InvalidJson(
                "Error does not contain valid \"id\" field".to_string(),
            ))
        }

        if !map.contains_key("error") || !map["error"].is_object() {
            return Err(RpcError::InvalidJson(
                "Error does not contain valid \"error\" field".to_string(),
            ))
        }

        let error: &HashMap<String, JsonValue> = map["error"].get().unwrap();

        if !error.contains_key("code") || !error["code"].is_number() {
            return Err(RpcError::InvalidJson(
                "Error does not contain valid \"code\" field".to_string(),
            ))
        }

        if !error.contains_key("message") || !error["message"].is_string() {
            return Err(RpcError::InvalidJson(
                "Error does not contain valid \"message\" field".to_string(),
            ))
        }

        Ok(Self {
            jsonrpc: "2.0",
            id: *map["id"].get::<f64>().unwrap() as u16,
            code: *error["code"].get::<f64>().unwrap() as i32,
            message: error["message"].get::<String>().unwrap().clone(),
        })
    }
}

/// A JSON-RPC notification object
#[derive(Clone, Debug)]
pub struct JsonNotification {
    /// JSON-RPC version
    pub jsonrpc: &'static str,
    /// Notification method
    pub method: String,
    /// Notification parameters
    pub params: JsonValue,
}

impl TryFrom<&JsonValue> for JsonNotification {
    type Error = RpcError;

    fn try_from(value: &JsonValue) -> std::result::Result<Self, RpcError> {
        let map = as_rpc_object(value, "Notification")?;

        if map.contains_key("id") {
            return Err(RpcError::InvalidJson(
                "Notification must not contain an \"id\" field".to_string(),
            ))
        }

        if !map.contains_key("method") || !map["method"].is_string() {
            return Err(RpcError::InvalidJson(
                "Notification does not contain valid \"method\" field".to_string(),
            ))
        }

        if !map.contains_key("params") {
            return Err(RpcError::InvalidJson(
                "Notification does not contain \"params\" field".to_string(),
            ))
        }

        Ok(Self {
            jsonrpc: "2.0",
            method: map["method"].get::<String>().unwrap().clone(),
            params: map["params"].clone(),
        })
    }
}

/// Validate the common envelope of a JSON-RPC object and hand out its map.
fn as_rpc_object<'a>(
    value: &'a JsonValue,
    kind: &str,
) -> std::result::Result<&'a HashMap<String, JsonValue>, RpcError> {
    if !value.is_object() {
        return Err(RpcError::InvalidJson(format!("{kind} is not a JSON object")))
    }

    let map: &HashMap<String, JsonValue> = value.get().unwrap();

    if !map.contains_key("jsonrpc") ||
        map["jsonrpc"] != JsonValue::String("2.0".to_string())
    {
        return Err(RpcError::InvalidJson(format!(
            "{kind} does not contain valid \"jsonrpc\" field"
        )))
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_roundtrip() {
        let req = JsonRequest::new("contract.call", JsonValue::Array(vec![]));
        let s = req.stringify().unwrap();
        let parsed: JsonValue = s.parse().unwrap();
        let map: &HashMap<String, JsonValue> = parsed.get().unwrap();
        assert_eq!(map["method"], JsonValue::String("contract.call".to_string()));
        assert_eq!(*map["id"].get::<f64>().unwrap() as u16, req.id);
    }

    #[test]
    fn reply_discrimination() {
        let resp: JsonValue =
            r#"{"jsonrpc":"2.0","id":7,"result":[{"_hex":"0x0a"}]}"#.parse().unwrap();
        match JsonResult::try_from_value(&resp).unwrap() {
            JsonResult::Response(r) => assert_eq!(r.id, 7),
            _ => panic!("expected response"),
        }

        let err: JsonValue =
            r#"{"jsonrpc":"2.0","id":7,"error":{"code":-32000,"message":"execution reverted"}}"#
                .parse()
                .unwrap();
        match JsonResult::try_from_value(&err).unwrap() {
            JsonResult::Error(e) => {
                assert_eq!(e.code, -32000);
                assert_eq!(e.message, "execution reverted");
            }
            _ => panic!("expected error"),
        }

        let notif: JsonValue =
            r#"{"jsonrpc":"2.0","method":"chain.tip","params":[]}"#.parse().unwrap();
        assert!(matches!(
            JsonResult::try_from_value(&notif).unwrap(),
            JsonResult::Notification(_)
        ));

        let garbage: JsonValue = r#"{"hello":"world"}"#.parse().unwrap();
        assert!(JsonResult::try_from_value(&garbage).is_err());
    }
}
