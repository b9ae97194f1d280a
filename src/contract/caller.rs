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

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use num_bigint::BigUint;
use tinyjson::JsonValue;
use url::Url;

use super::{decode_string, decode_uint, ContractCall, TxReceipt};
use crate::{
    rpc::{client::RpcClient, jsonrpc::JsonRequest},
    Error, Result,
};

/// Gateway seam for contract reads and writes. The production
/// implementation talks JSON-RPC to `gegod`; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait Caller: Send + Sync {
    /// Execute a single contract read and return the positional raw values.
    async fn call(&self, call: &ContractCall) -> Result<Vec<JsonValue>>;

    /// Execute a batch of independent contract reads in one network round
    /// trip. The reply tuples match the request order positionally.
    async fn multicall(&self, calls: &[ContractCall]) -> Result<Vec<Vec<JsonValue>>>;

    /// Current network gas price.
    async fn gas_price(&self) -> Result<BigUint>;

    /// Submit a write call with the given gas price. Returns the
    /// transaction hash.
    async fn send(&self, call: &ContractCall, gas_price: &BigUint) -> Result<String>;

    /// Wait for the given transaction to land on-chain and return its
    /// receipt. Blocks until the chain reports it; no client-side timeout.
    async fn confirm(&self, tx_hash: &str) -> Result<TxReceipt>;
}

/// [`Caller`] implementation over the `gegod` JSON-RPC gateway.
pub struct RpcCaller {
    rpc_client: RpcClient,
}

impl RpcCaller {
    pub async fn new(endpoint: Url, ex: Arc<smol::Executor<'static>>) -> Result<Self> {
        let rpc_client = RpcClient::new(endpoint, ex).await?;
        Ok(Self { rpc_client })
    }

    /// Stop the underlying RPC client.
    pub async fn stop(&self) {
        self.rpc_client.stop().await
    }

    /// Auxiliary function to ping the configured gegod gateway for liveness.
    pub async fn ping(&self) -> Result<JsonValue> {
        let req = JsonRequest::new("ping", JsonValue::Array(vec![]));
        self.rpc_client.oneshot_request(req).await
    }

    async fn request(&self, method: &str, params: JsonValue) -> Result<JsonValue> {
        let req = JsonRequest::new(method, params);
        self.rpc_client.request(req).await
    }
}

#[async_trait]
impl Caller for RpcCaller {
    async fn call(&self, call: &ContractCall) -> Result<Vec<JsonValue>> {
        debug!(target: "contract::caller", "call {}::{}", call.address, call.method);

        let rep = self.request("contract.call", JsonValue::Array(vec![call.into()])).await?;
        let JsonValue::Array(values) = rep else {
            return Err(Error::DecodeError("Contract call reply is not an array"))
        };

        Ok(values)
    }

    async fn multicall(&self, calls: &[ContractCall]) -> Result<Vec<Vec<JsonValue>>> {
        debug!(target: "contract::caller", "multicall with {} aggregated reads", calls.len());

        let params = JsonValue::Array(calls.iter().map(|c| c.into()).collect());
        let rep = self.request("contract.multicall", params).await?;
        let JsonValue::Array(tuples) = rep else {
            return Err(Error::DecodeError("Multicall reply is not an array"))
        };

        if tuples.len() != calls.len() {
            return Err(Error::DecodeError("Multicall reply length mismatch"))
        }

        let mut ret = Vec::with_capacity(tuples.len());
        for tuple in tuples {
            let JsonValue::Array(values) = tuple else {
                return Err(Error::DecodeError("Multicall reply tuple is not an array"))
            };
            ret.push(values);
        }

        Ok(ret)
    }

    async fn gas_price(&self) -> Result<BigUint> {
        let rep = self.request("chain.gas_price", JsonValue::Array(vec![])).await?;
        decode_uint(&rep)
    }

    async fn send(&self, call: &ContractCall, gas_price: &BigUint) -> Result<String> {
        debug!(target: "contract::caller", "send {}::{}", call.address, call.method);

        let params = JsonValue::Array(vec![call.into(), super::uint_arg(gas_price)]);
        let rep = self.request("contract.send", params).await?;
        decode_string(&rep)
    }

    async fn confirm(&self, tx_hash: &str) -> Result<TxReceipt> {
        debug!(target: "contract::caller", "awaiting confirmation of {tx_hash}");

        let params = JsonValue::Array(vec![JsonValue::String(tx_hash.to_string())]);
        let rep = self.request("contract.confirm", params).await?;
        TxReceipt::try_from(&rep)
    }
}
