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

use log::debug;

use super::{caller::Caller, ContractCall, TxReceipt};
use crate::{
    error::{RpcError, TxFailed},
    Error, Result,
};

/// Gateway error code for a wallet-side rejection of the signing prompt.
const ERR_TX_REJECTED: i32 = -32050;

/// Submit a write call the way every user action does it: estimate the
/// gas price, send, await confirmation, and require a success status.
/// Failures come back as the tagged [`TxFailed`] taxonomy; there is no
/// retry and no client-side timeout, a failed operation is terminal until
/// the user triggers it again.
pub async fn send_with_gas_estimate(
    caller: &dyn Caller,
    call: &ContractCall,
) -> Result<TxReceipt> {
    let gas_price = caller.gas_price().await?;
    debug!(
        target: "contract::tx",
        "submitting {}::{} with gas price {}", call.address, call.method, gas_price
    );

    let tx_hash = caller.send(call, &gas_price).await.map_err(narrow_tx_error)?;
    let receipt = caller.confirm(&tx_hash).await.map_err(narrow_tx_error)?;

    if receipt.status != 1 {
        return Err(TxFailed::BadStatus(receipt.status).into())
    }

    Ok(receipt)
}

/// Narrow an RPC-layer failure from the submission path into the tagged
/// transaction taxonomy. Network failures stay network failures.
fn narrow_tx_error(e: Error) -> Error {
    match e {
        Error::RpcClient(RpcError::Server(code, message)) => {
            if code == ERR_TX_REJECTED {
                return TxFailed::Rejected.into()
            }

            let message = if message.is_empty() { None } else { Some(message) };
            TxFailed::Reverted { message }.into()
        }

        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_server_errors_narrow_to_tx_taxonomy() {
        let rejected = narrow_tx_error(RpcError::Server(ERR_TX_REJECTED, "".to_string()).into());
        assert!(matches!(rejected, Error::TxFailed(TxFailed::Rejected)));

        let reverted =
            narrow_tx_error(RpcError::Server(-32000, "BURN: not enough quota".to_string()).into());
        match reverted {
            Error::TxFailed(TxFailed::Reverted { message }) => {
                assert_eq!(message.as_deref(), Some("BURN: not enough quota"))
            }
            _ => panic!("expected revert"),
        }

        let anonymous = narrow_tx_error(RpcError::Server(-32000, "".to_string()).into());
        match anonymous {
            Error::TxFailed(TxFailed::Reverted { message }) => assert!(message.is_none()),
            _ => panic!("expected revert"),
        }

        // Plain network failures are not transaction failures
        let net = narrow_tx_error(Error::ConnectTimeout);
        assert!(matches!(net, Error::ConnectTimeout));
    }
}
