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

/// Main result type used throughout the codebase.
pub type Result<T> = std::result::Result<T, Error>;

/// General library errors. Please add yours to the according
/// subsection, or make a new subsection. Keep it clean.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    // ==============
    // Parsing errors
    // ==============
    #[error("Parse failed: {0}")]
    ParseFailed(&'static str),

    #[error(transparent)]
    ParseBigIntError(#[from] num_bigint::ParseBigIntError),

    // ===============
    // Encoding errors
    // ===============
    #[error("decode failed: {0}")]
    DecodeError(&'static str),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("JSON stringify error: {0}")]
    JsonGenerate(String),

    // ======================
    // Network-related errors
    // ======================
    #[error("Unsupported RPC transport: {0}")]
    UnsupportedTransport(String),

    #[error("Connection failed")]
    ConnectFailed,

    #[error("Connection timed out")]
    ConnectTimeout,

    #[error("Network operation failed")]
    NetworkOperationFailed,

    #[error(transparent)]
    RpcClient(#[from] RpcError),

    // =========================
    // Contract/chain errors
    // =========================
    #[error(transparent)]
    TxFailed(#[from] TxFailed),

    #[error("Unknown chain id: {0}")]
    UnknownChainId(u64),

    #[error("Feature unavailable on this network")]
    FeatureUnavailable,

    // ===============
    // Util errors
    // ===============
    #[error("io error: {0:?}")]
    Io(std::io::ErrorKind),

    #[error("{0}")]
    Custom(String),
}

/// Errors of the JSON-RPC client module.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RpcError {
    #[error("Invalid JSON-RPC object: {0}")]
    InvalidJson(String),

    #[error("JSON-RPC server error {0}: {1}")]
    Server(i32, String),

    #[error("JSON-RPC reply id mismatch")]
    IdMismatch,

    #[error("Unexpected JSON-RPC reply: {0}")]
    UnexpectedReply(String),
}

/// Tagged transaction-failure taxonomy, produced at the transaction-helper
/// boundary so call sites switch on a finite set of kinds instead of
/// probing error shapes at runtime.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TxFailed {
    /// The wallet/gateway refused to sign or broadcast.
    #[error("Transaction rejected by the wallet")]
    Rejected,

    /// The chain reverted the transaction. Carries the contract revert
    /// message when the gateway reported one.
    #[error("Transaction reverted: {}", .message.as_deref().unwrap_or("confirm the transaction and ensure enough gas"))]
    Reverted { message: Option<String> },

    /// The transaction confirmed with a non-success receipt status.
    #[error("Transaction confirmed with failure status {0}")]
    BadStatus(u64),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}

impl From<tinyjson::JsonParseError> for Error {
    fn from(err: tinyjson::JsonParseError) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<tinyjson::JsonGenerateError> for Error {
    fn from(err: tinyjson::JsonGenerateError) -> Self {
        Self::JsonGenerate(err.to_string())
    }
}
