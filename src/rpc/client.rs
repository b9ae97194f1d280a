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

//! JSON-RPC client-side implementation.
use std::{sync::Arc, time::Duration};

use futures::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader, ReadHalf, WriteHalf},
    select, AsyncReadExt, FutureExt,
};
use log::{debug, error};
use smol::{channel, net::TcpStream, Timer};
use tinyjson::JsonValue;
use url::Url;

use super::jsonrpc::{JsonRequest, JsonResult};
use crate::{error::RpcError, Error, Result};

/// If the server doesn't reply within this many seconds, the request fails.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC client implementation using asynchronous channels.
pub struct RpcClient {
    req_send: channel::Sender<JsonValue>,
    rep_recv: channel::Receiver<JsonResult>,
    stop_send: channel::Sender<()>,
    endpoint: Url,
}

impl RpcClient {
    /// Instantiate a new JSON-RPC client that connects to the given endpoint.
    /// The communication loop is detached onto the given executor.
    pub async fn new(endpoint: Url, ex: Arc<smol::Executor<'static>>) -> Result<Self> {
        if endpoint.scheme() != "tcp" {
            return Err(Error::UnsupportedTransport(endpoint.scheme().to_string()))
        }

        let Some(host) = endpoint.host_str() else { return Err(Error::ConnectFailed) };
        let Some(port) = endpoint.port() else { return Err(Error::ConnectFailed) };

        let stream = match TcpStream::connect((host, port)).await {
            Ok(s) => s,
            Err(e) => {
                error!(target: "rpc::client", "Connecting to {endpoint} failed: {e}");
                return Err(Error::ConnectFailed)
            }
        };

        let (req_send, req_recv) = channel::unbounded();
        let (rep_send, rep_recv) = channel::unbounded();
        let (stop_send, stop_recv) = channel::unbounded();

        let (reader, writer) = stream.split();
        ex.spawn(Self::reqrep_loop(reader, writer, rep_send, req_recv, stop_recv)).detach();

        Ok(Self { req_send, rep_recv, stop_send, endpoint })
    }

    /// Stop the communication loop and close the connection.
    pub async fn stop(&self) {
        let _ = self.stop_send.send(()).await;
    }

    /// Send a given JSON-RPC request over the instantiated client and wait
    /// for the reply.
    pub async fn request(&self, req: JsonRequest) -> Result<JsonValue> {
        let req_id = req.id;
        debug!(target: "rpc::client", "--> {}", req.stringify()?);

        // If the connection is closed, sending will fail on a closed channel.
        if self.req_send.send((&req).into()).await.is_err() {
            error!(target: "rpc::client", "Unable to send to {} (channels closed)", self.endpoint);
            return Err(Error::NetworkOperationFailed)
        }

        // Likewise for waiting on a closed channel.
        let Ok(reply) = self.rep_recv.recv().await else {
            error!(target: "rpc::client", "Unable to recv from {} (channels closed)", self.endpoint);
            return Err(Error::NetworkOperationFailed)
        };

        match reply {
            JsonResult::Response(rep) => {
                if rep.id != req_id {
                    return Err(RpcError::IdMismatch.into())
                }

                Ok(rep.result)
            }

            JsonResult::Error(e) => Err(RpcError::Server(e.code, e.message).into()),

            JsonResult::Notification(n) => {
                Err(RpcError::UnexpectedReply(format!("notification \"{}\"", n.method)).into())
            }
        }
    }

    /// Oneshot send a given JSON-RPC request over the instantiated client
    /// and stop the communication loop on reply.
    pub async fn oneshot_request(&self, req: JsonRequest) -> Result<JsonValue> {
        let rep = self.request(req).await;
        self.stop().await;
        rep
    }

    /// Internal function that loops on the connection stream and
    /// multiplexes requests and replies. The wire format is one JSON
    /// object per line.
    async fn reqrep_loop(
        reader: ReadHalf<TcpStream>,
        mut writer: WriteHalf<TcpStream>,
        rep_send: channel::Sender<JsonResult>,
        req_recv: channel::Receiver<JsonValue>,
        stop_recv: channel::Receiver<()>,
    ) -> Result<()> {
        let mut reader = BufReader::new(reader);

        loop {
            select! {
                req = req_recv.recv().fuse() => {
                    let Ok(req) = req else { break };

                    let mut line = req.stringify()?;
                    line.push('\n');
                    writer.write_all(line.as_bytes()).await?;

                    let mut buf = String::new();
                    let read = async {
                        reader.read_line(&mut buf).await?;
                        Ok(())
                    };
                    let timeout = async {
                        Timer::after(READ_TIMEOUT).await;
                        Err(Error::ConnectTimeout)
                    };
                    smol::future::or(read, timeout).await?;

                    let val: JsonValue = buf.trim().parse()?;
                    let reply = JsonResult::try_from_value(&val)?;
                    debug!(target: "rpc::client", "<-- {}", buf.trim());

                    if rep_send.send(reply).await.is_err() {
                        break
                    }
                }

                _ = stop_recv.recv().fuse() => break,
            }
        }

        Ok(())
    }
}
