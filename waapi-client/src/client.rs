//! The connected client: one blocking TCP connection, one call in flight.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use log::{info, warn};
use serde::Deserialize;

use waapi_types::WaapiValue;

use crate::config::Config;
use crate::error::{Result, WaapiError};
use crate::framing::{read_message, write_message};
use crate::protocol::{RpcRequest, RpcResponse};
use crate::uri;

/// Identity of the remote authoring application, captured during the
/// connect handshake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerInfo {
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    #[serde(default, rename = "apiVersion")]
    pub api_version: String,
}

struct Connection {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    next_id: u64,
}

/// A synchronous client for the authoring application's remote API.
///
/// Every call is a blocking round trip; the connection is guarded by a
/// mutex so helpers can share the client by reference (e.g. deleting
/// objects while a walk iterator is borrowing it).
pub struct WaapiClient {
    conn: Mutex<Connection>,
    connected: AtomicBool,
    server_info: ServerInfo,
}

impl WaapiClient {
    /// Connect using settings from [`Config::load`].
    pub fn connect_default() -> Result<Self> {
        Self::connect_with_config(&Config::load())
    }

    /// Connect to a specific address with default timeouts.
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        Self::from_stream(stream)
    }

    /// Connect using the given settings.
    pub fn connect_with_config(config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(config.address())?;
        stream.set_read_timeout(config.read_timeout())?;
        Self::from_stream(stream)
    }

    fn from_stream(stream: TcpStream) -> Result<Self> {
        let read_stream = stream.try_clone()?;
        let mut conn = Connection {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream.try_clone()?),
            stream,
            next_id: 0,
        };

        // Handshake: ask the server who it is before handing the client out.
        let info = round_trip(&mut conn, uri::CORE_GET_INFO, WaapiValue::Null, WaapiValue::Null)?;
        let server_info: ServerInfo = serde_json::from_value(info).unwrap_or_default();

        info!(
            target: "waapi",
            "Connected to {} (API {})",
            server_info.display_name,
            server_info.api_version
        );

        Ok(Self {
            conn: Mutex::new(conn),
            connected: AtomicBool::new(true),
            server_info,
        })
    }

    /// Whether the connection is still usable. Any transport failure
    /// flips this to false permanently.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Identity reported by the remote application during the handshake.
    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Issue a call with no options body.
    pub fn call(&self, uri: &str, args: WaapiValue) -> Result<WaapiValue> {
        self.call_with_options(uri, args, WaapiValue::Null)
    }

    /// Issue a call with an options body (e.g. `{"return": [...]}`).
    pub fn call_with_options(
        &self,
        uri: &str,
        args: WaapiValue,
        options: WaapiValue,
    ) -> Result<WaapiValue> {
        if !self.is_connected() {
            return Err(WaapiError::Disconnected);
        }

        let mut conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        match round_trip(&mut conn, uri, args, options) {
            Ok(result) => Ok(result),
            Err(e) => {
                if matches!(e, WaapiError::Io(_)) {
                    self.connected.store(false, Ordering::SeqCst);
                }
                Err(e)
            }
        }
    }

    /// Shut the connection down. Further calls return
    /// [`WaapiError::Disconnected`].
    pub fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        let conn = self.conn.lock().unwrap_or_else(|p| p.into_inner());
        conn.stream.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

/// One request out, one matching response in.
fn round_trip(
    conn: &mut Connection,
    uri: &str,
    args: WaapiValue,
    options: WaapiValue,
) -> Result<WaapiValue> {
    let id = conn.next_id;
    conn.next_id += 1;

    write_message(
        &mut conn.writer,
        &RpcRequest {
            id,
            uri: uri.to_string(),
            args,
            options,
        },
    )?;

    loop {
        let resp: RpcResponse = read_message(&mut conn.reader)?;
        if resp.id != id {
            warn!(target: "waapi", "skipping stale response id {} (expected {})", resp.id, id);
            continue;
        }

        if let Some(err) = resp.error {
            return Err(WaapiError::Rpc {
                uri: uri.to_string(),
                message: err.message,
            });
        }
        return Ok(resp.result.unwrap_or(WaapiValue::Null));
    }
}
