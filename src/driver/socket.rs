use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::command::NavCommand;
use crate::context::NavContext;
use crate::logging::{LogLevel, json_kv};

use super::keys::{key_command, parse_key};

const LOG_TARGET: &str = "nav::bridge";

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct KeyFrame {
    code: String,
}

/// Decode one JSON line into a command.
///
/// Frames carry a `type` tag: the navigation commands (`navigate`,
/// `navigate_push`, `back`, `pop_to_top`) plus `key`, which is mapped through
/// [`key_command`]. A key without a binding decodes to `None`.
pub fn decode_frame(line: &str) -> BridgeResult<Option<NavCommand>> {
    let value: Value =
        serde_json::from_str(line).map_err(|err| BridgeError::Decode(err.to_string()))?;
    if value.get("type").and_then(Value::as_str) == Some("key") {
        let frame: KeyFrame =
            serde_json::from_value(value).map_err(|err| BridgeError::Decode(err.to_string()))?;
        return Ok(key_command(&parse_key(&frame.code)));
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|err| BridgeError::Decode(err.to_string()))
}

/// Per-frame answer written back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeReply {
    pub ok: bool,
    pub handled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeReply {
    fn handled(handled: bool) -> Self {
        Self {
            ok: true,
            handled,
            error: None,
        }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            ok: false,
            handled: false,
            error: Some(error.to_string()),
        }
    }
}

/// Execute one frame against `cx` and describe the outcome.
pub fn handle_line(cx: &mut NavContext, line: &str) -> BridgeReply {
    let command = match decode_frame(line) {
        Ok(Some(command)) => command,
        Ok(None) => return BridgeReply::handled(false),
        Err(err) => {
            cx.log(
                LogLevel::Warn,
                LOG_TARGET,
                "frame_rejected",
                [json_kv("reason", json!(err.to_string()))],
            );
            return BridgeReply::failed(err);
        }
    };

    let name = command.name();
    match cx.execute(command) {
        Ok(handled) => BridgeReply::handled(handled),
        Err(err) => {
            cx.record_dropped(name, &err);
            BridgeReply::failed(err)
        }
    }
}

/// Newline-delimited JSON command bridge over TCP.
///
/// The bridge runs on the UI thread: each frame is executed against the
/// context before the next one is read, and queued commands from other
/// threads are drained between frames.
pub struct SocketBridge {
    listener: TcpListener,
}

impl SocketBridge {
    pub fn bind<A>(addr: A) -> BridgeResult<Self>
    where
        A: ToSocketAddrs,
    {
        Ok(Self {
            listener: TcpListener::bind(addr)?,
        })
    }

    pub fn local_addr(&self) -> BridgeResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve a single client until it disconnects. Returns the number of
    /// frames processed.
    pub fn serve_one(&self, cx: &mut NavContext) -> BridgeResult<usize> {
        let mut frames = 0;
        for stream in self.listener.incoming() {
            let stream = stream?;
            stream.set_nodelay(true).ok();
            cx.log(
                LogLevel::Info,
                LOG_TARGET,
                "client_connected",
                [json_kv(
                    "peer",
                    json!(stream.peer_addr().map(|a| a.to_string()).ok()),
                )],
            );

            let inbound = BufReader::new(stream.try_clone()?);
            let mut writer = stream;
            for line in inbound.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let reply = handle_line(cx, &line);
                cx.drain_commands();
                let encoded = serde_json::to_string(&reply)?;
                writer.write_all(encoded.as_bytes())?;
                writer.write_all(b"\n")?;
                writer.flush()?;
                frames += 1;
            }
            break;
        }
        Ok(frames)
    }
}
