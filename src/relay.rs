//! Line-oriented transport between a session, the authority, and the
//! terminal.

use crate::command::{CommandError, LocalCommand};
use crate::session::GameSession;
use derive_more::{Display, Error};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};

/// Why the relay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RelayExit {
    /// The local player quit.
    #[display("player quit")]
    Quit,
    /// The authority closed the connection.
    #[display("authority closed the connection")]
    RemoteClosed,
}

/// Relay I/O error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Relay error: {} at {}:{}", message, file, line)]
pub struct RelayError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl RelayError {
    /// Creates a new relay error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for RelayError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

/// Pumps frames and commands until the player quits or the authority hangs
/// up.
///
/// Inbound frames from `remote` and command lines from `local` are handed
/// to the session one at a time, frames first when both are ready. A line
/// that is not UTF-8 is logged and dropped; only I/O failures end the relay.
/// Frames the session queues on its outbound channel are written to
/// `writer`, one per line, after each input.
#[instrument(skip_all)]
pub async fn run<R, L, W>(
    session: &mut GameSession,
    outbound: &mut UnboundedReceiver<String>,
    mut remote: R,
    mut local: L,
    mut writer: W,
) -> Result<RelayExit, RelayError>
where
    R: AsyncBufRead + Unpin,
    L: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    // Partial reads survive a lost select race and are resumed next round.
    let mut remote_buf = Vec::new();
    let mut local_buf = Vec::new();
    let mut local_open = true;

    let exit = loop {
        tokio::select! {
            // Authority frames are drained before local commands.
            biased;

            read = remote.read_until(b'\n', &mut remote_buf) => {
                if read? == 0 {
                    info!("Authority closed the connection");
                    break RelayExit::RemoteClosed;
                }
                if let Some(frame) = take_line(&mut remote_buf, "authority") {
                    session.receive_raw(&frame);
                }
            },
            read = local.read_until(b'\n', &mut local_buf), if local_open => {
                if read? == 0 {
                    debug!("Local input closed");
                    local_open = false;
                } else if let Some(line) = take_line(&mut local_buf, "terminal") {
                    match line.parse::<LocalCommand>() {
                        Ok(LocalCommand::Quit) => break RelayExit::Quit,
                        Ok(command) => {
                            if let Err(error) = session.apply(command) {
                                warn!(%error, "Command refused");
                            }
                        }
                        Err(CommandError::Empty) => {}
                        Err(error) => warn!(%error, "Could not read command"),
                    }
                }
            },
        }

        flush(outbound, &mut writer).await?;
    };

    flush(outbound, &mut writer).await?;
    Ok(exit)
}

/// Takes one complete line out of `buf`, without its line ending.
///
/// Returns `None` and logs when the bytes are not UTF-8.
fn take_line(buf: &mut Vec<u8>, source: &'static str) -> Option<String> {
    match String::from_utf8(std::mem::take(buf)) {
        Ok(mut line) => {
            let end = line.trim_end_matches(['\n', '\r']).len();
            line.truncate(end);
            Some(line)
        }
        Err(error) => {
            warn!(source, %error, "Dropping line that is not UTF-8");
            None
        }
    }
}

async fn flush<W>(outbound: &mut UnboundedReceiver<String>, writer: &mut W) -> Result<(), RelayError>
where
    W: AsyncWrite + Unpin,
{
    let mut wrote = false;
    while let Ok(frame) = outbound.try_recv() {
        debug!(%frame, "Sending frame");
        writer.write_all(frame.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        wrote = true;
    }
    if wrote {
        writer.flush().await?;
    }
    Ok(())
}
