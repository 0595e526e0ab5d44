//! Wire format spoken with the remote authority.
//!
//! Inbound frames are JSON envelopes `{"EventType": "...", "Data": ...}`,
//! optionally wrapped as `{"Text": "<envelope json>"}`. Outbound frames are
//! bare coordinates `{"X": 2, "Y": 3}`.

use derive_more::{Display, Error};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use strictly_othello_rules::{Action, Coordinate, Side};
use strum::{EnumString, IntoStaticStr};
use tracing::{debug, instrument};

/// Event types the authority sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// The local player was given a side.
    SideAssigned,
    /// The game started.
    Initialized,
    /// A move was played.
    Moved,
    /// The staged move was accepted.
    MoveAccepted,
    /// The staged move was rejected.
    MoveRejected,
}

/// What went wrong while decoding a frame.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ProtocolErrorKind {
    /// Not valid JSON, or not shaped like an envelope.
    #[display("malformed frame: {}", _0)]
    Malformed(String),

    /// The event type is not one we understand.
    #[display("unknown event type {:?}", _0)]
    UnknownEventType(String),

    /// The event needs a payload and none was sent.
    #[display("{} is missing its Data payload", _0)]
    MissingData(&'static str),

    /// The payload did not match the event type.
    #[display("invalid {} payload: {}", _0, _1)]
    InvalidData(&'static str, String),
}

/// Protocol error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Protocol error: {} at {}:{}", kind, file, line)]
pub struct ProtocolError {
    /// What went wrong.
    pub kind: ProtocolErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ProtocolError {
    /// Creates a new protocol error with caller location tracking.
    #[track_caller]
    pub fn new(kind: ProtocolErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for ProtocolError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(ProtocolErrorKind::Malformed(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "EventType")]
    event_type: String,
    #[serde(rename = "Data", default)]
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum WireSide {
    Black,
    White,
    NotAssigned,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SidePayload {
    Wrapped {
        #[serde(rename = "Side")]
        side: WireSide,
    },
    Bare(WireSide),
}

impl WireSide {
    fn into_side(self) -> Option<Side> {
        match self {
            WireSide::Black => Some(Side::Black),
            WireSide::White => Some(Side::White),
            WireSide::NotAssigned => None,
        }
    }
}

/// Decodes one inbound frame into the action it carries.
///
/// Returns `Ok(None)` for well-formed frames that carry nothing to dispatch,
/// such as a side assignment of `NOT_ASSIGNED`.
///
/// # Errors
///
/// Returns [`ProtocolError`] for invalid JSON, unknown event types, and
/// missing or invalid payloads.
#[instrument(skip(raw), fields(len = raw.len()))]
pub fn decode(raw: &str) -> Result<Option<Action>, ProtocolError> {
    let value: Value = serde_json::from_str(raw.trim())?;
    let envelope: Envelope = serde_json::from_value(unwrap_text(value)?)?;

    let event_type = EventType::from_str(&envelope.event_type).map_err(|_| {
        ProtocolError::new(ProtocolErrorKind::UnknownEventType(envelope.event_type.clone()))
    })?;
    debug!(event_type = %envelope.event_type, "Decoding envelope");

    let action = match event_type {
        EventType::SideAssigned => {
            let payload: SidePayload = payload(event_type, envelope.data)?;
            let side = match payload {
                SidePayload::Wrapped { side } | SidePayload::Bare(side) => side,
            };
            side.into_side().map(Action::AssignSide)
        }
        EventType::Initialized => Some(Action::Initialize),
        EventType::Moved => Some(Action::Moved(payload(event_type, envelope.data)?)),
        EventType::MoveAccepted => Some(Action::MoveAccepted),
        EventType::MoveRejected => Some(Action::MoveRejected),
    };
    Ok(action)
}

/// Encodes a committed move for the authority.
///
/// # Errors
///
/// Returns [`ProtocolError`] if serialization fails.
pub fn encode_move(at: Coordinate) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&at)?)
}

fn unwrap_text(value: Value) -> Result<Value, ProtocolError> {
    if value.get("EventType").is_none()
        && let Some(inner) = value.get("Text").and_then(Value::as_str)
    {
        return Ok(serde_json::from_str(inner)?);
    }
    Ok(value)
}

fn payload<T>(event_type: EventType, data: Option<Value>) -> Result<T, ProtocolError>
where
    T: for<'de> Deserialize<'de>,
{
    let name: &'static str = event_type.into();
    let data = data.ok_or_else(|| ProtocolError::new(ProtocolErrorKind::MissingData(name)))?;
    serde_json::from_value(data)
        .map_err(|e| ProtocolError::new(ProtocolErrorKind::InvalidData(name, e.to_string())))
}
