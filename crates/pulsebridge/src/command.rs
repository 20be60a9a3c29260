//! Inbound command parsing and the topic dispatch table.
//!
//! Topics map to commands through a static match instead of a runtime
//! registration table, so an unhandled topic is a compile-time visible
//! fall-through rather than a missing map entry.

use serde::Deserialize;
use thiserror::Error;

use crate::bus::topic;

/// An inbound control command, parsed from topic suffix and payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Make the named sink the default output
    SetDefaultSink { sink: String },
    /// Mute or unmute the current default sink
    SetMute { mute: bool },
    /// Absolute volume on the current default sink, percent of base volume
    SetVolume { percent: f64 },
    /// Relative volume change on the current default sink, signed percent
    ChangeVolume { percent: f64 },
    /// Switch a card to the named profile
    SetCardProfile { card_index: u32, profile: String },
    /// Move a sink input to the named sink
    MoveSinkInput { sink_input_index: u32, sink: String },
    /// Force a full refresh and full-state publish
    Initialize,
}

/// Structured payload of the sink-input request topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SinkInputRequest {
    command: String,
    #[serde(default)]
    sink_input_index: u32,
    #[serde(default)]
    sink_name: String,
}

/// Why an inbound message could not be turned into a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unrecognized topic: {0}")]
    UnknownTopic(String),

    #[error("Payload is not valid UTF-8")]
    NotUtf8,

    #[error("Could not parse boolean payload: {0}")]
    InvalidBool(String),

    #[error("Could not parse numeric payload: {0}")]
    InvalidNumber(String),

    #[error("Could not parse card index from topic: {0}")]
    InvalidCardIndex(String),

    #[error("Could not parse sink input request: {0}")]
    InvalidSinkInputRequest(#[from] serde_json::Error),
}

impl Command {
    /// Parse a command from an inbound topic suffix and payload.
    ///
    /// Returns `Ok(None)` for empty payloads and for well-formed payloads
    /// that ask for nothing (an unrecognized sink-input command, a blank
    /// sink or profile name).
    pub fn parse(suffix: &str, payload: &[u8]) -> Result<Option<Self>, CommandError> {
        if payload.is_empty() {
            return Ok(None);
        }
        match suffix {
            topic::SET_DEFAULT_SINK => {
                let sink = text(payload)?.trim();
                if sink.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Self::SetDefaultSink { sink: sink.to_string() }))
                }
            }
            topic::SET_MUTE => {
                let raw = text(payload)?.trim();
                let mute = raw
                    .parse::<bool>()
                    .map_err(|_| CommandError::InvalidBool(raw.to_string()))?;
                Ok(Some(Self::SetMute { mute }))
            }
            topic::SET_VOLUME => Ok(Some(Self::SetVolume { percent: number(payload)? })),
            topic::CHANGE_VOLUME => Ok(Some(Self::ChangeVolume { percent: number(payload)? })),
            topic::SINK_INPUT_REQ => {
                let req: SinkInputRequest = serde_json::from_slice(payload)?;
                if req.command.eq_ignore_ascii_case("movesink") && !req.sink_name.is_empty() {
                    Ok(Some(Self::MoveSinkInput {
                        sink_input_index: req.sink_input_index,
                        sink: req.sink_name,
                    }))
                } else {
                    Ok(None)
                }
            }
            topic::INITIALIZE => Ok(Some(Self::Initialize)),
            other => parse_card_profile(other, payload),
        }
    }

    /// The topic suffix this command arrived on, echoed as its consumed ack.
    #[must_use]
    pub fn ack_topic(&self) -> String {
        match self {
            Self::SetDefaultSink { .. } => topic::SET_DEFAULT_SINK.to_string(),
            Self::SetMute { .. } => topic::SET_MUTE.to_string(),
            Self::SetVolume { .. } => topic::SET_VOLUME.to_string(),
            Self::ChangeVolume { .. } => topic::CHANGE_VOLUME.to_string(),
            Self::SetCardProfile { card_index, .. } => format!(
                "{}{card_index}{}",
                topic::CARD_PROFILE_PREFIX,
                topic::CARD_PROFILE_SUFFIX
            ),
            Self::MoveSinkInput { .. } => topic::SINK_INPUT_REQ.to_string(),
            Self::Initialize => topic::INITIALIZE.to_string(),
        }
    }
}

fn parse_card_profile(suffix: &str, payload: &[u8]) -> Result<Option<Command>, CommandError> {
    let Some(card) = suffix
        .strip_prefix(topic::CARD_PROFILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(topic::CARD_PROFILE_SUFFIX))
    else {
        return Err(CommandError::UnknownTopic(suffix.to_string()));
    };
    let card_index =
        card.parse::<u32>().map_err(|_| CommandError::InvalidCardIndex(card.to_string()))?;
    let profile = text(payload)?.trim();
    if profile.is_empty() {
        Ok(None)
    } else {
        Ok(Some(Command::SetCardProfile { card_index, profile: profile.to_string() }))
    }
}

fn text(payload: &[u8]) -> Result<&str, CommandError> {
    std::str::from_utf8(payload).map_err(|_| CommandError::NotUtf8)
}

fn number(payload: &[u8]) -> Result<f64, CommandError> {
    let raw = text(payload)?.trim();
    // "NaN" and "inf" parse as f64 but are meaningless as percentages.
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber(raw.to_string()))
}
