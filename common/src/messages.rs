use crate::game_state::{GameState, StateError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed state payload: {0}")]
    MalformedState(serde_json::Error),
    #[error("Invalid state: {0}")]
    InvalidState(#[from] StateError),
    #[error("Malformed last move payload: {0}")]
    MalformedLastMove(serde_json::Error),
}

// Body of GET /state. Both fields are JSON documents encoded as strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StateResponse {
    pub state: String,
    pub last_move: Option<String>,
}

impl StateResponse {
    pub fn decode_state(&self) -> Result<GameState, DecodeError> {
        let state: GameState =
            serde_json::from_str(&self.state).map_err(DecodeError::MalformedState)?;
        state.validate()?;
        Ok(state)
    }

    pub fn decode_last_move(&self) -> Result<Option<LastMove>, DecodeError> {
        let raw = match &self.last_move {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let value: Value = serde_json::from_str(raw).map_err(DecodeError::MalformedLastMove)?;
        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(LastMove(s)),
            other => Some(LastMove(other.to_string())),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LastMove(pub String);

impl LastMove {
    pub fn new(description: impl Into<String>) -> Self {
        LastMove(description.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LastMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
