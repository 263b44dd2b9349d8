//! Serializable session state

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::util::Position;


/// Plain value representation of a session
///
/// A snapshot holds everything needed to reconstruct a session without
/// replaying its moves. Atom positions are indexed by atom id. The undo history
/// is not part of a snapshot.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: u32,
    pub atoms: Vec<Position>,
    pub moves: u32,
    pub seconds: u64,
    pub finished: bool,
}

impl Snapshot {
    /// Encode the snapshot as JSON
    ///
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a snapshot from JSON
    ///
    pub fn decode(data: &str) -> Result<Self, Error> {
        serde_json::from_str(data).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }
}
