use crate::data::entity::{DeathCause, NomadId, TribeId};
use crate::data::terrain::Position;
use serde::{Deserialize, Serialize};

/// Notable simulation events, streamed to the event log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Birth {
        id: NomadId,
        mother: NomadId,
        father: NomadId,
        position: Position,
        tribe: Option<TribeId>,
        generation: u32,
        tick: u64,
        timestamp: String,
    },
    Death {
        id: NomadId,
        age: u64,
        tick: u64,
        timestamp: String,
        cause: DeathCause,
    },
    Extinction {
        tick: u64,
        timestamp: String,
    },
}

impl LiveEvent {
    #[must_use]
    pub fn tick(&self) -> u64 {
        match self {
            LiveEvent::Birth { tick, .. }
            | LiveEvent::Death { tick, .. }
            | LiveEvent::Extinction { tick, .. } => *tick,
        }
    }

    /// Current wall-clock timestamp in RFC 3339, as stored on every event.
    #[must_use]
    pub fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn events_serialize_with_tag() {
        let ev = LiveEvent::Death {
            id: NomadId(Uuid::nil()),
            age: 12,
            tick: 40,
            timestamp: "t".to_string(),
            cause: DeathCause::Thirst,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("\"event\":\"Death\""));
        assert_eq!(ev.tick(), 40);
    }
}
