//! JSON export surface
//!
//! The only fallible boundary in the crate: everything the session holds is
//! packaged into a single versioned document for replay, review tools and
//! persistence. No file or network I/O here; callers own the bytes.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{MatchEvent, MatchStats};
use crate::session::MatchSession;

/// Versioned snapshot of one session's event log and statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchExport {
    /// Schema version for forward compatibility
    pub schema_version: u8,
    pub events: Vec<MatchEvent>,
    pub stats: MatchStats,
}

impl MatchExport {
    /// Current schema version
    pub const CURRENT_VERSION: u8 = 1;

    pub fn from_session(session: &MatchSession) -> Self {
        Self {
            schema_version: Self::CURRENT_VERSION,
            events: session.match_events(),
            stats: session.match_stats(),
        }
    }
}

/// Serialize the session's log and stats as a versioned JSON document
pub fn export_match_json(session: &MatchSession) -> Result<String> {
    let export = MatchExport::from_session(session);
    Ok(serde_json::to_string(&export)?)
}

/// Parse a document produced by [`export_match_json`]
pub fn parse_match_json(json: &str) -> Result<MatchExport> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::models::{Player, PointEndReason};

    fn played_session() -> MatchSession {
        let mut session = MatchSession::new();
        session.start_new_point();
        session.record_shot("serve", Player::One);
        session.end_point(Player::One, PointEndReason::Ace);
        session
    }

    #[test]
    fn test_export_shape() {
        let session = played_session();
        let json = export_match_json(&session).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["events"].as_array().unwrap().len(), 3);
        assert_eq!(value["events"][0]["type"], "point_start");
        assert_eq!(value["events"][2]["details"]["reason"], "ace");
        assert_eq!(value["stats"]["aces"], 1);
        assert_eq!(value["stats"]["total_shots"], 1);
    }

    #[test]
    fn test_export_parse_round_trip() {
        let session = played_session();
        let json = export_match_json(&session).unwrap();
        let parsed = parse_match_json(&json).unwrap();
        assert_eq!(parsed, MatchExport::from_session(&session));
    }

    #[test]
    fn test_parse_rejects_malformed_document() {
        let err = parse_match_json("{\"schema_version\": 1}").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn test_empty_session_exports_cleanly() {
        let session = MatchSession::new();
        let parsed = parse_match_json(&export_match_json(&session).unwrap()).unwrap();
        assert!(parsed.events.is_empty());
        assert_eq!(parsed.stats, MatchStats::default());
    }
}
