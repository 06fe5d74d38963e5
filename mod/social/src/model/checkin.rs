use serde::{Deserialize, Serialize};

/// CheckIn — a presence row at `venues/{venueId}/checkins/{userId}`.
///
/// The key is deterministic, so at most one row exists per
/// (venue, user): re-checking-in overwrites, checking out deletes.
/// Row present means "here now"; row absent means "checked out".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub venue_id: String,
    pub user_id: String,

    /// Derived from the user's email local part.
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,

    pub note: String,

    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkin_json_roundtrip() {
        let c = CheckIn {
            venue_id: "1".into(),
            user_id: "u42".into(),
            username: "a".into(),
            profile_image: None,
            note: "great vibe".into(),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("venueId"));
        let back: CheckIn = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
