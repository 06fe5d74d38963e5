use serde::{Deserialize, Serialize};

/// Venue — static reference data from the catalog seed file.
/// PK = id. Read-only at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Venue identifier — primary key.
    pub id: String,

    /// Display name shown on feed posts ("Checked in at ...").
    pub name: String,

    pub latitude: f64,
    pub longitude: f64,

    /// Opaque image URL, forwarded uninterpreted.
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_json_roundtrip() {
        let v = Venue {
            id: "1".into(),
            name: "DT".into(),
            latitude: 63.4342,
            longitude: 10.3970,
            image: "https://img/dt.jpg".into(),
        };
        let json = serde_json::to_string(&v).unwrap();
        let back: Venue = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
