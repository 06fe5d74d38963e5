use std::path::PathBuf;

/// Service configuration shared by server binaries.
///
/// The binary parses its CLI flags, fills this in, and passes it to
/// storage initialization.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory for all persistent state.
    pub data_dir: Option<PathBuf>,

    /// Path to the redb database file.
    /// Defaults to `{data_dir}/data.redb` if not specified.
    pub db_path: Option<PathBuf>,

    /// Path to the venue catalog JSON file.
    /// Defaults to `{data_dir}/venues.json` if not specified.
    pub venues_path: Option<PathBuf>,

    /// Listen address for the HTTP server.
    pub listen: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            db_path: None,
            venues_path: None,
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the redb database path, falling back to `{data_dir}/data.redb`.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("data.redb"))
    }

    /// Resolve the venue catalog path, falling back to `{data_dir}/venues.json`.
    pub fn resolve_venues_path(&self) -> PathBuf {
        self.venues_path
            .clone()
            .unwrap_or_else(|| self.resolve_data_subpath("venues.json"))
    }

    fn resolve_data_subpath(&self, name: &str) -> PathBuf {
        self.data_dir
            .as_ref()
            .map(|d| d.join(name))
            .unwrap_or_else(|| PathBuf::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults_under_data_dir() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/data/data.redb"));
        assert_eq!(
            config.resolve_venues_path(),
            PathBuf::from("/data/venues.json")
        );
    }

    #[test]
    fn explicit_paths_win() {
        let config = ServiceConfig {
            data_dir: Some(PathBuf::from("/data")),
            db_path: Some(PathBuf::from("/elsewhere/kv.redb")),
            ..Default::default()
        };
        assert_eq!(config.resolve_db_path(), PathBuf::from("/elsewhere/kv.redb"));
    }
}
