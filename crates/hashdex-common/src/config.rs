//! Configuration structures for Hashdex.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a simulation engine instance.
///
/// The hash strategy is stored by name and parsed when the engine is
/// created, so unknown names are rejected up front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Path to the line-delimited word file used as the record source.
    pub words_path: PathBuf,
    /// Default number of records per page.
    pub page_size: usize,
    /// Default number of entries per bucket segment.
    pub bucket_capacity: usize,
    /// Name of the active hash strategy ("simple-modulo", "djb2", "fnv1a").
    pub hash_strategy: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("./data/words.txt"),
            page_size: 100,
            bucket_capacity: 5,
            hash_strategy: "djb2".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimulatorConfig::default();
        assert_eq!(config.words_path, PathBuf::from("./data/words.txt"));
        assert_eq!(config.page_size, 100);
        assert_eq!(config.bucket_capacity, 5);
        assert_eq!(config.hash_strategy, "djb2");
    }

    #[test]
    fn test_config_custom() {
        let config = SimulatorConfig {
            words_path: PathBuf::from("/srv/words/english.txt"),
            page_size: 50,
            bucket_capacity: 8,
            hash_strategy: "fnv1a".to_string(),
        };

        assert_eq!(config.words_path, PathBuf::from("/srv/words/english.txt"));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.bucket_capacity, 8);
        assert_eq!(config.hash_strategy, "fnv1a");
    }

    #[test]
    fn test_config_clone() {
        let config1 = SimulatorConfig::default();
        let config2 = config1.clone();
        assert_eq!(config1.page_size, config2.page_size);
        assert_eq!(config1.words_path, config2.words_path);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let original = SimulatorConfig::default();
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: SimulatorConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(original.words_path, deserialized.words_path);
        assert_eq!(original.page_size, deserialized.page_size);
        assert_eq!(original.bucket_capacity, deserialized.bucket_capacity);
        assert_eq!(original.hash_strategy, deserialized.hash_strategy);
    }

    #[test]
    fn test_config_struct_update_syntax() {
        let config = SimulatorConfig {
            page_size: 25,
            ..Default::default()
        };

        assert_eq!(config.page_size, 25);
        assert_eq!(config.bucket_capacity, 5);
    }
}
