// kestrel_node/src/config.rs

use figment::{
    providers::{Format, Toml},
    Figment,
};
use kestrel_core::config::FusionConfig;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse node config: {0}")]
    Parse(#[from] figment::Error),
}

/// Loads the node configuration from a TOML file.
///
/// No path, or a path that does not exist, falls back to the built-in
/// defaults; a file that exists but does not parse is a startup error.
pub fn load_config(path: Option<&Path>) -> Result<FusionConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(FusionConfig::default());
    };

    if !path.exists() {
        warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(FusionConfig::default());
    }

    Ok(Figment::new().merge(Toml::file(path)).extract()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.use_absolute_fix_gating);
        assert_eq!(config.publish_rate_hz, 100.0);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let path = std::env::temp_dir().join("kestrel_config_test.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "use_absolute_fix_gating = false\n\
             outlier_multiplier = 3.5\n\
             publish_rate_hz = 20.0\n\
             \n\
             [initial_pose]\n\
             x = 1.0\n\
             y = 2.0\n\
             theta = 0.5"
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(!config.use_absolute_fix_gating);
        assert_eq!(config.outlier_multiplier, 3.5);
        assert_eq!(config.publish_rate_hz, 20.0);
        let seed = config.initial_pose.unwrap();
        assert_eq!(seed.x, 1.0);
        assert_eq!(seed.z, 0.0);
        assert_eq!(seed.theta, 0.5);
    }
}
