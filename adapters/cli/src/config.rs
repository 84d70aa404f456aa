use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use drawing_buddy_system_particles::Config as ParticleConfig;
use serde::Deserialize;
use thiserror::Error;

/// Configuration file read when `--config` is not supplied.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "drawing-buddy.toml";

/// Settings resolved from the configuration file, before CLI overrides.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub vsync: bool,
    pub particles: ParticleSettings,
    pub print_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: "Drawing Buddy".to_owned(),
            window_width: 1_280,
            window_height: 800,
            vsync: true,
            particles: ParticleSettings::default(),
            print_dir: PathBuf::from("prints"),
        }
    }
}

impl Settings {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        Ok(self)
    }

    /// Particle background configuration sized to the window.
    pub(crate) fn particle_config(&self) -> ParticleConfig {
        ParticleConfig::new(
            Duration::from_millis(self.particles.spawn_interval_ms),
            Duration::from_millis(self.particles.cull_interval_ms),
            self.window_width as f32,
            self.particles.seed,
        )
    }
}

/// Cadences and seed of the particle background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ParticleSettings {
    /// Milliseconds between spawns; zero disables spawning.
    pub spawn_interval_ms: u64,
    /// Milliseconds between culls; zero disables culling.
    pub cull_interval_ms: u64,
    pub seed: u64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1_000,
            cull_interval_ms: 5_000,
            seed: 0x5eed_d00d_1e5_c0de,
        }
    }
}

/// Errors raised while loading [`Settings`].
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("window size must be non-zero (received {width}x{height})")]
    InvalidWindowSize { width: u32, height: u32 },
}

/// Loads settings from `path`, or from [`DEFAULT_CONFIG_PATH`] when absent.
///
/// A missing default file yields the defaults; a missing explicit file is an error.
pub(crate) fn load(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_PATH), false),
    };

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if !required && error.kind() == io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    parse(&raw)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
        .validate()
}

fn parse(raw: &str) -> Result<Settings, toml::de::Error> {
    toml::from_str(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_file(label: &str, contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("drawing-buddy-{label}-{nanos}.toml"));
        fs::write(&path, contents).expect("write scratch config");
        path
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse("").expect("parses"), Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = parse(
            r#"
            window_title = "Art Time"
            print_dir = "/tmp/drawings"

            [particles]
            spawn_interval_ms = 250
            "#,
        )
        .expect("parses");

        assert_eq!(settings.window_title, "Art Time");
        assert_eq!(settings.print_dir, PathBuf::from("/tmp/drawings"));
        assert_eq!(settings.particles.spawn_interval_ms, 250);
        assert_eq!(settings.particles.cull_interval_ms, 5_000);
        assert_eq!(settings.window_width, 1_280);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("colour_mode = \"neon\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("drawing-buddy-definitely-missing.toml");
        assert!(matches!(
            load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let path = scratch_file("broken", "window_width = \"wide\"");
        let error = load(Some(&path)).expect_err("invalid width type");
        assert!(error.to_string().contains(&path.display().to_string()));
        fs::remove_file(&path).expect("remove scratch config");
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let path = scratch_file("zero", "window_height = 0");
        assert!(matches!(
            load(Some(&path)),
            Err(ConfigError::InvalidWindowSize {
                width: 1_280,
                height: 0
            })
        ));
        fs::remove_file(&path).expect("remove scratch config");
    }

    #[test]
    fn particle_config_uses_window_width() {
        let settings = Settings {
            window_width: 640,
            ..Settings::default()
        };
        assert_eq!(
            settings.particle_config(),
            ParticleConfig::new(
                Duration::from_secs(1),
                Duration::from_secs(5),
                640.0,
                0x5eed_d00d_1e5_c0de,
            )
        );
    }
}
