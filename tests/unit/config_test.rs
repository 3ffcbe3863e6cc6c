//! Tests for server configuration loading

use std::fs;

use habit_tracker::config::{ConfigError, ServerConfig};
use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// FILE LOADING
// =============================================================================

#[test]
fn test_load_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[server]
host = "0.0.0.0"
port = 8080
workers = 2

[cors]
allow_origins = ["http://localhost:3000"]
allow_credentials = false
"#,
    );

    let config = ServerConfig::load(Some(&path)).unwrap();
    assert_eq!(config.address(), "0.0.0.0:8080");
    assert_eq!(config.server.workers, 2);
    assert_eq!(config.cors.allow_origins, vec!["http://localhost:3000"]);
    assert!(!config.cors.allow_credentials);
}

#[test]
fn test_explicit_missing_file_is_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");
    assert!(matches!(ServerConfig::load(Some(&path)), Err(ConfigError::NotFound(_))));
}

#[test]
fn test_unknown_key_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[server]\nthreads = 8\n");
    let err = ServerConfig::load(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[server]\nport = \"eighty\"\n");
    assert!(matches!(ServerConfig::load(Some(&path)), Err(ConfigError::Parse { .. })));
}

#[test]
fn test_zero_workers_in_file_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[server]\nworkers = 0\n");
    assert!(matches!(ServerConfig::load(Some(&path)), Err(ConfigError::NoWorkers)));
}

#[test]
fn test_toml_round_trips_through_file() {
    let temp = TempDir::new().unwrap();
    let mut config = ServerConfig::default();
    config.server.port = 4242;
    config.cors.allow_origins = vec!["https://app.example".to_string()];

    let path = write_config(&temp, &config.to_toml().unwrap());
    assert_eq!(ServerConfig::load(Some(&path)).unwrap(), config);
}

// =============================================================================
// USER CONFIG DIRECTORY
// =============================================================================

#[cfg(target_os = "linux")]
mod user_dir {
    use super::*;

    struct XdgGuard(Option<std::ffi::OsString>);

    impl XdgGuard {
        fn set(path: &std::path::Path) -> Self {
            let previous = std::env::var_os("XDG_CONFIG_HOME");
            // SAFETY: tests touching the environment are #[serial]
            unsafe { std::env::set_var("XDG_CONFIG_HOME", path) };
            Self(previous)
        }
    }

    impl Drop for XdgGuard {
        fn drop(&mut self) {
            // SAFETY: tests touching the environment are #[serial]
            unsafe {
                match &self.0 {
                    Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
                    None => std::env::remove_var("XDG_CONFIG_HOME"),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_user_config_file_is_used_when_present() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("habit-tracker");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[server]\nport = 5050\n").unwrap();

        let _guard = XdgGuard::set(temp.path());
        let config = ServerConfig::load(None).unwrap();
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    #[serial]
    fn test_defaults_without_user_config() {
        let temp = TempDir::new().unwrap();
        let _guard = XdgGuard::set(temp.path());
        assert_eq!(ServerConfig::load(None).unwrap(), ServerConfig::default());
    }
}
