use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) host: Option<String>,
    #[serde(default)]
    pub(crate) user: Option<String>,
    #[serde(default)]
    pub(crate) password: Option<String>,
    #[serde(default)]
    pub(crate) dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    #[serde(default)]
    pub(crate) error_columns: Option<u8>,
    #[serde(default)]
    pub(crate) debug: bool,
}

impl Config {
    pub(crate) fn load(quiet: bool) -> Self {
        // Try config locations in order of priority
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/dslmon/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("dslmon").join("config.toml"));
        }

        // 2. macOS Application Support: ~/Library/Application Support/dslmon/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let macos_path = config_dir.join("dslmon").join("config.toml");
            if !paths.contains(&macos_path) {
                paths.push(macos_path);
            }
        }

        // 3. Home directory: ~/.dslmon.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".dslmon.toml"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        for p in &paths {
            println!("Path: {:?}, exists: {}", p, p.exists());
        }
        assert!(!paths.is_empty());
    }

    #[test]
    fn parses_a_full_config() {
        let config: Config = toml::from_str(
            r#"
host = "192.168.178.1"
user = "monitor"
password = "hunter2"
dir = "/var/lib/dslmon"
timeout_secs = 5
error_columns = 3
debug = true
"#,
        )
        .unwrap();
        assert_eq!(config.host.as_deref(), Some("192.168.178.1"));
        assert_eq!(config.user.as_deref(), Some("monitor"));
        assert_eq!(config.dir, Some(PathBuf::from("/var/lib/dslmon")));
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.error_columns, Some(3));
        assert!(config.debug);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.host.is_none());
        assert!(config.password.is_none());
        assert!(!config.debug);
    }
}
