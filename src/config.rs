#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, path::PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub manager: ManagerConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub systemctl: String,
    pub unit_dir: PathBuf,
    pub unit_file_mode: FileMode,
}

/// Values the CLI uses when a flag is omitted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DefaultsConfig {
    pub restart: String,
    pub restart_sec: String,
}

/// Unix permission bits, written as an octal string (`"0644"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode(pub u32);

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            systemctl: "systemctl".into(),
            unit_dir: PathBuf::from("/etc/systemd/system"),
            unit_file_mode: FileMode(0o666),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            restart: "always".into(),
            restart_sec: "5".into(),
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

impl Serialize for FileMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let digits = raw.trim().trim_start_matches("0o");

        match u32::from_str_radix(digits, 8) {
            Ok(mode) if mode <= 0o7777 => Ok(Self(mode)),
            _ => Err(de::Error::custom(format!("invalid file mode {raw:?}"))),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        homedir::my_home()
            .ok()
            .flatten()
            .unwrap_or_else(|| PathBuf::from("/root"))
            .join(".sysunit/config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let config: Config = confy::load_path(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.is_file());
        assert!(fs::read_to_string(&path).unwrap().contains("0666"));
    }

    #[test]
    fn loads_custom_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            "manager:\n  systemctl: /usr/bin/systemctl\n  unit_dir: /tmp/units\n  unit_file_mode: \"0644\"\ndefaults:\n  restart: on-failure\n  restart_sec: \"10\"\n",
        )
        .unwrap();

        let config: Config = confy::load_path(&path).unwrap();
        assert_eq!(config.manager.systemctl, "/usr/bin/systemctl");
        assert_eq!(config.manager.unit_dir, PathBuf::from("/tmp/units"));
        assert_eq!(config.manager.unit_file_mode, FileMode(0o644));
        assert_eq!(config.defaults.restart, "on-failure");
        assert_eq!(config.defaults.restart_sec, "10");
    }

    #[test]
    fn rejects_non_octal_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(
            &path,
            "manager:\n  systemctl: systemctl\n  unit_dir: /tmp\n  unit_file_mode: \"0999\"\ndefaults:\n  restart: always\n  restart_sec: \"5\"\n",
        )
        .unwrap();

        assert!(confy::load_path::<Config>(&path).is_err());
    }
}
