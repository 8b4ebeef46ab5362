//! Configuration loading.
//!
//! The generator reads the same `config.yaml` the lookout monitor runs
//! from. Only the `nodes` list matters here; the monitor's other keys
//! (per-node connection details, connectivity targets, schedule) are
//! tolerated and ignored.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::ConfgenError;

/// Top-level configuration.
///
/// Unknown keys are ignored, and a missing `nodes` key behaves like an
/// empty list: both documents are then emitted with header boilerplate
/// only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Monitored nodes, in the order their sections are emitted.
    #[serde(default)]
    pub nodes: Vec<Node>,
}

/// One monitored node.
///
/// Only `name` is read. Names are assumed unique and safe to embed
/// unescaped into entity IDs and MQTT topics; neither is enforced.
#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    /// Short identifier, typically hyphen-separated (`web-01`).
    pub name: String,
}

impl Node {
    /// Human-readable label: hyphens become spaces, words are
    /// title-cased. `web-01` -> `Web 01`, `db` -> `Db`.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Derive a display name from a raw node name.
///
/// A letter is uppercased when it starts the string or follows a
/// non-letter, and lowercased otherwise, so the derivation is
/// idempotent.
pub fn display_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch == '-' {
            out.push(' ');
            prev_alpha = false;
        } else if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

impl Config {
    /// Load and parse the configuration file.
    ///
    /// A missing file is reported distinctly from an unreadable or
    /// malformed one; all three abort the run before any generation.
    pub fn load(path: &Path) -> Result<Config, ConfgenError> {
        if !path.exists() {
            return Err(ConfgenError::ConfigMissing {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfgenError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config =
            serde_yaml::from_str(&raw).map_err(|source| ConfgenError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(nodes = config.nodes.len(), "config loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_splits_hyphens_and_title_cases() {
        assert_eq!(display_name("web-01"), "Web 01");
        assert_eq!(display_name("db"), "Db");
        assert_eq!(display_name("ams-core-1"), "Ams Core 1");
    }

    #[test]
    fn display_name_is_idempotent() {
        let once = display_name("web-01");
        assert_eq!(display_name(&once), once);
    }

    #[test]
    fn display_name_lowercases_interior_letters() {
        assert_eq!(display_name("WEB-CACHE"), "Web Cache");
    }

    #[test]
    fn parse_minimal_node_list() {
        let config: Config = serde_yaml::from_str("nodes:\n  - name: alpha\n  - name: beta\n")
            .expect("minimal config parses");
        assert_eq!(config.nodes.len(), 2);
        assert_eq!(config.nodes[0].name, "alpha");
        assert_eq!(config.nodes[1].name, "beta");
    }

    #[test]
    fn parse_tolerates_monitor_keys() {
        // The monitor's own config carries connection and schedule
        // sections the generator never reads.
        let raw = r#"
nodes:
  - name: web-01
    user: deploy
    ip: 10.0.0.4
    port: 22
    id_file: /etc/lookout/id_ed25519
connectivity:
  icmp:
    - 10.0.0.5
schedule:
  interval: 4h
  splitter: 2m
"#;
        let config: Config = serde_yaml::from_str(raw).expect("monitor config parses");
        assert_eq!(config.nodes.len(), 1);
        assert_eq!(config.nodes[0].name, "web-01");
    }

    #[test]
    fn parse_missing_nodes_key_is_empty() {
        let config: Config = serde_yaml::from_str("schedule:\n  interval: 4h\n").unwrap();
        assert!(config.nodes.is_empty());
    }
}
