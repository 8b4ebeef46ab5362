//! Config generation for the lookout VPS monitor.
//!
//! The monitor publishes one JSON payload per node on
//! `vps-monitoring/<name>`. Keeping the Home Assistant side in sync by
//! hand does not scale past a couple of nodes: every node needs a grid
//! of dashboard cards and nine MQTT sensors, and every *pair* of nodes
//! needs TCP/ICMP interconnect entities in both directions. This crate
//! expands all of that mechanically from the monitor's own node list.
//!
//! ```yaml
//! nodes:
//!   - name: web-01
//!   - name: db
//! ```
//!
//! expands into a dashboard-card document (`cards.yaml`) and a sensor
//! definition document (`hass.yaml`), one section per node plus one
//! interconnect pair per ordered pair of distinct nodes, in input
//! order. Generation is deterministic: the same node list always
//! produces byte-identical documents.
//!
//! The Jinja expressions embedded in both documents are evaluated later
//! by Home Assistant, never here; they pass through as literal text.

pub mod cards;
pub mod config;
pub mod error;
pub mod sensors;
mod template;

pub use config::{Config, Node};
pub use error::ConfgenError;
