//! Sensor-definition document generation (`hass.yaml`).
//!
//! Emits the MQTT sensor block Home Assistant loads: nine sensors per
//! node reading the JSON payload published on `vps-monitoring/<name>`,
//! then one TCP/ICMP sensor pair per other node, whose value templates
//! index the peer's name as a sub-path of the current node's
//! connectivity payload. All Jinja value and attribute templates are
//! emitted verbatim.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Node;
use crate::error::ConfgenError;
use crate::template::fill;

const HEADER: &str = "mqtt:\n  sensor:\n\n";

const NODE_SENSORS: &str = r#"    # $node
    - name: "Lookout: $node Last Check Time"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.last_check_time }}"
      icon: mdi:clock-outline

    - name: "Lookout: $node Hostname"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.hostname }}"

    - name: "Lookout: $node User"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.user }}"
    
    - name: "Lookout: $node Disk Usage"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.disk_usage }}"
      unit_of_measurement: "%"
      icon: mdi:harddisk

    - name: "Lookout: $node Free Space"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ (value_json.free_space | float / 1024 / 1024 / 1024) | round(1) }}"
      unit_of_measurement: "GB"

    - name: "Lookout: $node Total Space"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ (value_json.total_space | float / 1024 / 1024 / 1024) | round(1) }}"
      unit_of_measurement: "GB"

    - name: "Lookout: $node Last Check Duration"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.check_duration | round(1) }}"
      unit_of_measurement: "s"

    - name: "Lookout: $node Login Records"
      state_topic: "vps-monitoring/$node"
      value_template: >
        {% set recs = value_json.login_records | default([]) %}
        {% if recs | length > 0 %}
          {% set sorted = recs | sort(attribute='login_time', reverse=True) %}
          {{ sorted[0].login_time }}
        {% else %}
          unknown
        {% endif %}
      json_attributes_topic: "vps-monitoring/$node"
      json_attributes_template: >
        {% set recs = value_json.login_records | default([]) %}
        {% set sorted = recs | sort(attribute='login_time', reverse=True) %}
        {% set ns = namespace(items=[]) %}
        {% for r in sorted %}
          {% if loop.index <= 10 %}
            {% set ns.items = ns.items + [r] %}
          {% endif %}
        {% endfor %}

        {% set conn = value_json.connectivity | default({}) %}
        {% if conn is not mapping %}
          {% set conn = {} %}
        {% endif %}

        {{ {"login_records": ns.items, "connectivity": conn} | tojson }}

    - name: "Lookout: $node Connectivity"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.connectivity }}"

"#;

const INTERCONNECT_SENSORS: &str = r#"    - name: "Interconnect Lookout: $node to $peer (TCP)"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.connectivity.$peer.tcp[0].status }}"
      icon: mdi:lan-connect
      
    - name: "Interconnect Lookout: $node to $peer (ICMP)"
      state_topic: "vps-monitoring/$node"
      value_template: "{{ value_json.connectivity.$peer.icmp[0].status }}"
      icon: mdi:lan-connect

"#;

/// Render the full sensor-definition document for `nodes`, in input order.
pub fn render(nodes: &[Node]) -> String {
    let mut doc = String::from(HEADER);

    for node in nodes {
        doc.push_str(&fill(NODE_SENSORS, &[("node", node.name.as_str())]));

        // TCP/ICMP pair per other node, in input order.
        for peer in nodes.iter().filter(|other| other.name != node.name) {
            doc.push_str(&fill(
                INTERCONNECT_SENSORS,
                &[("node", node.name.as_str()), ("peer", peer.name.as_str())],
            ));
        }
    }

    doc
}

/// Render and write the document, overwriting any existing file.
pub fn write(nodes: &[Node], path: &Path) -> Result<(), ConfgenError> {
    let doc = render(nodes);
    fs::write(path, doc).map_err(|source| ConfgenError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), nodes = nodes.len(), "sensor definitions written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(name: &str) -> Node {
        Node {
            name: name.to_string(),
        }
    }

    #[test]
    fn empty_node_list_is_header_only() {
        assert_eq!(render(&[]), HEADER);
    }

    #[test]
    fn per_node_block_names_its_topic() {
        let doc = render(&[node("alpha"), node("beta")]);
        assert!(doc.contains("state_topic: \"vps-monitoring/alpha\""));
        assert!(doc.contains("state_topic: \"vps-monitoring/beta\""));
        assert!(doc.contains("# alpha\n"));
        assert!(doc.contains("# beta\n"));
    }

    #[test]
    fn nine_sensors_per_node() {
        let doc = render(&[node("db")]);
        assert_eq!(doc.matches("- name: \"Lookout: db ").count(), 9);
        assert!(doc.contains("\"Lookout: db Last Check Time\""));
        assert!(doc.contains("\"Lookout: db Login Records\""));
        assert!(doc.contains("\"Lookout: db Connectivity\""));
    }

    #[test]
    fn login_records_carries_attribute_template() {
        let doc = render(&[node("db")]);
        assert!(doc.contains("json_attributes_topic: \"vps-monitoring/db\""));
        assert!(doc.contains("{{ {\"login_records\": ns.items, \"connectivity\": conn} | tojson }}"));
    }

    #[test]
    fn interconnect_pair_indexes_peer_payload() {
        let doc = render(&[node("alpha"), node("beta")]);
        assert!(doc.contains("\"Interconnect Lookout: alpha to beta (TCP)\""));
        assert!(doc.contains("\"Interconnect Lookout: alpha to beta (ICMP)\""));
        assert!(doc.contains("{{ value_json.connectivity.beta.tcp[0].status }}"));
        assert!(doc.contains("{{ value_json.connectivity.alpha.icmp[0].status }}"));
    }

    #[test]
    fn single_node_has_no_interconnect_sensors() {
        let doc = render(&[node("solo")]);
        assert!(!doc.contains("Interconnect"));
    }

    #[test]
    fn interconnect_count_matches_ordered_pairs() {
        let nodes = [node("a"), node("b"), node("c")];
        let doc = render(&nodes);
        // 3 nodes -> 6 ordered pairs -> 6 TCP + 6 ICMP sensors.
        assert_eq!(doc.matches("- name: \"Interconnect Lookout: ").count(), 12);
        assert!(!doc.contains("Interconnect Lookout: a to a "));
        assert!(!doc.contains("Interconnect Lookout: b to b "));
        assert!(!doc.contains("Interconnect Lookout: c to c "));
    }
}
