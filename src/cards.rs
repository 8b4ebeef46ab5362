//! Dashboard-card document generation (`cards.yaml`).
//!
//! Emits a Lovelace sections view: one grid per node with its status
//! entities, an interconnect entity list when other nodes exist, and
//! two markdown cards whose Jinja content Home Assistant evaluates
//! against the node's login-records sensor. The Jinja fragments are
//! opaque here and are emitted verbatim, whitespace quirks included.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Node;
use crate::error::ConfgenError;
use crate::template::fill;

const HEADER: &str = r#"  - type: sections
    max_columns: 4
    icon: mdi:lan-pending
    path: vps
    title: VPS
    sections:
"#;

const NODE_GRID: &str = r#"      - type: grid
        cards:
          - type: heading
            heading: $display
            heading_style: title
          - type: entities
            entities:
              - entity: sensor.lookout_$node_disk_usage
                name: Disk usage
                secondary_info: last-changed
              - entity: sensor.lookout_$node_last_check_duration
                secondary_info: last-updated
                icon: mdi:progress-clock
                name: Last Check
              - entity: sensor.lookout_$node_hostname
                icon: mdi:badge-account-horizontal-outline
                name: Hostname
"#;

const INTERCONNECT_HEADER: &str = "          - type: entities\n            entities:\n";

const INTERCONNECT_ICMP: &str = r#"              - entity: sensor.interconnect_lookout_$node_to_$peer_icmp
                name: $peer_display (ICMP)
                secondary_info: last-changed
"#;

const INTERCONNECT_TCP: &str = r#"              - entity: sensor.interconnect_lookout_$node_to_$peer_tcp
                name: $peer_display (TCP)
                secondary_info: last-changed
"#;

const CONNECTIVITY_CARD: &str = r#"          - type: markdown
            title: Connectivity ($display)
            content: >-
              {% set conn = state_attr('sensor.lookout_$node_login_records', 'connectivity') or %{} %}
              {% if conn %}
              {% for host, checks in conn.items() %}
              **{{ host | trim }}**
                {%- if 'http' in checks %}
              
                  - HTTP:
                    {%- for test in checks.http %}
                      {{ '✅ ' ~ test.code if test.status and test.code < 400 else '❌ DOWN' }}{{ ',' if not loop.last else '' }}
                    {%- endfor %}
                {%- endif %}
                {%- if 'icmp' in checks %}
              
                  - ICMP:
                    {%- for test in checks.icmp %}
                      {{ '✅ OK' if test.status else '❌ FAIL' }}{{ ',' if not loop.last else '' }}
                    {%- endfor %}
                {%- endif %}
                {%- if 'tcp' in checks %}
              
                  - TCP:
                    {%- for test in checks.tcp %}
                      {{ test.port }} {{ '✅' if test.status else '❌' }}{{ ',' if not loop.last else '' }}
                    {%- endfor %}
                {%- endif %}
              {% endfor %}
              {% else %}
              No connectivity data available.
              {% endif %}
"#;

const LOGIN_CARD: &str = r#"          - type: markdown
            title: Login Records ($display)
            content: >-
              {% set logins = state_attr('sensor.lookout_$node_login_records', 'login_records') or [] %}
              {% if logins %}
              **Recent logins (up to 5):**
              {% set count = 0 %}
              {% for l in logins | sort(attribute='login_time', reverse=True) %}
                {% if count < 5 %}
              - {{ l.username }} ({{ l.ip or 'local' }}) — {{ l.login_time }} → {{ l.logout_time }}
                  {% set count = count + 1 %}
                {% endif %}
              {% endfor %}
              {% else %}
              No login data available.
              {% endif %}
"#;

/// Render the full dashboard-card document for `nodes`, in input order.
pub fn render(nodes: &[Node]) -> String {
    let mut doc = String::from(HEADER);

    for node in nodes {
        let display = node.display_name();
        doc.push_str(&fill(
            NODE_GRID,
            &[("node", node.name.as_str()), ("display", display.as_str())],
        ));

        // One entity list covering every other node, ICMP row then TCP
        // row per peer. Skipped entirely for a single-node config.
        let peers: Vec<&Node> = nodes.iter().filter(|other| other.name != node.name).collect();
        if !peers.is_empty() {
            doc.push_str(INTERCONNECT_HEADER);
            for peer in peers {
                let peer_display = peer.display_name();
                let pairs = [
                    ("node", node.name.as_str()),
                    ("peer", peer.name.as_str()),
                    ("peer_display", peer_display.as_str()),
                ];
                doc.push_str(&fill(INTERCONNECT_ICMP, &pairs));
                doc.push_str(&fill(INTERCONNECT_TCP, &pairs));
            }
        }

        let pairs = [("node", node.name.as_str()), ("display", display.as_str())];
        doc.push_str(&fill(CONNECTIVITY_CARD, &pairs));
        doc.push_str(&fill(LOGIN_CARD, &pairs));
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
    info!(path = %path.display(), nodes = nodes.len(), "dashboard cards written");
    Ok(())
}
