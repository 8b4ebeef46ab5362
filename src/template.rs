//! Placeholder substitution for document templates.
//!
//! Template bodies are constant strings with `$name` slots. The bodies
//! also carry Jinja fragments (`{{ ... }}`, `{% ... %}`) destined for
//! the downstream consumers, which must pass through byte-for-byte, so
//! substitution is plain text replacement rather than a format string.

/// Replace each `$key` with its value.
///
/// Pairs are applied longest key first so a key that prefixes another
/// (`$peer` inside `$peer_display`) cannot clobber it.
pub fn fill(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut sorted = pairs.to_vec();
    sorted.sort_by_key(|&(key, _)| std::cmp::Reverse(key.len()));

    let mut out = template.to_string();
    for (key, value) in sorted {
        out = out.replace(&format!("${key}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_single_slot() {
        assert_eq!(fill("topic/$node", &[("node", "alpha")]), "topic/alpha");
    }

    #[test]
    fn longer_keys_win_over_their_prefixes() {
        let out = fill(
            "$peer_display pings $peer",
            &[("peer", "web-01"), ("peer_display", "Web 01")],
        );
        assert_eq!(out, "Web 01 pings web-01");
    }

    #[test]
    fn slot_embedded_in_identifier_is_expanded() {
        // Entity IDs concatenate the raw name with a fixed suffix.
        let out = fill("sensor.lookout_$node_disk_usage", &[("node", "db")]);
        assert_eq!(out, "sensor.lookout_db_disk_usage");
    }

    #[test]
    fn jinja_braces_pass_through_untouched() {
        let body = "value_template: \"{{ value_json.connectivity.$peer.tcp[0].status }}\"";
        let out = fill(body, &[("peer", "beta")]);
        assert_eq!(
            out,
            "value_template: \"{{ value_json.connectivity.beta.tcp[0].status }}\""
        );
    }
}
