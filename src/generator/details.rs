//! Human-readable listing of a record

use crate::models::{Vmess, VMESS_PROTOCOL};
use crate::utils::string::or_none;

/// Ordered `(label, value)` pairs describing one endpoint.
pub type Details = Vec<(&'static str, String)>;

/// List a record's fields for display.
///
/// The order is fixed: identity and endpoint first, then transport-specific
/// pairs, then TLS pairs when TLS is enabled.
pub fn vmess_details(node: &Vmess) -> Details {
    let mut result: Details = vec![
        ("Protocol", VMESS_PROTOCOL.to_string()),
        ("Remark", node.remark.clone()),
        ("Network", node.network.clone()),
        ("Address", node.address.clone()),
        ("Port", node.port.clone()),
        ("UUID", node.id.clone()),
    ];

    let http_like = node.header_type == "http"
        || matches!(node.network.as_str(), "httpupgrade" | "ws" | "h2");

    if http_like {
        result.push(("Type", or_none(&node.header_type)));
        result.push(("Host", or_none(&node.host)));
        result.push(("Path", or_none(&node.path)));
    } else if node.network == "kcp" {
        result.push(("KCP Seed", node.path.clone()));
    } else if node.network == "grpc" {
        result.push(("ServiceName", node.path.clone()));
        result.push(("Authority", or_none(&node.host)));
    }

    if node.has_tls() {
        result.push(("TLS", node.tls.clone()));
        result.push(("SNI", or_none(node.server_name())));
        result.push(("ALPN", or_none(&node.alpn)));
        result.push(("Fingerprint", or_none(&node.fingerprint)));
    }

    result
}

/// Render details as one `label: value` line per pair.
pub fn details_to_str(details: &[(&'static str, String)]) -> String {
    details
        .iter()
        .map(|(label, value)| format!("{}: {}\n", label, value))
        .collect()
}
