use crate::models::{GeneralConfig, Vmess, VMESS_PROTOCOL};

/// Project a record onto the cross-protocol summary.
pub fn vmess_to_general_config(node: &Vmess) -> GeneralConfig {
    GeneralConfig {
        protocol: VMESS_PROTOCOL.to_string(),
        address: node.address.clone(),
        aid: node.aid.clone(),
        host: node.host.clone(),
        id: node.id.clone(),
        network: node.network.clone(),
        path: node.path.clone(),
        port: node.port.clone(),
        remark: node.remark.clone(),
        tls: if node.tls.is_empty() {
            "none".to_string()
        } else {
            node.tls.clone()
        },
        sni: node.sni.clone(),
        alpn: node.alpn.clone(),
        tls_fingerprint: node.fingerprint.clone(),
        header_type: node.header_type.clone(),
        orig_link: node.orig_link.clone(),
    }
}
