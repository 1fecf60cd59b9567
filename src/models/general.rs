use serde::Serialize;

/// Protocol-agnostic summary of an endpoint, used to compare and export
/// records of different protocols side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneralConfig {
    pub protocol: String,
    pub address: String,
    pub aid: String,
    pub host: String,
    pub id: String,
    pub network: String,
    pub path: String,
    pub port: String,
    pub remark: String,
    /// TLS mode, `none` when the record has no TLS.
    pub tls: String,
    pub sni: String,
    pub alpn: String,
    pub tls_fingerprint: String,
    #[serde(rename = "type")]
    pub header_type: String,
    pub orig_link: String,
}
