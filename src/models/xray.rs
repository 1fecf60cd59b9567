//! Outbound configuration in the shape the xray engine reads.
//!
//! Field names follow the engine's JSON schema, which mixes camelCase and
//! snake_case keys.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// One entry of the engine's `outbounds` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundDetourConfig {
    pub tag: String,
    pub protocol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(rename = "streamSettings", skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamConfig>,
}

/// Placeholder for an engine inbound. Share links describe outbounds only,
/// so no protocol here ever builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundDetourConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub security: String,
    #[serde(rename = "tlsSettings", skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<TlsConfig>,
    #[serde(rename = "tcpSettings", skip_serializing_if = "Option::is_none")]
    pub tcp_settings: Option<TcpConfig>,
    #[serde(rename = "kcpSettings", skip_serializing_if = "Option::is_none")]
    pub kcp_settings: Option<KcpConfig>,
    #[serde(rename = "wsSettings", skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WebSocketConfig>,
    #[serde(rename = "httpSettings", skip_serializing_if = "Option::is_none")]
    pub http_settings: Option<HttpConfig>,
    #[serde(rename = "httpupgradeSettings", skip_serializing_if = "Option::is_none")]
    pub httpupgrade_settings: Option<HttpUpgradeConfig>,
    #[serde(rename = "splithttpSettings", skip_serializing_if = "Option::is_none")]
    pub splithttp_settings: Option<SplitHttpConfig>,
    #[serde(rename = "grpcSettings", skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<GrpcConfig>,
    #[serde(rename = "quicSettings", skip_serializing_if = "Option::is_none")]
    pub quic_settings: Option<QuicConfig>,
}

/// `{ "type": ... }` header block used by kcp and quic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderType {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TcpHeader {
    None,
    Http { request: HttpRequestHeader },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpRequestHeader {
    pub path: Vec<String>,
    pub headers: HttpRequestHeaders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpRequestHeaders {
    #[serde(rename = "Host")]
    pub host: Vec<String>,
    #[serde(rename = "User-Agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcpConfig {
    pub header: TcpHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KcpConfig {
    pub header: HeaderType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebSocketConfig {
    pub path: String,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpConfig {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpUpgradeConfig {
    pub host: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitHttpConfig {
    pub host: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrpcConfig {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub authority: String,
    #[serde(rename = "multiMode")]
    pub multi_mode: bool,
    /// Seconds.
    pub idle_timeout: i32,
    /// Seconds.
    pub health_check_timeout: i32,
    pub permit_without_stream: bool,
    pub initial_windows_size: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuicConfig {
    pub header: HeaderType,
    pub security: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TlsConfig {
    #[serde(rename = "allowInsecure")]
    pub allow_insecure: bool,
    #[serde(rename = "serverName")]
    pub server_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    pub fingerprint: String,
}

/// `settings` payload of a vmess outbound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VMessOutboundConfig {
    pub vnext: Vec<VMessServer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VMessServer {
    pub address: String,
    pub port: u16,
    pub users: Vec<VMessUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VMessUser {
    pub id: String,
    #[serde(rename = "alterId")]
    pub alter_id: u32,
    pub security: String,
}
