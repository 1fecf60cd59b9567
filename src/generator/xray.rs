//! Synthesis of xray outbound configuration from a vmess record

use std::collections::BTreeMap;

use log::debug;

use crate::models::network::{HttpMasquerade, Transport};
use crate::models::xray::{
    GrpcConfig, HeaderType, HttpConfig, HttpRequestHeader, HttpRequestHeaders, HttpUpgradeConfig,
    InboundDetourConfig, KcpConfig, OutboundDetourConfig, QuicConfig, SplitHttpConfig,
    StreamConfig, TcpConfig, TcpHeader, TlsConfig, VMessOutboundConfig, VMessServer, VMessUser,
    WebSocketConfig,
};
use crate::models::{Vmess, VMESS_PROTOCOL};
use crate::settings::OutboundSettings;
use crate::SynthesisError;

const GRPC_INITIAL_WINDOWS_SIZE: i32 = 65536;
const GRPC_HEALTH_CHECK_TIMEOUT: i32 = 20;
const GRPC_IDLE_TIMEOUT: i32 = 60;

/// An outbound together with the record copy it was built from, holding any
/// defaults filled in during synthesis.
#[derive(Debug, Clone)]
pub struct Synthesized {
    pub outbound: OutboundDetourConfig,
    pub record: Vmess,
}

/// Build the outbound for `node` without touching it.
pub fn build_outbound_with(
    node: &Vmess,
    settings: &OutboundSettings,
) -> Result<Synthesized, SynthesisError> {
    let mut record = node.clone();
    debug!(
        "Building vmess outbound for {}:{} over {:?}",
        record.address, record.port, record.network
    );

    let mut stream = StreamConfig {
        network: (!record.network.is_empty()).then(|| record.network.clone()),
        security: record.tls.clone(),
        ..Default::default()
    };
    apply_transport(&mut stream, record.transport(), &settings.user_agent);

    if record.tls == "tls" {
        if record.fingerprint.is_empty() {
            record.fingerprint = settings.default_fingerprint.clone();
        }
        stream.tls_settings = Some(TlsConfig {
            allow_insecure: settings.allow_insecure,
            server_name: record.server_name().to_string(),
            // Only a single ALPN entry is carried
            alpn: (!record.alpn.is_empty()).then(|| vec![record.alpn.clone()]),
            fingerprint: record.fingerprint.clone(),
        });
    }

    let vnext = serde_json::to_value(vnext_settings(&record)?)?;

    Ok(Synthesized {
        outbound: OutboundDetourConfig {
            tag: settings.tag.clone(),
            protocol: VMESS_PROTOCOL.to_string(),
            settings: Some(vnext),
            stream_settings: Some(stream),
        },
        record,
    })
}

/// Build the outbound for `node` with default settings.
///
/// When TLS is `tls` and the record has no fingerprint, the default
/// fingerprint is written back into `node`. No other field is changed.
pub fn build_outbound(
    node: &mut Vmess,
    allow_insecure: bool,
) -> Result<OutboundDetourConfig, SynthesisError> {
    let Synthesized { outbound, record } =
        build_outbound_with(node, &OutboundSettings::with_insecure(allow_insecure))?;
    node.fingerprint = record.fingerprint;
    Ok(outbound)
}

/// Share links only describe outbounds; there is no inbound to build.
pub fn build_inbound(_node: &Vmess) -> Result<Option<InboundDetourConfig>, SynthesisError> {
    Ok(None)
}

fn apply_transport(stream: &mut StreamConfig, transport: Transport, user_agent: &str) {
    match transport {
        Transport::Tcp { masquerade } => {
            let header = match masquerade {
                None => TcpHeader::None,
                Some(HttpMasquerade { paths, hosts }) => TcpHeader::Http {
                    request: HttpRequestHeader {
                        path: paths,
                        headers: HttpRequestHeaders {
                            host: hosts,
                            user_agent: user_agent.to_string(),
                        },
                    },
                },
            };
            stream.tcp_settings = Some(TcpConfig { header });
        }
        Transport::Kcp { header } => {
            stream.kcp_settings = Some(KcpConfig {
                header: HeaderType { kind: header },
            });
        }
        Transport::WebSocket { path, host } => {
            let headers = BTreeMap::from([
                ("Host".to_string(), host),
                ("User-Agent".to_string(), user_agent.to_string()),
            ]);
            stream.ws_settings = Some(WebSocketConfig { path, headers });
        }
        Transport::Http { path, hosts } => {
            stream.http_settings = Some(HttpConfig { path, host: hosts });
        }
        Transport::HttpUpgrade { host, path } => {
            stream.httpupgrade_settings = Some(HttpUpgradeConfig { host, path });
        }
        Transport::SplitHttp { host, path } => {
            stream.splithttp_settings = Some(SplitHttpConfig { host, path });
        }
        Transport::Grpc {
            service_name,
            authority,
            multi_mode,
        } => {
            stream.grpc_settings = Some(GrpcConfig {
                service_name,
                authority,
                multi_mode,
                idle_timeout: GRPC_IDLE_TIMEOUT,
                health_check_timeout: GRPC_HEALTH_CHECK_TIMEOUT,
                permit_without_stream: false,
                initial_windows_size: GRPC_INITIAL_WINDOWS_SIZE,
            });
        }
        Transport::Quic {
            header,
            security,
            key,
        } => {
            stream.quic_settings = Some(QuicConfig {
                header: HeaderType { kind: header },
                security,
                key,
            });
        }
        Transport::Other => {}
    }
}

fn vnext_settings(node: &Vmess) -> Result<VMessOutboundConfig, SynthesisError> {
    let port = node
        .port
        .trim()
        .parse::<u16>()
        .map_err(|_| SynthesisError::InvalidPort(node.port.clone()))?;
    let alter_id = match node.aid.trim() {
        "" => 0,
        aid => aid
            .parse::<u32>()
            .map_err(|_| SynthesisError::InvalidAlterId(node.aid.clone()))?,
    };
    let security = if node.security.is_empty() {
        "auto".to_string()
    } else {
        node.security.clone()
    };

    Ok(VMessOutboundConfig {
        vnext: vec![VMessServer {
            address: node.address.clone(),
            port,
            users: vec![VMessUser {
                id: node.id.clone(),
                alter_id,
                security,
            }],
        }],
    })
}
