//! Canonical vmess record
//!
//! A [`Vmess`] holds one endpoint exactly as it was decoded from a share
//! link. Several fields are overloaded by network kind:
//!
//! | network | `path` | `host` |
//! |---|---|---|
//! | tcp (http header) | request paths, comma separated | `Host` header values, comma separated |
//! | ws, h2, httpupgrade, splithttp | URL path | HTTP host |
//! | grpc | service name | authority |
//! | kcp | seed | - |
//! | quic | key material | security mode |
//!
//! [`Vmess::transport`] resolves the overload into a [`Transport`].

use crate::generator::{self, Details};
use crate::models::network::{HttpMasquerade, Transport};
use crate::models::xray::{InboundDetourConfig, OutboundDetourConfig};
use crate::models::{GeneralConfig, Protocol};
use crate::parser::explode_vmess;
use crate::utils::string::split_list;
use crate::{ParseError, SynthesisError};

/// Scheme prefix every vmess share link starts with.
pub const VMESS_SCHEME: &str = "vmess://";

/// Protocol name used in summaries and engine configuration.
pub const VMESS_PROTOCOL: &str = "vmess";

/// A vmess endpoint decoded from a share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vmess {
    pub remark: String,
    /// Hostname or IP literal. IPv6 literals are bracketed.
    pub address: String,
    /// Port as it appeared in the link.
    pub port: String,
    /// User UUID.
    pub id: String,
    /// Legacy alter id, as text.
    pub aid: String,
    /// Cipher name (`auto`, `aes-128-gcm`, ...).
    pub security: String,
    pub network: String,
    /// Header or obfuscation type; meaning depends on `network`.
    pub header_type: String,
    pub path: String,
    pub host: String,
    /// TLS mode: empty, `tls`, or another engine security mode.
    pub tls: String,
    pub sni: String,
    /// Comma joined ALPN list.
    pub alpn: String,
    pub fingerprint: String,
    /// The link this record was parsed from, verbatim.
    pub orig_link: String,
}

impl Vmess {
    /// True when TLS is enabled with some mode other than the literal `none`.
    pub fn has_tls(&self) -> bool {
        !self.tls.is_empty() && self.tls != "none"
    }

    /// Server name to present: the explicit SNI, else the host field.
    pub fn server_name(&self) -> &str {
        if self.sni.is_empty() {
            &self.host
        } else {
            &self.sni
        }
    }

    /// Apply the path default shared by every decoding: HTTP-like transports
    /// get `/` when no path was given.
    pub(crate) fn apply_path_default(&mut self) {
        let http_like =
            self.header_type == "http" || self.network == "ws" || self.network == "h2";
        if http_like && self.path.is_empty() {
            self.path = "/".to_string();
        }
    }

    /// Interpret the overloaded `path`/`host`/`header_type` fields for the
    /// record's network kind.
    pub fn transport(&self) -> Transport {
        match self.network.as_str() {
            "tcp" => {
                let masquerade = if self.header_type.is_empty() || self.header_type == "none" {
                    None
                } else {
                    Some(HttpMasquerade {
                        paths: split_list(&self.path),
                        hosts: split_list(&self.host),
                    })
                };
                Transport::Tcp { masquerade }
            }
            "kcp" => Transport::Kcp {
                header: self.header_type.clone(),
            },
            "ws" => Transport::WebSocket {
                path: self.path.clone(),
                host: self.host.clone(),
            },
            "h2" | "http" => Transport::Http {
                path: self.path.clone(),
                hosts: (!self.host.is_empty()).then(|| split_list(&self.host)),
            },
            "httpupgrade" => Transport::HttpUpgrade {
                host: self.host.clone(),
                path: self.path.clone(),
            },
            "splithttp" => Transport::SplitHttp {
                host: self.host.clone(),
                path: self.path.clone(),
            },
            "grpc" => Transport::Grpc {
                service_name: self
                    .path
                    .strip_prefix('/')
                    .unwrap_or(&self.path)
                    .to_string(),
                authority: self.host.clone(),
                multi_mode: self.header_type != "gun",
            },
            "quic" => Transport::Quic {
                header: if self.header_type.is_empty() {
                    "none".to_string()
                } else {
                    self.header_type.clone()
                },
                security: self.host.clone(),
                key: self.path.clone(),
            },
            _ => Transport::Other,
        }
    }
}

impl Protocol for Vmess {
    fn name(&self) -> &'static str {
        VMESS_PROTOCOL
    }

    fn parse(link: &str) -> Result<Self, ParseError> {
        explode_vmess(link)
    }

    fn details(&self) -> Details {
        generator::vmess_details(self)
    }

    fn to_general_config(&self) -> GeneralConfig {
        generator::vmess_to_general_config(self)
    }

    fn build_outbound(
        &mut self,
        allow_insecure: bool,
    ) -> Result<OutboundDetourConfig, SynthesisError> {
        generator::build_outbound(self, allow_insecure)
    }

    fn build_inbound(&self) -> Result<Option<InboundDetourConfig>, SynthesisError> {
        generator::build_inbound(self)
    }
}
