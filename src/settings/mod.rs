//! Options that shape the synthesized outbound

use serde::{Deserialize, Serialize};

/// Browser user agent sent by HTTP-like transports.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/92.0.4515.131 Safari/537.36";

fn default_tag() -> String {
    "proxy".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_fingerprint() -> String {
    "chrome".to_string()
}

/// Outbound synthesis settings.
///
/// Every field has a default, so an empty TOML document is valid:
///
/// ```toml
/// tag = "proxy"
/// allow_insecure = false
/// user_agent = "Mozilla/5.0 ..."
/// default_fingerprint = "chrome"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundSettings {
    /// Tag of the generated outbound.
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Skip certificate verification in the TLS block.
    pub allow_insecure: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Client hello fingerprint used when TLS is on and the link names none.
    #[serde(default = "default_fingerprint")]
    pub default_fingerprint: String,
}

impl Default for OutboundSettings {
    fn default() -> Self {
        OutboundSettings {
            tag: default_tag(),
            allow_insecure: false,
            user_agent: default_user_agent(),
            default_fingerprint: default_fingerprint(),
        }
    }
}

impl OutboundSettings {
    /// Default settings with only the insecure flag changed.
    pub fn with_insecure(allow_insecure: bool) -> Self {
        OutboundSettings {
            allow_insecure,
            ..Default::default()
        }
    }

    /// Load settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
