use crate::generator::details::{details_to_str, Details};
use crate::models::xray::{InboundDetourConfig, OutboundDetourConfig};
use crate::models::GeneralConfig;
use crate::{ParseError, SynthesisError};

/// Operations every share-link protocol provides.
pub trait Protocol: Sized {
    /// Protocol name, also used as the engine protocol tag.
    fn name(&self) -> &'static str;

    /// Parse a share link.
    fn parse(link: &str) -> Result<Self, ParseError>;

    /// Ordered display pairs.
    fn details(&self) -> Details;

    /// Display pairs rendered as `label: value` lines.
    fn details_str(&self) -> String {
        details_to_str(&self.details())
    }

    fn to_general_config(&self) -> GeneralConfig;

    /// Build the engine outbound. Implementations may back-fill defaults into
    /// `self`.
    fn build_outbound(&mut self, allow_insecure: bool)
        -> Result<OutboundDetourConfig, SynthesisError>;

    /// Build the engine inbound, if the protocol has one.
    fn build_inbound(&self) -> Result<Option<InboundDetourConfig>, SynthesisError>;
}
