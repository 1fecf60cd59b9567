pub mod details;
pub mod general;
pub mod xray;

pub use details::{details_to_str, vmess_details, Details};
pub use general::vmess_to_general_config;
pub use xray::{build_inbound, build_outbound, build_outbound_with, Synthesized};
