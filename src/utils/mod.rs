pub mod base64;
pub mod net;
pub mod string;
pub mod url;

// Re-export common utilities
pub use self::base64::base64_decode;
pub use self::net::{bracket_ipv6, split_host_port};
