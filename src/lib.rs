pub mod error;
pub mod generator;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

// Re-export the main record types for easier access
pub use error::{ParseError, SynthesisError};
pub use models::{GeneralConfig, Protocol, Transport, Vmess};
pub use parser::explode_vmess;
pub use settings::OutboundSettings;
