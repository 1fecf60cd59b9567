pub mod vmess;

pub use vmess::{explode_shadowrocket, explode_vmess, explode_vmess_json};
