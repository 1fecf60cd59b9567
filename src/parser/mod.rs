pub mod explodes;

pub use explodes::explode_vmess;
