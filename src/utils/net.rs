//! Address helpers shared by the link parsers

use std::net::Ipv6Addr;

use crate::ParseError;

/// True if `address` is a bare IPv6 literal (no brackets).
pub fn is_ipv6(address: &str) -> bool {
    address.parse::<Ipv6Addr>().is_ok()
}

/// Wraps a bare IPv6 literal in brackets. Anything else, including an
/// already bracketed literal, is returned unchanged.
pub fn bracket_ipv6(address: String) -> String {
    if is_ipv6(&address) {
        format!("[{}]", address)
    } else {
        address
    }
}

fn split_error(input: &str, reason: &'static str) -> ParseError {
    ParseError::HostPortSplit {
        input: input.to_string(),
        reason,
    }
}

/// Splits `host:port` or `[host]:port` into host and port.
///
/// Brackets are removed from the host. The port is returned as text and may
/// be empty when the input ends with a bare colon.
pub fn split_host_port(input: &str) -> Result<(String, String), ParseError> {
    let (host, port) = if let Some(rest) = input.strip_prefix('[') {
        let end = rest
            .find(']')
            .ok_or_else(|| split_error(input, "missing ']' in address"))?;
        let after = &rest[end + 1..];
        let port = after
            .strip_prefix(':')
            .ok_or_else(|| split_error(input, "missing port in address"))?;
        let host = &rest[..end];
        if host.contains('[') || host.contains(']') {
            return Err(split_error(input, "unexpected '[' in address"));
        }
        (host, port)
    } else {
        let (host, port) = input
            .rsplit_once(':')
            .ok_or_else(|| split_error(input, "missing port in address"))?;
        if host.contains(':') {
            return Err(split_error(input, "too many colons in address"));
        }
        if host.contains('[') || host.contains(']') {
            return Err(split_error(input, "unexpected '[' in address"));
        }
        (host, port)
    };

    if port.contains('[') || port.contains(']') {
        return Err(split_error(input, "unexpected ']' in address"));
    }

    Ok((host.to_string(), port.to_string()))
}
