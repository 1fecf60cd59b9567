use std::fmt;

use log::{debug, trace, warn};
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use url::Url;

use crate::models::{Vmess, VMESS_SCHEME};
use crate::utils::base64::base64_decode_string;
use crate::utils::net::{bracket_ipv6, split_host_port};
use crate::utils::url::{query_get, url_decode};
use crate::ParseError;

type Decoder = fn(&str) -> Result<Vmess, ParseError>;

/// Link encodings, in the order they are tried.
const VMESS_DECODERS: [(&str, Decoder); 2] = [
    ("json", explode_vmess_json),
    ("shadowrocket", explode_shadowrocket),
];

/// Parse a vmess share link into a [`Vmess`] record.
///
/// The base64 JSON encoding is tried first and the Shadowrocket URI encoding
/// second. When both fail the Shadowrocket error is returned. The link must
/// start with `vmess://` exactly; surrounding whitespace is not stripped.
pub fn explode_vmess(link: &str) -> Result<Vmess, ParseError> {
    if !link.starts_with(VMESS_SCHEME) {
        return Err(ParseError::UnrecognizedScheme(link.to_string()));
    }

    let mut result = Err(ParseError::UnrecognizedScheme(link.to_string()));
    for (name, decode) in VMESS_DECODERS {
        result = decode(link);
        match &result {
            Ok(_) => break,
            Err(e) if e.is_decode_error() => {
                debug!("vmess {} payload did not decode: {}", name, e)
            }
            Err(e) => debug!("vmess {} decoding failed: {}", name, e),
        }
    }

    let mut node = result?;
    node.orig_link = link.to_string();
    node.apply_path_default();
    Ok(node)
}

// `v` and `aid` are untyped in the wild: any scalar is kept as text, while
// objects and arrays are skipped as if the field were absent
fn deserialize_loose_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LooseScalarVisitor;

    impl<'de> Visitor<'de> for LooseScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("any JSON value")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}
            Ok(None)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(None)
        }
    }

    deserializer.deserialize_any(LooseScalarVisitor)
}

/// Payload of a base64 JSON link (the v2rayN encoding).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VmessJson {
    #[serde(deserialize_with = "deserialize_loose_scalar")]
    v: Option<String>,
    ps: Option<String>,
    add: Option<String>,
    #[serde(deserialize_with = "deserialize_loose_scalar")]
    port: Option<String>,
    id: Option<String>,
    #[serde(deserialize_with = "deserialize_loose_scalar")]
    aid: Option<String>,
    scy: Option<String>,
    net: Option<String>,
    #[serde(rename = "type")]
    header_type: Option<String>,
    host: Option<String>,
    path: Option<String>,
    #[serde(rename = "serviceName")]
    service_name: Option<String>,
    tls: Option<String>,
    sni: Option<String>,
    alpn: Option<String>,
    fp: Option<String>,
}

impl From<VmessJson> for Vmess {
    fn from(json: VmessJson) -> Self {
        Vmess {
            remark: json.ps.unwrap_or_default(),
            address: bracket_ipv6(json.add.unwrap_or_default()),
            port: json.port.unwrap_or_default(),
            id: json.id.unwrap_or_default(),
            aid: json.aid.unwrap_or_default(),
            security: json.scy.unwrap_or_default(),
            network: json.net.unwrap_or_default(),
            header_type: json.header_type.unwrap_or_default(),
            path: json.path.or(json.service_name).unwrap_or_default(),
            host: json.host.unwrap_or_default(),
            tls: json.tls.unwrap_or_default(),
            sni: json.sni.unwrap_or_default(),
            alpn: json.alpn.unwrap_or_default(),
            fingerprint: json.fp.unwrap_or_default(),
            orig_link: String::new(),
        }
    }
}

/// Parse `vmess://BASE64(json)`.
pub fn explode_vmess_json(link: &str) -> Result<Vmess, ParseError> {
    let encoded = link.strip_prefix(VMESS_SCHEME).unwrap_or(link);
    let decoded = base64_decode_string(encoded)?;
    trace!("Decoded vmess JSON: {}", decoded);

    let json: VmessJson = serde_json::from_str(&decoded)?;
    Ok(json.into())
}

/// Parse the Shadowrocket encoding:
/// `vmess://BASE64(security:id@address:port)?remarks=..&obfs=..&tls=1`
pub fn explode_shadowrocket(link: &str) -> Result<Vmess, ParseError> {
    let uri = Url::parse(link)?;
    let decoded = base64_decode_string(uri.host_str().unwrap_or_default())?;
    trace!("Decoded vmess authority: {}", decoded);

    let (user_info, host_port) = decoded.rsplit_once('@').unwrap_or(("", decoded.as_str()));
    let (security, id) = user_info.split_once(':').unwrap_or((user_info, ""));
    let host_port = host_port.split(['/', '?', '#']).next().unwrap_or_default();
    let (address, port) = split_host_port(host_port)?;

    let mut node = Vmess {
        address: bracket_ipv6(address),
        port,
        id: url_decode(id),
        security: url_decode(security),
        // Shadowrocket links do not carry an alter id
        aid: "0".to_string(),
        ..Default::default()
    };

    let query = uri.query().unwrap_or_default();
    let param = |key: &str| query_get(query, key).filter(|v| !v.is_empty());

    if let Some(remarks) = param("remarks") {
        node.remark = remarks;
    }
    if let Some(path) = param("path") {
        node.path = path;
    }
    if param("tls").as_deref() == Some("1") {
        node.tls = "tls".to_string();
    }
    if let Some(obfs) = param("obfs") {
        match obfs.as_str() {
            "websocket" => {
                node.network = "ws".to_string();
                node.header_type = "none".to_string();
            }
            "none" => {
                node.network = "tcp".to_string();
                node.header_type = "none".to_string();
            }
            other => warn!("Unmapped vmess obfs value {:?}, leaving network unset", other),
        }
    }
    if let Some(obfs_param) = param("obfsParam") {
        node.host = obfs_param;
    }
    match param("peer") {
        Some(peer) => node.sni = peer,
        None if node.tls == "tls" => node.sni = node.host.clone(),
        None => {}
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::base64::{base64_encode, url_safe_base64_encode};

    fn json_link(json: &str) -> String {
        format!("vmess://{}", base64_encode(json))
    }

    fn rocket_link(authority: &str, query: &str) -> String {
        format!("vmess://{}?{}", url_safe_base64_encode(authority), query)
    }

    #[test]
    fn test_json_link_fields() {
        let link = json_link(
            r#"{"v":"2","ps":"node 1","add":"example.com","port":443,"id":"abc","aid":"0",
            "scy":"auto","net":"ws","type":"none","host":"cdn.example.com","path":"/x",
            "tls":"tls","sni":"sni.example.com","alpn":"h2,http/1.1","fp":"firefox"}"#,
        );
        let node = explode_vmess(&link).unwrap();
        assert_eq!(node.remark, "node 1");
        assert_eq!(node.address, "example.com");
        assert_eq!(node.port, "443");
        assert_eq!(node.id, "abc");
        assert_eq!(node.aid, "0");
        assert_eq!(node.security, "auto");
        assert_eq!(node.network, "ws");
        assert_eq!(node.header_type, "none");
        assert_eq!(node.host, "cdn.example.com");
        assert_eq!(node.path, "/x");
        assert_eq!(node.tls, "tls");
        assert_eq!(node.sni, "sni.example.com");
        assert_eq!(node.alpn, "h2,http/1.1");
        assert_eq!(node.fingerprint, "firefox");
        assert_eq!(node.orig_link, link);
    }

    #[test]
    fn test_json_link_absent_fields_stay_empty() {
        let node = explode_vmess(&json_link(r#"{"add":"1.2.3.4","port":"80","id":"abc"}"#)).unwrap();
        assert_eq!(node.aid, "");
        assert_eq!(node.network, "");
        assert_eq!(node.header_type, "");
        assert_eq!(node.path, "");
        assert_eq!(node.tls, "");
    }

    #[test]
    fn test_json_link_null_and_numeric_fields() {
        let node = explode_vmess(&json_link(
            r#"{"v":2,"add":"a.com","port":8080,"id":"abc","aid":64,"sni":null}"#,
        ))
        .unwrap();
        assert_eq!(node.port, "8080");
        assert_eq!(node.aid, "64");
        assert_eq!(node.sni, "");
    }

    #[test]
    fn test_json_link_host_is_kept_verbatim() {
        for version in ["1", "2"] {
            let json = format!(
                r#"{{"v":"{}","add":"a.com","port":"443","id":"abc","net":"tcp","host":"cdn.a.com;/ray"}}"#,
                version
            );
            let node = explode_vmess(&json_link(&json)).unwrap();
            assert_eq!(node.host, "cdn.a.com;/ray");
            assert_eq!(node.path, "");
        }
    }

    #[test]
    fn test_json_link_untyped_aid_and_version() {
        let node = explode_vmess(&json_link(
            r#"{"v":{"major":2},"add":"a.com","port":"443","id":"abc","aid":false}"#,
        ))
        .unwrap();
        assert_eq!(node.address, "a.com");
        assert_eq!(node.aid, "false");

        let node = explode_vmess(&json_link(
            r#"{"v":[2],"add":"a.com","port":"443","id":"abc","aid":true}"#,
        ))
        .unwrap();
        assert_eq!(node.aid, "true");
    }

    #[test]
    fn test_json_link_non_canonical_trailing_bits() {
        let canonical = base64_encode(r#"{"add":"a.com","port":"443","id":"ab"}"#);
        assert!(canonical.ends_with("ImFiIn0="));
        let flipped = canonical.replace("ImFiIn0=", "ImFiIn1");
        let node = explode_vmess(&format!("vmess://{}", flipped)).unwrap();
        assert_eq!(node.id, "ab");
    }

    #[test]
    fn test_json_link_service_name_alias() {
        let node = explode_vmess(&json_link(
            r#"{"add":"a.com","port":"443","id":"abc","net":"grpc","serviceName":"svc"}"#,
        ))
        .unwrap();
        assert_eq!(node.path, "svc");
    }

    #[test]
    fn test_json_link_ipv6_address() {
        let node = explode_vmess(&json_link(r#"{"add":"2001:db8::1","port":"443","id":"abc"}"#)).unwrap();
        assert_eq!(node.address, "[2001:db8::1]");

        let node = explode_vmess(&json_link(r#"{"add":"[2001:db8::1]","port":"443","id":"abc"}"#)).unwrap();
        assert_eq!(node.address, "[2001:db8::1]");
    }

    #[test]
    fn test_shadowrocket_link() {
        let link = rocket_link(
            "auto:cbb49358-44d1-482f-aa14-680773e5cc37@snappfood.ir:443",
            "remarks=sth&obfsParam=huhierg.com&path=/&obfs=websocket&tls=1&peer=gdfgreg.com&alterId=0",
        );
        let node = explode_vmess(&link).unwrap();
        assert_eq!(node.security, "auto");
        assert_eq!(node.id, "cbb49358-44d1-482f-aa14-680773e5cc37");
        assert_eq!(node.address, "snappfood.ir");
        assert_eq!(node.port, "443");
        assert_eq!(node.aid, "0");
        assert_eq!(node.remark, "sth");
        assert_eq!(node.network, "ws");
        assert_eq!(node.header_type, "none");
        assert_eq!(node.host, "huhierg.com");
        assert_eq!(node.path, "/");
        assert_eq!(node.tls, "tls");
        assert_eq!(node.sni, "gdfgreg.com");
        assert_eq!(node.orig_link, link);
    }

    #[test]
    fn test_shadowrocket_path_parameter() {
        let node = explode_vmess(&rocket_link(
            "auto:abc@example.com:443",
            "obfs=websocket&path=/ray",
        ))
        .unwrap();
        assert_eq!(node.network, "ws");
        assert_eq!(node.path, "/ray");

        let node = explode_vmess(&rocket_link("auto:abc@example.com:443", "obfs=none&path=/tcp")).unwrap();
        assert_eq!(node.network, "tcp");
        assert_eq!(node.path, "/tcp");
    }

    #[test]
    fn test_shadowrocket_sni_defaults_to_host() {
        let link = rocket_link(
            "auto:abc@example.com:443",
            "obfs=none&tls=1&peer=&obfsParam=cdn.example.com",
        );
        let node = explode_vmess(&link).unwrap();
        assert_eq!(node.network, "tcp");
        assert_eq!(node.header_type, "none");
        assert_eq!(node.tls, "tls");
        assert_eq!(node.host, "cdn.example.com");
        assert_eq!(node.sni, "cdn.example.com");
    }

    #[test]
    fn test_shadowrocket_unmapped_obfs_passes_through() {
        let node = explode_vmess(&rocket_link("auto:abc@example.com:443", "obfs=grpc")).unwrap();
        assert_eq!(node.network, "");
        assert_eq!(node.header_type, "");
        assert_eq!(node.sni, "");
    }

    #[test]
    fn test_shadowrocket_ipv6_address() {
        let node = explode_vmess(&rocket_link("auto:abc@[2001:db8::1]:443", "tls=0")).unwrap();
        assert_eq!(node.address, "[2001:db8::1]");
        assert_eq!(node.port, "443");
        assert_eq!(node.tls, "");
    }

    #[test]
    fn test_unrecognized_scheme() {
        assert!(matches!(
            explode_vmess("vless://abc@example.com:443"),
            Err(ParseError::UnrecognizedScheme(_))
        ));
        let padded = format!(" {}", json_link(r#"{"add":"a.com","port":"443","id":"abc"}"#));
        assert!(matches!(
            explode_vmess(&padded),
            Err(ParseError::UnrecognizedScheme(_))
        ));
    }

    #[test]
    fn test_both_formats_fail_returns_shadowrocket_error() {
        let err = explode_vmess(&rocket_link("auto:abc@example.com", "tls=1")).unwrap_err();
        assert!(matches!(err, ParseError::HostPortSplit { .. }));

        let err = explode_vmess("vmess://!!!").unwrap_err();
        assert!(!matches!(err, ParseError::UnrecognizedScheme(_)));
    }

    #[test]
    fn test_format_a_json_must_be_object() {
        let err = explode_vmess_json(&json_link(r#""just text""#)).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
