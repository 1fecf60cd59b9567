use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use sharelink::generator::build_outbound_with;
use sharelink::{explode_vmess, OutboundSettings, Protocol};

fn json_link(json: &str) -> String {
    format!("vmess://{}", STANDARD.encode(json))
}

#[cfg(test)]
mod outbound_tests {
    use super::*;

    #[test]
    fn test_full_outbound_json() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut node = explode_vmess(&json_link(
            r#"{"v":"2","ps":"n","add":"example.com","port":443,"id":"abc","aid":"0",
            "net":"ws","host":"cdn.example.com","path":"/ray","tls":"tls"}"#,
        ))
        .unwrap();

        let outbound = node.build_outbound(false).unwrap();
        let value = serde_json::to_value(&outbound).unwrap();

        assert_eq!(
            value,
            json!({
                "tag": "proxy",
                "protocol": "vmess",
                "settings": {
                    "vnext": [{
                        "address": "example.com",
                        "port": 443,
                        "users": [{ "id": "abc", "alterId": 0, "security": "auto" }]
                    }]
                },
                "streamSettings": {
                    "network": "ws",
                    "security": "tls",
                    "tlsSettings": {
                        "allowInsecure": false,
                        "serverName": "cdn.example.com",
                        "fingerprint": "chrome"
                    },
                    "wsSettings": {
                        "path": "/ray",
                        "headers": {
                            "Host": "cdn.example.com",
                            "User-Agent": sharelink::settings::DEFAULT_USER_AGENT
                        }
                    }
                }
            })
        );
        assert_eq!(node.fingerprint, "chrome");
    }

    #[test]
    fn test_grpc_gun_service_name() {
        let mut node = explode_vmess(&json_link(
            r#"{"add":"a.com","port":"443","id":"abc","net":"grpc","type":"gun","path":"/myservice"}"#,
        ))
        .unwrap();
        let stream = node.build_outbound(false).unwrap().stream_settings.unwrap();
        let grpc = stream.grpc_settings.unwrap();
        assert_eq!(grpc.service_name, "myservice");
        assert!(!grpc.multi_mode);
        assert!(stream.tls_settings.is_none());
    }

    #[test]
    fn test_sni_falls_back_to_host_and_insecure_passthrough() {
        let mut node = explode_vmess(&json_link(
            r#"{"add":"a.com","port":"443","id":"abc","net":"h2","host":"h.a.com","tls":"tls","alpn":"h2"}"#,
        ))
        .unwrap();
        let tls = node
            .build_outbound(true)
            .unwrap()
            .stream_settings
            .unwrap()
            .tls_settings
            .unwrap();
        assert_eq!(tls.server_name, "h.a.com");
        assert!(tls.allow_insecure);
        assert_eq!(tls.alpn, Some(vec!["h2".to_string()]));
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = OutboundSettings::from_toml(
            r#"
tag = "edge"
default_fingerprint = "randomized"
"#,
        )
        .unwrap();
        let node = explode_vmess(&json_link(
            r#"{"add":"a.com","port":"443","id":"abc","net":"tcp","tls":"tls"}"#,
        ))
        .unwrap();
        let synthesized = build_outbound_with(&node, &settings).unwrap();
        assert_eq!(synthesized.outbound.tag, "edge");
        assert_eq!(synthesized.record.fingerprint, "randomized");
        assert_eq!(node.fingerprint, "");
    }

    #[test]
    fn test_inbound_is_none() {
        let node = explode_vmess(&json_link(r#"{"add":"a.com","port":"443","id":"abc"}"#)).unwrap();
        assert!(node.build_inbound().unwrap().is_none());
    }
}
