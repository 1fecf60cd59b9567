//! Per-network view of a record's transport fields

/// HTTP request masquerade carried by a tcp transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMasquerade {
    pub paths: Vec<String>,
    pub hosts: Vec<String>,
}

/// Transport settings after the network kind has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Tcp {
        masquerade: Option<HttpMasquerade>,
    },
    Kcp {
        header: String,
    },
    WebSocket {
        path: String,
        host: String,
    },
    /// HTTP/2, selected by either `h2` or `http`.
    Http {
        path: String,
        hosts: Option<Vec<String>>,
    },
    HttpUpgrade {
        host: String,
        path: String,
    },
    SplitHttp {
        host: String,
        path: String,
    },
    Grpc {
        service_name: String,
        authority: String,
        multi_mode: bool,
    },
    Quic {
        header: String,
        security: String,
        key: String,
    },
    /// Any network kind without transport-specific settings.
    Other,
}
