pub mod api;
pub mod rpc;
pub mod ssl;

#[derive(Default, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClientSSLConfig {
    pub ssl_crt_path: String,
    pub ssl_key_path: String,
}

impl ClientSSLConfig {
    /// Paths of the full node's private RPC certificate inside a chia `ssl` directory.
    pub fn full_node(ssl_path: &str) -> Self {
        let base = ssl_path.trim_end_matches('/');
        Self {
            ssl_crt_path: format!("{base}/full_node/private_full_node.crt"),
            ssl_key_path: format!("{base}/full_node/private_full_node.key"),
        }
    }
}

#[test]
fn test_full_node_cert_paths() {
    let config = ClientSSLConfig::full_node("/root/.chia/mainnet/config/ssl/");
    assert_eq!(
        config.ssl_crt_path,
        "/root/.chia/mainnet/config/ssl/full_node/private_full_node.crt"
    );
    assert_eq!(
        config.ssl_key_path,
        "/root/.chia/mainnet/config/ssl/full_node/private_full_node.key"
    );
}
