pub mod full_node;

use crate::ssl::client_tls_config;
use crate::ClientSSLConfig;
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::str::FromStr;
use std::time::Duration;

pub fn get_url(host: &str, port: u16, request_uri: &str) -> String {
    format!("https://{host}:{port}/{request_uri}")
}

pub fn get_client(ssl_path: Option<&str>, timeout: u64) -> Result<Client, Error> {
    let builder = match ssl_path {
        Some(ssl_path) => ClientBuilder::new()
            .use_preconfigured_tls(client_tls_config(&ClientSSLConfig::full_node(ssl_path))?),
        None => ClientBuilder::new().danger_accept_invalid_certs(true),
    };
    builder
        .timeout(Duration::from_secs(timeout))
        .build()
        .map_err(|e| Error::new(ErrorKind::Other, format!("{e:?}")))
}

fn build_headers(additional_headers: &Option<HashMap<String, String>>) -> Result<HeaderMap, Error> {
    let mut header_map = HeaderMap::new();
    if let Some(m) = additional_headers {
        for (k, v) in m {
            header_map.insert(
                HeaderName::from_str(k).map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidData,
                        format!("Failed to Parse Header Name {k},\r\n {e}"),
                    )
                })?,
                HeaderValue::from_str(v).map_err(|e| {
                    Error::new(
                        ErrorKind::InvalidData,
                        format!("Failed to Parse Header value {v},\r\n {e}"),
                    )
                })?,
            );
        }
    }
    Ok(header_map)
}

/// Decodes an RPC body. The node answers `{"success": false, "error": ..}` with
/// status 200 when a lookup fails, so that case is turned into an error first.
pub fn parse_response<T>(body: &str) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_str(body).map_err(|e| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Failed to Parse Json {body},\r\n {e}"),
        )
    })?;
    if value.get("success").and_then(Value::as_bool) == Some(false) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown RPC error");
        let kind = if message.to_lowercase().contains("not found") {
            ErrorKind::NotFound
        } else {
            ErrorKind::Other
        };
        return Err(Error::new(kind, message.to_string()));
    }
    serde_json::from_value(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidData,
            format!("Failed to Parse Json {body},\r\n {e}"),
        )
    })
}

pub async fn post<T>(
    client: &Client,
    url: &str,
    data: &Map<String, Value>,
    additional_headers: &Option<HashMap<String, String>>,
) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    debug!("POST {url}");
    let resp = client
        .post(url)
        .headers(build_headers(additional_headers)?)
        .json(data)
        .send()
        .await
        .map_err(|e| Error::new(ErrorKind::ConnectionRefused, format!("{e:?}")))?;
    match resp.status() {
        reqwest::StatusCode::OK => {
            let body = resp
                .text()
                .await
                .map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;
            parse_response(&body)
        }
        status => Err(Error::new(
            ErrorKind::InvalidData,
            format!("Bad Status Code: {status:?}, for URL {url:?}"),
        )),
    }
}
