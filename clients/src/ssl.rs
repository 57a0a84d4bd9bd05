use crate::ClientSSLConfig;
use log::error;
use rustls::client::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::{Certificate, ClientConfig, DigitallySignedStruct, PrivateKey, ServerName};
use rustls_pemfile::{certs, read_one, Item};
use std::fs::File;
use std::io::{BufReader, Error, ErrorKind};
use std::iter;
use std::sync::Arc;
use std::time::SystemTime;

/// Full nodes serve RPC with a certificate signed by their own private CA, so the
/// server side is not verified; the node authenticates us by our client certificate.
pub struct NoCertificateVerification;

impl ServerCertVerifier for NoCertificateVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &Certificate,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &Certificate,
        _dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }
}

pub fn load_certs(filename: &str) -> Result<Vec<Certificate>, Error> {
    let mut reader = BufReader::new(File::open(filename)?);
    let certs = certs(&mut reader)?;
    if certs.is_empty() {
        return Err(Error::new(
            ErrorKind::NotFound,
            format!("No certificates found in {filename}"),
        ));
    }
    Ok(certs.into_iter().map(Certificate).collect())
}

pub fn load_private_key(filename: &str) -> Result<PrivateKey, Error> {
    let mut reader = BufReader::new(File::open(filename)?);
    for item in iter::from_fn(|| read_one(&mut reader).transpose()) {
        match item? {
            Item::RSAKey(key) | Item::PKCS8Key(key) | Item::ECKey(key) => {
                return Ok(PrivateKey(key));
            }
            Item::X509Certificate(_) => error!("Found Certificate, not Private Key in {filename}"),
            _ => error!("Unknown Item while loading private key from {filename}"),
        }
    }
    Err(Error::new(
        ErrorKind::NotFound,
        format!("Private Key Not Found in {filename}"),
    ))
}

pub fn client_tls_config(ssl: &ClientSSLConfig) -> Result<ClientConfig, Error> {
    let certs = load_certs(&ssl.ssl_crt_path)?;
    let key = load_private_key(&ssl.ssl_key_path)?;
    ClientConfig::builder()
        .with_safe_defaults()
        .with_custom_certificate_verifier(Arc::new(NoCertificateVerification {}))
        .with_client_auth_cert(certs, key)
        .map_err(|e| Error::new(ErrorKind::InvalidData, format!("{e:?}")))
}
