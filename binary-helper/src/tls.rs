use std::io;

use anyhow::Context as _;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::RootCertStore;

use crate::config::TlsConfig;

/// Every certificate in a PEM file, in file order.
pub async fn load_certs(path: &str) -> anyhow::Result<Vec<CertificateDer<'static>>> {
	let pem = tokio::fs::read(path).await.with_context(|| format!("failed to read {path}"))?;

	rustls_pemfile::certs(&mut io::Cursor::new(pem))
		.collect::<Result<Vec<_>, _>>()
		.with_context(|| format!("invalid certificate in {path}"))
}

/// The first PKCS#8 private key in a PEM file.
pub async fn load_private_key(path: &str) -> anyhow::Result<PrivateKeyDer<'static>> {
	let pem = tokio::fs::read(path).await.with_context(|| format!("failed to read {path}"))?;

	let key = rustls_pemfile::pkcs8_private_keys(&mut io::Cursor::new(pem))
		.next()
		.with_context(|| format!("no pkcs8 private key in {path}"))?
		.with_context(|| format!("invalid private key in {path}"))?;

	Ok(key.into())
}

/// A server config presenting the configured certificate, without client auth.
pub async fn server_config(tls: &TlsConfig) -> anyhow::Result<rustls::ServerConfig> {
	let certs = load_certs(&tls.cert).await?;
	let key = load_private_key(&tls.key).await?;

	rustls::ServerConfig::builder()
		.with_no_client_auth()
		.with_single_cert(certs, key)
		.context("failed to create tls server config")
}

/// A client config authenticating with the configured certificate and
/// trusting only `ca_cert`, if set.
pub async fn client_config(tls: &TlsConfig) -> anyhow::Result<rustls::ClientConfig> {
	let certs = load_certs(&tls.cert).await?;
	let key = load_private_key(&tls.key).await?;

	let mut roots = RootCertStore::empty();
	if let Some(ca_cert) = &tls.ca_cert {
		for cert in load_certs(ca_cert).await? {
			roots.add(cert).context("failed to add ca cert")?;
		}
	}

	rustls::ClientConfig::builder()
		.with_root_certificates(roots)
		.with_client_auth_cert(certs, key)
		.context("failed to create tls client config")
}
