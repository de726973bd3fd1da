//! HTTPS server startup using rustls.

use std::io;
use std::path::{Path, PathBuf};

use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::{ServerError, ServerResult, shutdown_signal};

/// Starts an HTTPS server with graceful shutdown.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the PEM files are
/// missing or unreadable, or the server fails while running.
pub async fn serve_https(
    app: Router,
    server_config: ServerConfig,
    cert_path: PathBuf,
    key_path: PathBuf,
) -> ServerResult<()> {
    server_config
        .validate()
        .map_err(|err| ServerError::invalid_config(&err))?;

    validate_tls_files(&cert_path, &key_path)?;

    let tls_config = RustlsConfig::from_pem_file(&cert_path, &key_path)
        .await
        .map_err(|err| ServerError::TlsCertificate(format!("failed to load PEM files: {err}")))?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        cert_path = %cert_path.display(),
        key_path = %key_path.display(),
        "TLS certificates loaded"
    );

    let server_addr = server_config.server_addr();
    let shutdown_timeout = server_config.shutdown_timeout();

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(shutdown_timeout));
    });

    serve_with_shutdown(&server_config, || async move {
        axum_server::bind_rustls(server_addr, tls_config)
            .handle(handle)
            .serve(app.into_make_service())
            .await
    })
    .await
}

/// Checks that both PEM files exist, are regular files and are not empty.
fn validate_tls_files(cert_path: &Path, key_path: &Path) -> ServerResult<()> {
    let validate_file = |path: &Path, file_type: &str| -> ServerResult<()> {
        let metadata = std::fs::metadata(path).map_err(|err| {
            let reason = match err.kind() {
                io::ErrorKind::NotFound => "does not exist".to_owned(),
                _ => format!("cannot be read: {err}"),
            };
            ServerError::TlsCertificate(format!("{file_type} file {reason}: {}", path.display()))
        })?;

        if !metadata.is_file() {
            return Err(ServerError::TlsCertificate(format!(
                "{file_type} path is not a file: {}",
                path.display()
            )));
        }

        if metadata.len() == 0 {
            return Err(ServerError::TlsCertificate(format!(
                "{file_type} file is empty: {}",
                path.display()
            )));
        }

        Ok(())
    };

    validate_file(cert_path, "Certificate")?;
    validate_file(key_path, "Private key")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rejects_nonexistent_files() {
        let result = validate_tls_files(
            Path::new("nonexistent_cert.pem"),
            Path::new("nonexistent_key.pem"),
        );

        let Err(ServerError::TlsCertificate(message)) = result else {
            panic!("expected a TLS certificate error");
        };
        assert!(message.contains("Certificate file does not exist"));
    }

    #[test]
    fn rejects_empty_key() -> anyhow::Result<()> {
        let mut cert = tempfile::NamedTempFile::new()?;
        cert.write_all(b"-----BEGIN CERTIFICATE-----")?;
        let key = tempfile::NamedTempFile::new()?;

        let result = validate_tls_files(cert.path(), key.path());

        let Err(ServerError::TlsCertificate(message)) = result else {
            panic!("expected a TLS certificate error");
        };
        assert!(message.contains("Private key file is empty"));
        Ok(())
    }
}
