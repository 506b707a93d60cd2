//! TLS客户端构建
//!
//! 从PEM文件加载客户端证书、私钥和CA，构建用于探测的HTTP客户端

use crate::config::types::TlsConfig;
use crate::error::ConfigError;
use crate::health::checker::PROBE_TIMEOUT;
use reqwest::{Certificate, Client, Identity};
use std::path::Path;
use tracing::info;

fn read_pem(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|source| ConfigError::TlsFileUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// 由证书与私钥文件加载客户端身份
pub fn load_identity(cert_file: &Path, key_file: &Path) -> Result<Identity, ConfigError> {
    let mut pem = read_pem(cert_file)?;
    let key = read_pem(key_file)?;
    pem.push(b'\n');
    pem.extend_from_slice(&key);

    Identity::from_pem(&pem).map_err(|e| {
        ConfigError::InvalidTls(format!(
            "{} / {}: {}",
            cert_file.display(),
            key_file.display(),
            e
        ))
    })
}

/// 加载CA证书（文件中可包含多张证书）
pub fn load_ca(ca_file: &Path) -> Result<Vec<Certificate>, ConfigError> {
    let pem = read_pem(ca_file)?;
    let certs = Certificate::from_pem_bundle(&pem)
        .map_err(|e| ConfigError::InvalidTls(format!("{}: {}", ca_file.display(), e)))?;

    if certs.is_empty() {
        return Err(ConfigError::InvalidTls(format!(
            "{}: 未找到PEM证书",
            ca_file.display()
        )));
    }
    Ok(certs)
}

/// 构建探测用的双向TLS HTTP客户端
///
/// 缺少任一TLS文件，或文件不可读、格式无效，都会返回错误，由调用方在启动阶段终止进程。
pub fn build_http_client(tls: &TlsConfig) -> Result<Client, ConfigError> {
    let (Some(cert_file), Some(key_file), Some(ca_file)) =
        (&tls.cert_file, &tls.key_file, &tls.ca_file)
    else {
        let flag = tls.missing().unwrap_or("--cert-file / --key-file / --ca-file");
        return Err(ConfigError::ValidationError(format!("缺少TLS文件: {flag}")));
    };

    let mut builder = Client::builder()
        .use_rustls_tls()
        .timeout(PROBE_TIMEOUT)
        .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
        .identity(load_identity(cert_file, key_file)?);
    info!("已加载客户端证书: {}", cert_file.display());

    for cert in load_ca(ca_file)? {
        builder = builder.add_root_certificate(cert);
    }
    info!("已加载CA证书: {}", ca_file.display());

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_tls_config_rejected() {
        let err = build_http_client(&TlsConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("--cert-file"));
    }

    #[test]
    fn test_ca_only_rejected() {
        let ca = write_temp("");
        let tls = TlsConfig {
            ca_file: Some(ca.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(
            build_http_client(&tls),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_unreadable_cert_file() {
        let tls = TlsConfig {
            ca_file: Some(PathBuf::from("/nonexistent/ca.crt")),
            cert_file: Some(PathBuf::from("/nonexistent/client.crt")),
            key_file: Some(PathBuf::from("/nonexistent/client.key")),
        };
        match build_http_client(&tls) {
            Err(ConfigError::TlsFileUnreadable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/client.crt"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_ca_file() {
        assert!(matches!(
            load_ca(Path::new("/nonexistent/ca.crt")),
            Err(ConfigError::TlsFileUnreadable { .. })
        ));
    }

    #[test]
    fn test_invalid_identity() {
        let cert = write_temp("not a certificate");
        let key = write_temp("not a key");
        let err = load_identity(cert.path(), key.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTls(_)));
    }

    #[test]
    fn test_empty_ca_bundle() {
        let ca = write_temp("");
        assert!(load_ca(ca.path()).is_err());
    }
}
