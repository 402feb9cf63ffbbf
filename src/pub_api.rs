/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::pub_api
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1
  ------------------------------------------------------------
  Purpose:
    Query the package registry JSON endpoint for a single
    package and decode the published metadata.

  Security / Safety Notes:
    Performs read-only HTTPS GET requests. No credentials or
    custom headers are transmitted.

  Dependencies:
    reqwest for HTTP, urlencoding for path segments.

  Operational Scope:
    Called once per package by the report loop; one request,
    no retries.

  Revision History:
    2026-10-18 COD  Implemented registry client.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Single attempt per package with explicit failure paths
    - Structured response parsing at the module boundary
============================================================*/

use std::time::Duration;

use reqwest::StatusCode;
use urlencoding::encode;

use crate::config::{RegistryConfig, PACKAGE_PLACEHOLDER};
use crate::error::{FetchError, Result, RetrievalError, SynpubError};
use crate::logger::Logger;
use crate::package_info::PackageInfo;

/// Client for the registry's per-package JSON documents.
pub struct PubClient {
    client: reqwest::Client,
    base_url: String,
    path_template: String,
}

impl PubClient {
    /// Construct a new client from configuration.
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| SynpubError::Network(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            path_template: config.path_template.clone(),
        })
    }

    fn compose_url(&self, package: &str) -> String {
        let path = self
            .path_template
            .replace(PACKAGE_PLACEHOLDER, &encode(package));
        format!("{}{path}", self.base_url)
    }

    /// Fetch and decode the metadata document for `package`.
    ///
    /// Anything other than `200 OK` yields a [`RetrievalError`] carrying the
    /// observed status. A transport failure, including a body cut short after
    /// `200 OK`, yields one without a status.
    pub async fn fetch_package(
        &self,
        package: &str,
        logger: &Logger,
    ) -> std::result::Result<PackageInfo, FetchError> {
        let url = self.compose_url(package);
        logger.debug("REQUEST", format!("GET {url}"));

        let response = self.client.get(&url).send().await.map_err(|err| {
            logger.debug("TRANSPORT", format!("{url}: {err}"));
            RetrievalError::new(package, None)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RetrievalError::new(package, Some(status.as_u16())).into());
        }

        let body = response.text().await.map_err(|err| {
            logger.debug("TRANSPORT", format!("{url}: body read failed: {err}"));
            RetrievalError::new(package, None)
        })?;
        let document: serde_json::Value =
            serde_json::from_str(&body).map_err(|err| FetchError::Decode {
                package_name: package.to_string(),
                reason: format!("response is not JSON: {err}"),
            })?;
        let info = PackageInfo::from_value(document).map_err(|err| FetchError::Decode {
            package_name: package.to_string(),
            reason: err.to_string(),
        })?;

        logger.debug(
            "DECODED",
            format!("{} latest={}", info.name, info.latest_version),
        );
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client_for(base_url: &str) -> PubClient {
        PubClient::new(&RegistryConfig {
            base_url: base_url.to_string(),
            ..RegistryConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn default_url_targets_dart_dev() {
        let client = PubClient::new(&RegistryConfig::default()).unwrap();
        assert_eq!(
            client.compose_url("http"),
            "https://dart.dev/f/packages/http.json"
        );
    }

    #[test]
    fn url_trims_trailing_slash_and_encodes_segment() {
        let client = client_for("http://localhost:8080/");
        assert_eq!(
            client.compose_url("shelf_router"),
            "http://localhost:8080/f/packages/shelf_router.json"
        );
        assert_eq!(
            client.compose_url("a/b c"),
            "http://localhost:8080/f/packages/a%2Fb%20c.json"
        );
    }

    #[tokio::test]
    async fn fetch_package_decodes_ok_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/f/packages/http.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "name": "http",
                    "latestVersion": "1.2.0",
                    "description": "A library",
                    "publisher": "dart.dev",
                    "repository": "https://github.com/dart-lang/http"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = client_for(&server.url());
        let info = client
            .fetch_package("http", &Logger::console(false))
            .await
            .unwrap();
        assert_eq!(info.name, "http");
        assert_eq!(info.latest_version, "1.2.0");
        assert_eq!(info.publisher, "dart.dev");
        assert_eq!(
            info.repository.map(String::from),
            Some("https://github.com/dart-lang/http".to_string())
        );

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_ok_status_is_retrieval_error_without_retry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/f/packages/nonexistent.json")
            .with_status(404)
            .with_body("not found")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .fetch_package("nonexistent", &Logger::console(false))
            .await
            .unwrap_err();
        match err {
            FetchError::Retrieval(inner) => {
                assert_eq!(inner, RetrievalError::new("nonexistent", Some(404)));
            }
            other => panic!("Expected RetrievalError, got: {other:?}"),
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn other_success_codes_are_still_failures() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/f/packages/http.json")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .fetch_package("http", &Logger::console(false))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Retrieval(RetrievalError {
                status_code: Some(204),
                ..
            })
        ));
    }

    #[tokio::test]
    async fn missing_required_field_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/f/packages/http.json")
            .with_status(200)
            .with_body(r#"{"name":"http","latestVersion":"1.2.0","description":"x"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .fetch_package("http", &Logger::console(false))
            .await
            .unwrap_err();
        match err {
            FetchError::Decode {
                package_name,
                reason,
            } => {
                assert_eq!(package_name, "http");
                assert!(reason.contains("publisher"), "{reason}");
            }
            other => panic!("Expected decode error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_decode_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/f/packages/http.json")
            .with_status(200)
            .with_body("<html>moved</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client
            .fetch_package("http", &Logger::console(false))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_retrieval_error_without_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{addr}"));
        let err = client
            .fetch_package("http", &Logger::console(false))
            .await
            .unwrap_err();
        match err {
            FetchError::Retrieval(inner) => {
                assert_eq!(inner.status_code, None);
                assert_eq!(inner.to_string(), "Failed to retrieve package:http information!");
            }
            other => panic!("Expected RetrievalError, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn truncated_ok_body_is_retrieval_error_without_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"na")
                .await
                .unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = client_for(&format!("http://{addr}"));
        let err = client
            .fetch_package("http", &Logger::console(false))
            .await
            .unwrap_err();
        match err {
            FetchError::Retrieval(inner) => {
                assert_eq!(inner, RetrievalError::new("http", None));
                assert_eq!(inner.to_string(), "Failed to retrieve package:http information!");
            }
            other => panic!("Expected RetrievalError, got: {other:?}"),
        }
        server.await.unwrap();
    }
}
