//! HTTP client for fetching paste text.
//!
//! One `reqwest::Client` is built at startup with the configured
//! identifying user agent and request timeout, and reused for every
//! request. Compressed response bodies (the site gzips raw pastes) are
//! decompressed transparently before the text is returned; a corrupt body
//! surfaces as [`FetchError::Decode`].

use crate::error::{FetchError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Fetches decoded text content over HTTP.
///
/// Carries no retry logic; whether a failed URL is retried is the
/// caller's policy decision.
#[derive(Debug, Clone)]
pub struct PasteFetcher {
    client: Client,
}

impl PasteFetcher {
    /// Build a fetcher with the given identifying user agent and request
    /// timeout.
    ///
    /// # Errors
    /// Returns `FetchError::ClientBuild` if the underlying client cannot
    /// be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self { client })
    }

    /// Fetch a URL and return its decoded text body.
    ///
    /// # Errors
    /// - `FetchError::HttpStatus` for any non-success status code
    /// - `FetchError::Decode` when decompression or charset decoding fails
    /// - `FetchError::Transport` for DNS, connection, and timeout failures
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| classify(url, e))
    }
}

/// Sort a reqwest error into the fetch taxonomy.
fn classify(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_decode() {
        FetchError::Decode {
            url: url.to_string(),
            source: error,
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port, echoing nothing.
    /// Returns the base URL to request.
    async fn serve_once(response: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let _ = sock.read(&mut buf).await;
                let _ = sock.write_all(&response).await;
                let _ = sock.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    /// Serve one response whose body is the raw request head, so tests can
    /// assert on what was sent.
    async fn serve_echo() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            if let Ok((mut sock, _)) = listener.accept().await {
                let mut buf = [0u8; 2048];
                let n = sock.read(&mut buf).await.unwrap_or(0);
                let head = b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n".to_vec();
                let _ = sock.write_all(&head).await;
                let _ = sock.write_all(&buf[..n]).await;
                let _ = sock.shutdown().await;
            }
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello".to_vec(),
        )
        .await;
        let fetcher = PasteFetcher::new("test-agent", 5).expect("build fetcher");
        let body = fetcher.fetch_text(&url).await.expect("fetch succeeds");
        assert_eq!(body, "hello");
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_user_agent() {
        let url = serve_echo().await;
        let fetcher = PasteFetcher::new("pastewatch-test-agent", 5).expect("build fetcher");
        let body = fetcher.fetch_text(&url).await.expect("fetch succeeds");
        assert!(body.contains("pastewatch-test-agent"), "got: {body}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_status_error() {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
        )
        .await;
        let fetcher = PasteFetcher::new("test-agent", 5).expect("build fetcher");
        let err = fetcher.fetch_text(&url).await.expect_err("404 must fail");
        match err {
            FetchError::HttpStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_corrupt_gzip_body_is_decode_error() {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Encoding: gzip\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot-gzip!"
                .to_vec(),
        )
        .await;
        let fetcher = PasteFetcher::new("test-agent", 5).expect("build fetcher");
        let err = fetcher.fetch_text(&url).await.expect_err("corrupt gzip must fail");
        assert!(matches!(err, FetchError::Decode { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Bind then immediately drop the listener so the port is closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let fetcher = PasteFetcher::new("test-agent", 5).expect("build fetcher");
        let err = fetcher
            .fetch_text(&format!("http://{addr}/"))
            .await
            .expect_err("refused connection must fail");
        assert!(matches!(err, FetchError::Transport { .. }), "got {err:?}");
        assert!(!err.is_http_status());
    }
}
