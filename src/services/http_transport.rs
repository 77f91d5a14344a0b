use async_trait::async_trait;
use log::debug;
use std::time::Duration;

use crate::errors::TranslateError;

pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Low level failure before any response arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError {
    pub code: String,
}

impl From<TransportError> for TranslateError {
    fn from(err: TransportError) -> Self {
        TranslateError::ConnectionError { code: err.code }
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<ReqwestTransport, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let resp = self.client.get(url).send().await.map_err(to_transport_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(to_transport_error)?;

        Ok(TransportResponse { status, body })
    }
}

/// Only the error kind leaves this module. reqwest's message carries the
/// request url, which holds the API key and the queried text.
fn to_transport_error(err: reqwest::Error) -> TransportError {
    let code = if err.is_timeout() {
        "ETIMEDOUT"
    } else if err.is_connect() {
        "ECONNECT"
    } else if err.is_body() || err.is_decode() {
        "EBODY"
    } else {
        "EREQUEST"
    };

    debug!("Request failed with {}: {}", code, err.without_url());

    TransportError {
        code: code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    const API_KEY: &str = "SECRET-API-KEY";

    fn url_for(addr: std::net::SocketAddr) -> String {
        format!("http://{}/v2/?key={}&q=Hallo&target=en", addr, API_KEY)
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let transport = ReqwestTransport::new(Duration::from_millis(200)).unwrap();
        let err = transport.get(&url_for(addr)).await.err().unwrap();

        assert_eq!(err.code, "ETIMEDOUT");
        server.abort();
    }

    #[tokio::test]
    async fn refused_connection_hides_url() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let err = transport.get(&url_for(addr)).await.err().unwrap();

        assert_eq!(err.code, "ECONNECT");

        let message = TranslateError::from(err).to_string();
        assert!(!message.contains(API_KEY));
        assert!(!message.contains("Hallo"));
    }

    #[tokio::test]
    async fn response_status_and_body_are_returned() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let reply = concat!(
                "HTTP/1.1 403 Forbidden\r\n",
                "content-length: 5\r\n",
                "connection: close\r\n\r\n",
                "quota"
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
        });

        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let resp = transport.get(&url_for(addr)).await.ok().unwrap();

        assert_eq!(resp.status, 403);
        assert_eq!(resp.body, "quota");
    }
}
