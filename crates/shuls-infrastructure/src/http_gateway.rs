//! HTTP implementation of [`AddressSearchGateway`].
//!
//! Talks to the directory server's address lookup endpoints:
//! - `GET {base}/address-lookup?q=..&session_token=..`
//! - `GET {base}/address-lookup/details?place_id=..&session_token=..`

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shuls_core::{
    AddressSearchGateway, Candidate, ClientConfig, PlaceId, Result, SearchSession, ShulsError,
};
use std::time::Duration;

use crate::dto::{CandidateDto, LookupResponse};

/// Gateway backed by the directory server.
#[derive(Debug, Clone)]
pub struct HttpAddressSearchGateway {
    client: Client,
    search_url: String,
    details_url: String,
    timeout: Duration,
}

impl HttpAddressSearchGateway {
    pub fn new(
        base_url: &str,
        search_path: &str,
        details_path: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            search_url: join_url(base_url, search_path),
            details_url: join_url(base_url, details_path),
            timeout,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.search_path,
            &config.details_path,
            config.selection.request_timeout(),
        )
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    pub fn details_url(&self) -> &str {
        &self.details_url
    }

    /// Issues a GET and decodes the body, returning a plain message on failure.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<T, String> {
        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| format!("Request to {} failed: {}", url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read response body: {}", e))?;

        decode_body(status.as_u16(), &body)
    }
}

#[async_trait]
impl AddressSearchGateway for HttpAddressSearchGateway {
    async fn search(&self, query: &str, session: &SearchSession) -> Result<Vec<Candidate>> {
        tracing::debug!(query, "GET {}", self.search_url);
        let dtos: Vec<CandidateDto> = self
            .get_json(
                &self.search_url,
                &[("q", query), ("session_token", session.token())],
            )
            .await
            .map_err(ShulsError::search_failed)?;

        Ok(dtos.into_iter().map(Candidate::from).collect())
    }

    async fn fetch_details(
        &self,
        place_id: &PlaceId,
        session: &SearchSession,
    ) -> Result<Candidate> {
        tracing::debug!(place_id = %place_id, "GET {}", self.details_url);
        let dto: CandidateDto = self
            .get_json(
                &self.details_url,
                &[("place_id", place_id.as_str()), ("session_token", session.token())],
            )
            .await
            .map_err(|message| ShulsError::details_failed(place_id.as_str(), message))?;

        let mut candidate = Candidate::from(dto);
        if candidate.place_id.is_none() {
            candidate.place_id = Some(place_id.clone());
        }
        if candidate.coordinates.is_none() {
            return Err(ShulsError::details_failed(
                place_id.as_str(),
                "details response has no coordinates",
            ));
        }
        Ok(candidate)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decodes a lookup response body, honouring the `{error}` envelope.
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> std::result::Result<T, String> {
    let parsed = serde_json::from_str::<LookupResponse<T>>(body);

    if !(200..300).contains(&status) {
        return Err(match parsed {
            Ok(LookupResponse::Failure { error }) => format!("HTTP {}: {}", status, error),
            _ => format!("HTTP {}", status),
        });
    }

    match parsed {
        Ok(LookupResponse::Success(value)) => Ok(value),
        Ok(LookupResponse::Failure { error }) => Err(error),
        Err(e) => Err(format!("Failed to parse lookup response: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves one canned HTTP response and reports the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let n = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
        });

        (format!("http://{}", addr), rx)
    }

    fn gateway(base_url: &str) -> HttpAddressSearchGateway {
        HttpAddressSearchGateway::from_config(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    #[test]
    fn test_join_url_normalizes_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/", "/address-lookup"),
            "http://localhost:8000/address-lookup"
        );
        assert_eq!(
            join_url("https://shuls.example", "address-lookup/details"),
            "https://shuls.example/address-lookup/details"
        );
    }

    #[test]
    fn test_decode_error_status_uses_error_field() {
        let err = decode_body::<Vec<CandidateDto>>(500, r#"{"error": "Address search failed"}"#)
            .unwrap_err();
        assert_eq!(err, "HTTP 500: Address search failed");

        let err = decode_body::<Vec<CandidateDto>>(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err, "HTTP 502");
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_body::<Vec<CandidateDto>>(200, "not json").unwrap_err();
        assert!(err.starts_with("Failed to parse"));
    }

    #[tokio::test]
    async fn test_search_sends_query_and_session_token() {
        let (base, request) = serve_once(
            "200 OK",
            r#"[{"id":"ChIJ1","place_id":"ChIJ1","display_name":"Young Israel of Hollywood","lat":null,"lon":null,"source":"google"}]"#,
        )
        .await;
        let session = SearchSession::with_token("tok-1");

        let candidates = gateway(&base).search("young israel", &session).await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].needs_details());
        let request = request.await.unwrap();
        assert!(request.starts_with("GET /address-lookup?"));
        assert!(request.contains("q=young+israel"));
        assert!(request.contains("session_token=tok-1"));
    }

    #[tokio::test]
    async fn test_search_server_error_is_search_failed() {
        let (base, _request) =
            serve_once("500 Internal Server Error", r#"{"error": "Address search failed"}"#).await;

        let err = gateway(&base)
            .search("anything", &SearchSession::new())
            .await
            .unwrap_err();
        assert!(err.is_search_failed());
    }

    #[tokio::test]
    async fn test_details_resolves_coordinates() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"place_id":"ChIJ1","display_name":"3291 Stirling Rd","lat":26.0453,"lon":-80.1784,"source":"google"}"#,
        )
        .await;

        let candidate = gateway(&base)
            .fetch_details(&PlaceId::new("ChIJ1"), &SearchSession::with_token("tok-2"))
            .await
            .unwrap();

        assert_eq!(candidate.display_name, "3291 Stirling Rd");
        assert!(!candidate.needs_details());
        let request = request.await.unwrap();
        assert!(request.starts_with("GET /address-lookup/details?"));
        assert!(request.contains("place_id=ChIJ1"));
        assert!(request.contains("session_token=tok-2"));
    }

    #[tokio::test]
    async fn test_details_without_coordinates_fails() {
        let (base, _request) =
            serve_once("200 OK", r#"{"place_id":"ChIJ1","display_name":"Nowhere"}"#).await;

        let err = gateway(&base)
            .fetch_details(&PlaceId::new("ChIJ1"), &SearchSession::new())
            .await
            .unwrap_err();
        assert!(err.is_details_failed());
    }
}
