//! HTTP client for the public NHL search and stats services.

use super::{PlayerSearch, StatsSource};
use crate::config::NhlSettings;
use crate::error::{Result, StatlineError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client for the NHL web APIs.
///
/// Each request carries its own timeout; nothing is retried.
pub struct NhlClient {
    http: reqwest::Client,
    search_url: Url,
    stats_url: Url,
    culture: String,
    search_timeout: Duration,
    stats_timeout: Duration,
}

impl NhlClient {
    /// Build a client from the `[nhl]` settings.
    pub fn new(settings: &NhlSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            search_url: parse_url(&settings.search_url)?,
            stats_url: parse_url(&settings.stats_url)?,
            culture: settings.culture.clone(),
            search_timeout: Duration::from_secs(settings.search_timeout_secs),
            stats_timeout: Duration::from_secs(settings.stats_timeout_secs),
        })
    }

    /// URL of the landing document for a player.
    pub fn landing_url(&self, player_id: u64) -> Result<Url> {
        // Keep any path prefix on the base (e.g. "/v1")
        let id = player_id.to_string();
        let mut url = self.stats_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatlineError::Config(format!("Invalid stats URL: {}", self.stats_url)))?
            .pop_if_empty()
            .extend(["player", id.as_str(), "landing"]);
        Ok(url)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| StatlineError::Config(format!("Invalid URL '{}': {}", raw, e)))
}

#[async_trait]
impl PlayerSearch for NhlClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<Value>> {
        let response = self
            .http
            .get(self.search_url.clone())
            .query(&[("culture", self.culture.as_str()), ("q", query)])
            .timeout(self.search_timeout)
            .send()
            .await?
            .error_for_status()?;

        let candidates: Vec<Value> = response.json().await?;
        debug!("Search returned {} candidates", candidates.len());
        Ok(candidates)
    }
}

#[async_trait]
impl StatsSource for NhlClient {
    #[instrument(skip(self))]
    async fn landing(&self, player_id: u64) -> Result<Value> {
        let url = self.landing_url(player_id)?;

        let response = self
            .http
            .get(url)
            .timeout(self.stats_timeout)
            .send()
            .await
            .map_err(|e| {
                StatlineError::NotFound(format!(
                    "Stats service unreachable for player ID {}: {}",
                    player_id, e
                ))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StatlineError::NotFound(format!(
                "No stats found for player ID {}",
                player_id
            )));
        }
        if !status.is_success() {
            return Err(StatlineError::NotFound(format!(
                "Stats service returned {} for player ID {}",
                status, player_id
            )));
        }

        let body = response.text().await.map_err(|e| {
            StatlineError::NotFound(format!(
                "Failed to read stats for player ID {}: {}",
                player_id, e
            ))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            StatlineError::Schema(format!(
                "landing document for player ID {} is not valid JSON: {}",
                player_id, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nhl::PlayerResolver;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio_test::assert_err;

    /// One-route HTTP server answering every request with the same response.
    /// Returns its base URL and the request lines it has seen.
    async fn canned_server(
        status: &'static str,
        body: &'static str,
        delay: Duration,
    ) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                if let Some(line) = request.lines().next() {
                    log.lock().unwrap().push(line.to_string());
                }

                tokio::time::sleep(delay).await;
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), seen)
    }

    fn local_client(base: &str) -> NhlClient {
        let settings = NhlSettings {
            search_url: format!("{}/api/v1/search/player", base),
            stats_url: format!("{}/v1", base),
            ..NhlSettings::default()
        };
        NhlClient::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_culture_and_query() {
        let (base, seen) = canned_server("200 OK", r#"[{"playerId": "8478402"}]"#, Duration::ZERO).await;
        let client = local_client(&base);

        let candidates = client.search("Connor McDavid").await.unwrap();

        assert_eq!(candidates.len(), 1);
        let line = seen.lock().unwrap()[0].clone();
        assert!(line.starts_with("GET /api/v1/search/player?"), "{}", line);
        assert!(line.contains("culture=en-us"), "{}", line);
        assert!(line.contains("q=Connor+McDavid"), "{}", line);
    }

    #[tokio::test]
    async fn test_search_http_failure_resolves_to_none() {
        let (base, _) = canned_server("500 Internal Server Error", "oops", Duration::ZERO).await;
        let client = Arc::new(local_client(&base));

        assert!(matches!(client.search("McDavid").await, Err(StatlineError::Http(_))));

        let resolver = PlayerResolver::new(client, 4);
        assert_eq!(resolver.resolve("McDavid").await, None);
        assert!(!resolver.is_cached("McDavid"));
    }

    #[tokio::test]
    async fn test_landing_requests_player_path() {
        let (base, seen) = canned_server("200 OK", r#"{"playerId": 8478402}"#, Duration::ZERO).await;
        let client = local_client(&base);

        let landing = client.landing(8478402).await.unwrap();

        assert_eq!(landing["playerId"], 8478402);
        assert!(seen.lock().unwrap()[0].starts_with("GET /v1/player/8478402/landing "));
    }

    #[tokio::test]
    async fn test_landing_404_is_not_found() {
        let (base, _) = canned_server("404 Not Found", "{}", Duration::ZERO).await;
        let client = local_client(&base);

        let err = assert_err!(client.landing(1).await);
        assert!(matches!(err, StatlineError::NotFound(_)));
        assert_eq!(err.to_string(), "No stats found for player ID 1");
    }

    #[tokio::test]
    async fn test_landing_server_error_is_not_found() {
        let (base, _) = canned_server("503 Service Unavailable", "{}", Duration::ZERO).await;
        let client = local_client(&base);

        let err = assert_err!(client.landing(8478402).await);
        assert!(matches!(err, StatlineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_landing_invalid_json_is_schema_error() {
        let (base, _) = canned_server("200 OK", "<html>maintenance</html>", Duration::ZERO).await;
        let client = local_client(&base);

        let err = assert_err!(client.landing(8478402).await);
        assert!(matches!(err, StatlineError::Schema(_)));
    }

    #[tokio::test]
    async fn test_landing_timeout_is_not_found() {
        let (base, _) = canned_server("200 OK", "{}", Duration::from_secs(5)).await;
        let mut client = local_client(&base);
        client.stats_timeout = Duration::from_millis(100);

        let err = assert_err!(client.landing(8478402).await);
        assert!(matches!(err, StatlineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_landing_connection_refused_is_not_found() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = local_client(&format!("http://{}", addr));

        let err = assert_err!(client.landing(8478402).await);
        assert!(matches!(err, StatlineError::NotFound(_)));
    }

    #[test]
    fn test_landing_url_keeps_base_path() {
        let client = NhlClient::new(&NhlSettings::default()).unwrap();
        assert_eq!(
            client.landing_url(8478402).unwrap().as_str(),
            "https://api-web.nhle.com/v1/player/8478402/landing"
        );
    }

    #[test]
    fn test_landing_url_with_trailing_slash() {
        let settings = NhlSettings {
            stats_url: "http://localhost:8080/api/".to_string(),
            ..NhlSettings::default()
        };
        let client = NhlClient::new(&settings).unwrap();
        assert_eq!(
            client.landing_url(42).unwrap().as_str(),
            "http://localhost:8080/api/player/42/landing"
        );
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let settings = NhlSettings {
            search_url: "not a url".to_string(),
            ..NhlSettings::default()
        };
        assert!(matches!(
            NhlClient::new(&settings),
            Err(StatlineError::Config(_))
        ));
    }
}
