//! HTTP clients used by the pipelines.
//!
//! Every client identifies itself with the configured browser user agent and
//! carries no cookie store, so requests share no session state.

use crate::config::Settings;
use crate::error::Result;
use reqwest::{Client, redirect};

/// Client for aggregator search pages. Follows redirects like a browser.
pub fn search_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(settings.user_agent.as_str())
        .build()?)
}

/// Client for redirect resolution. Redirect responses are returned as-is so
/// the caller can read their `Location` header.
pub fn resolver_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(settings.user_agent.as_str())
        .redirect(redirect::Policy::none())
        .build()?)
}

/// Client for the content fetcher, bounded by the configured timeout.
pub fn fetch_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.fetch_timeout())
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_clients_send_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ua"))
            .and(header("user-agent", "test-agent/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&server)
            .await;

        let settings = Settings {
            user_agent: "test-agent/1.0".to_string(),
            ..Settings::default()
        };
        let url = format!("{}/ua", server.uri());
        for client in [
            search_client(&settings).unwrap(),
            resolver_client(&settings).unwrap(),
            fetch_client(&settings).unwrap(),
        ] {
            let resp = client.get(&url).send().await.unwrap();
            assert_eq!(resp.status(), 200);
        }
    }

    #[tokio::test]
    async fn test_resolver_client_does_not_follow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hop"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere"))
            .mount(&server)
            .await;

        let client = resolver_client(&Settings::default()).unwrap();
        let resp = client
            .get(format!("{}/hop", server.uri()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 302);
    }
}
