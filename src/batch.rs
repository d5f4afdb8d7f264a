//! Sequential driver for the redirect resolver.

use crate::models::{Resolution, ResolutionRecord};
use crate::pacing::Pacer;
use crate::resolver;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Resolve every URL in order, one request at a time.
///
/// # Arguments
///
/// * `client` - A client built with [`crate::http::resolver_client`] (redirects not followed)
/// * `pacer` - Gate awaited before every URL, whatever the previous outcome
/// * `urls` - Candidate URLs, processed in this order
///
/// # Returns
///
/// Exactly one [`ResolutionRecord`] per input URL, in input order. Network
/// failures become [`Resolution::Failed`] entries instead of aborting the run,
/// so this function has no error path.
#[instrument(level = "info", skip_all, fields(total = urls.len()))]
pub async fn run_batch(client: &Client, pacer: &mut Pacer, urls: &[String]) -> Vec<ResolutionRecord> {
    let total = urls.len();
    let mut records = Vec::with_capacity(total);
    debug!(interval = ?pacer.interval(), "Starting batch");

    for (i, url) in urls.iter().enumerate() {
        pacer.wait().await;
        info!(index = i + 1, total, %url, "Processing");

        let outcome = match resolver::resolve(client, url).await {
            Ok(resolution) => resolution,
            Err(e) => {
                warn!(%url, error = %e, "Error processing URL");
                Resolution::Failed {
                    reason: e.to_string(),
                }
            }
        };

        records.push(ResolutionRecord {
            original: url.clone(),
            outcome,
        });
    }

    let failed = records.iter().filter(|r| r.is_failed()).count();
    info!(total, resolved = total - failed, failed, "Batch finished");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::http::resolver_client;
    use std::time::Duration;
    use tokio::time::Instant;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_one_record_per_input_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wrapped"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "https://news.google.com/url?q=https%3A%2F%2Fsite.com%2Fpage&other=1"),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/plain"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let dead = format!("http://{}/gone", listener.local_addr().unwrap());
        drop(listener);

        let urls = vec![
            format!("{}/wrapped", server.uri()),
            dead.clone(),
            format!("{}/plain", server.uri()),
            format!("{}/wrapped", server.uri()),
        ];

        let client = resolver_client(&Settings::default()).unwrap();
        let mut pacer = Pacer::unpaced();
        let records = run_batch(&client, &mut pacer, &urls).await;

        assert_eq!(records.len(), urls.len());
        for (record, url) in records.iter().zip(&urls) {
            assert_eq!(&record.original, url);
        }

        assert_eq!(records[0].final_url(), Some("https://site.com/page"));
        assert!(records[1].is_failed());
        assert_eq!(records[2].redirect(), Some(urls[2].as_str()));
        assert_eq!(records[2].final_url(), Some(urls[2].as_str()));
        assert_eq!(records[3], records[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pacing_spaces_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/plain"))
            .respond_with(ResponseTemplate::new(200))
            .expect(3)
            .mount(&server)
            .await;

        let urls = vec![format!("{}/plain", server.uri()); 3];
        let client = resolver_client(&Settings::default()).unwrap();
        let mut pacer = Pacer::new(Duration::from_millis(500));

        let t0 = Instant::now();
        let records = run_batch(&client, &mut pacer, &urls).await;

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| !r.is_failed()));
        assert!(t0.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_empty_input_yields_nothing() {
        let client = resolver_client(&Settings::default()).unwrap();
        let mut pacer = Pacer::unpaced();
        assert!(run_batch(&client, &mut pacer, &[]).await.is_empty());
    }
}
