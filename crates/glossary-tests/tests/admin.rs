//! Dataset administration endpoint tests.

use glossary_client::{ClientConfig, Error, GlossaryClient};
use glossary_tests::{connect_or_skip, get_api_url};
use std::time::Duration;

#[tokio::test]
async fn test_init_datasets_without_key_is_forbidden() {
    if connect_or_skip().await.is_none() {
        return;
    }

    // A keyless client must be rejected before any ingestion starts.
    let client = GlossaryClient::new(ClientConfig {
        base_url: get_api_url(),
        timeout: Duration::from_secs(10),
        api_key: None,
    })
    .expect("Failed to create client");

    let result = client.init_datasets(false).await;

    assert!(matches!(result, Err(Error::Forbidden(_))));
}
