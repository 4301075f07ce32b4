//! HTTP client for the email assistant backend

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::error::BackendError;
use super::types::{
    ActionKind, ActionResponse, ClassificationResponse, DraftResponse, Email, EmailId,
    SummaryResponse,
};
use crate::config::BackendConfig;

/// Client for the four backend endpoints. Cheap to clone.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a client for the configured base URL
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim())
            .with_context(|| format!("Invalid backend URL: {}", config.base_url))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            anyhow::bail!("Backend URL must be http(s): {}", config.base_url);
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// `GET /emails/`
    pub async fn list_emails(&self) -> Result<Vec<Email>, BackendError> {
        let url = self.endpoint(&["emails", ""]);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(BackendError::Network)?;

        decode(response).await
    }

    /// `POST /emails/{id}/summarize`
    pub async fn summarize(&self, id: &EmailId) -> Result<Option<String>, BackendError> {
        self.post_action::<SummaryResponse>(ActionKind::Summarize, id)
            .await
    }

    /// `POST /emails/{id}/draft-reply`
    pub async fn draft_reply(&self, id: &EmailId) -> Result<Option<String>, BackendError> {
        self.post_action::<DraftResponse>(ActionKind::DraftReply, id)
            .await
    }

    /// `POST /emails/{id}/classify`
    pub async fn classify(&self, id: &EmailId) -> Result<Option<String>, BackendError> {
        self.post_action::<ClassificationResponse>(ActionKind::Classify, id)
            .await
    }

    /// Run one of the three actions and return the response's text field
    pub async fn run_action(
        &self,
        kind: ActionKind,
        id: &EmailId,
    ) -> Result<Option<String>, BackendError> {
        match kind {
            ActionKind::Summarize => self.summarize(id).await,
            ActionKind::DraftReply => self.draft_reply(id).await,
            ActionKind::Classify => self.classify(id).await,
        }
    }

    async fn post_action<R: ActionResponse>(
        &self,
        kind: ActionKind,
        id: &EmailId,
    ) -> Result<Option<String>, BackendError> {
        let url = self.endpoint(&["emails", id.as_str(), kind.path_segment()]);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(BackendError::Network)?;

        let body: R = decode(response).await?;
        Ok(body.into_text())
    }

    /// Append path segments to the base URL (segments are percent-encoded)
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Http { status, body });
    }

    response.json().await.map_err(BackendError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use reqwest::StatusCode;

    fn client_for(url: &str) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: url.to_string(),
            timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = BackendConfig {
            base_url: "ftp://example.com".to_string(),
            timeout_secs: None,
        };
        assert!(BackendClient::new(&config).is_err());

        let config = BackendConfig {
            base_url: "not a url".to_string(),
            timeout_secs: None,
        };
        assert!(BackendClient::new(&config).is_err());
    }

    #[test]
    fn test_endpoint_paths() {
        let client = client_for("http://127.0.0.1:8000/");
        assert_eq!(
            client.endpoint(&["emails", ""]).as_str(),
            "http://127.0.0.1:8000/emails/"
        );
        assert_eq!(
            client
                .endpoint(&["emails", "12", ActionKind::DraftReply.path_segment()])
                .as_str(),
            "http://127.0.0.1:8000/emails/12/draft-reply"
        );

        let prefixed = client_for("http://example.com/api");
        assert_eq!(
            prefixed.endpoint(&["emails", "a b", "classify"]).as_str(),
            "http://example.com/api/emails/a%20b/classify"
        );
        assert_eq!(prefixed.base_url(), "http://example.com/api");
    }

    #[tokio::test]
    async fn test_list_emails_preserves_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/emails/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 2, "subject": "Second", "preview": "b", "sender": "b@x.com", "body": "two"},
                    {"id": 1, "subject": "Hi", "preview": "p", "sender": "a@b.com", "body": "text"}
                ]"#,
            )
            .create_async()
            .await;

        let emails = client_for(&server.url()).list_emails().await.unwrap();

        mock.assert_async().await;
        let ids: Vec<_> = emails.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(emails[1].sender, "a@b.com");
    }

    #[tokio::test]
    async fn test_actions_post_to_their_endpoints() {
        let mut server = Server::new_async().await;
        let summarize = server
            .mock("POST", "/emails/1/summarize")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"summary": "Short version"}"#)
            .create_async()
            .await;
        let draft = server
            .mock("POST", "/emails/1/draft-reply")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"draft": "Dear A,"}"#)
            .create_async()
            .await;
        let classify = server
            .mock("POST", "/emails/1/classify")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"classification": "Urgent"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let id = EmailId::from(1);

        assert_eq!(
            client.summarize(&id).await.unwrap().as_deref(),
            Some("Short version")
        );
        assert_eq!(
            client.draft_reply(&id).await.unwrap().as_deref(),
            Some("Dear A,")
        );
        assert_eq!(
            client
                .run_action(ActionKind::Classify, &id)
                .await
                .unwrap()
                .as_deref(),
            Some("Urgent")
        );

        summarize.assert_async().await;
        draft.assert_async().await;
        classify.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_text_field_is_none() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/emails/3/summarize")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 3, "summary": null}"#)
            .create_async()
            .await;

        let text = client_for(&server.url())
            .summarize(&EmailId::from(3))
            .await
            .unwrap();
        assert_eq!(text, None);
    }

    #[tokio::test]
    async fn test_http_error_carries_status() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/emails/1/classify")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client_for(&server.url())
            .classify(&EmailId::from(1))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_not_found_is_http_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/emails/")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server.url()).list_emails().await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/emails/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"not": "a list"}"#)
            .create_async()
            .await;

        let err = client_for(&server.url()).list_emails().await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .list_emails()
            .await
            .unwrap_err();
        assert!(err.is_network());
    }
}
