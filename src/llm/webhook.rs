use reqwest::Client as HttpClient;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use log::debug;
use crate::error::AgentError;

const SERVICE: &str = "n8n workflow";

/// Client for an external workflow webhook (n8n) that produces chat replies.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: HttpClient,
    url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct WebhookRequest<'a> {
    message: &'a str,
    model: &'a str,
}

/// First non-empty string among `response` then `result`. Other field types are ignored.
fn extract_reply(body: &JsonValue) -> Option<String> {
    ["response", "result"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(JsonValue::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

impl WebhookClient {
    pub fn new(http: HttpClient, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http,
            url: url.into(),
            timeout,
        }
    }

    pub async fn send(&self, message: &str, model: &str) -> Result<String, AgentError> {
        debug!("POST {} model={}", self.url, model);
        let resp = self.http
            .post(&self.url)
            .json(&WebhookRequest { message, model })
            .timeout(self.timeout)
            .send().await?;
        if !resp.status().is_success() {
            return Err(AgentError::UpstreamStatus { service: SERVICE, status: resp.status() });
        }

        // An empty or non-object body carries no reply.
        let bytes = resp.bytes().await?;
        let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
        extract_reply(&body).ok_or(AgentError::EmptyWebhookResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn client(server: &MockServer) -> WebhookClient {
        WebhookClient::new(HttpClient::new(), server.url("/webhook/chat"), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn prefers_response_over_result() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/webhook/chat")
                    .json_body(json!({"message": "hi", "model": "llama2"}));
                then.status(200).json_body(json!({"response": "A", "result": "B"}));
            })
            .await;

        assert_eq!(client(&server).send("hi", "llama2").await.unwrap(), "A");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn falls_back_to_result_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(200).json_body(json!({"response": "", "result": "B"}));
            })
            .await;

        assert_eq!(client(&server).send("hi", "llama2").await.unwrap(), "B");
    }

    #[tokio::test]
    async fn non_string_result_does_not_hide_response() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(200).json_body(json!({"response": "X", "result": {"ok": true}}));
            })
            .await;

        assert_eq!(client(&server).send("hi", "llama2").await.unwrap(), "X");
    }

    #[tokio::test]
    async fn non_string_response_falls_through_to_result() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(200).json_body(json!({"response": 42, "result": "B"}));
            })
            .await;

        assert_eq!(client(&server).send("hi", "llama2").await.unwrap(), "B");
    }

    #[tokio::test]
    async fn slow_webhook_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({"response": "too late"}));
            })
            .await;

        let client = WebhookClient::new(
            HttpClient::new(),
            server.url("/webhook/chat"),
            Duration::from_millis(50)
        );
        let err = client.send("hi", "llama2").await.unwrap_err();
        match err {
            AgentError::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {}", other),
        }
    }

    #[tokio::test]
    async fn empty_body_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(200).body("");
            })
            .await;

        let err = client(&server).send("hi", "llama2").await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyWebhookResponse));
    }

    #[tokio::test]
    async fn server_error_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/webhook/chat");
                then.status(502);
            })
            .await;

        let err = client(&server).send("hi", "llama2").await.unwrap_err();
        assert!(matches!(err, AgentError::UpstreamStatus { .. }));
    }
}
