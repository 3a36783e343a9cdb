use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection, timeout, or a body that isn't a Bot API reply.
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("telegram rejected the request: {0}")]
    Rejected(String),
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Result<Option<T>, RelayError> {
        if self.ok {
            Ok(self.result)
        } else {
            Err(RelayError::Rejected(
                self.description.unwrap_or_else(|| "no description".to_string()),
            ))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub description: Option<String>,
}

/// Minimal Bot API client: the two methods the relay needs.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl TelegramClient {
    pub fn new(api_base: &str, token: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    pub async fn send_message(&self, chat_id: &str, html: &str) -> Result<(), RelayError> {
        let reply: ApiResponse<serde_json::Value> = self
            .http
            .post(self.method_url("sendMessage"))
            .json(&json!({
                "chat_id": chat_id,
                "text": html,
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .json()
            .await?;
        reply.into_result().map(|_| ())
    }

    pub async fn get_chat(&self, chat_id: &str) -> Result<Chat, RelayError> {
        let reply: ApiResponse<Chat> = self
            .http
            .get(self.method_url("getChat"))
            .query(&[("chat_id", chat_id)])
            .send()
            .await?
            .json()
            .await?;
        Ok(reply.into_result()?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_joins_base_token_and_method() {
        let client = TelegramClient::new("https://api.telegram.org/", "123:abc").unwrap();
        assert_eq!(
            client.method_url("getChat"),
            "https://api.telegram.org/bot123:abc/getChat"
        );
    }

    #[test]
    fn rejected_reply_carries_description() {
        let reply: ApiResponse<Chat> =
            serde_json::from_str(r#"{"ok": false, "description": "Bad Request: chat not found"}"#)
                .unwrap();
        match reply.into_result() {
            Err(RelayError::Rejected(d)) => assert_eq!(d, "Bad Request: chat not found"),
            other => panic!("expected rejection, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn chat_without_description() {
        let reply: ApiResponse<Chat> =
            serde_json::from_str(r#"{"ok": true, "result": {"id": -100500, "type": "group"}}"#)
                .unwrap();
        let chat = reply.into_result().unwrap().unwrap();
        assert_eq!(chat.description, None);
    }
}
