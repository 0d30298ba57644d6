//! Twilio API client for outbound SMS.
//!
//! Uses the 2010-04-01 REST API: https://www.twilio.com/docs/messaging/api/message-resource

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

impl Client {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }

    /// Queue an SMS for delivery. Returns the message resource Twilio created.
    pub async fn send_message(
        &self,
        to: &str,
        from: &str,
        body: &str,
    ) -> Result<MessageResponse, Error> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&SendMessageRequest { to, from, body })
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

#[derive(Debug)]
pub enum Error {
    Request(String),
    Api { status: u16, message: String },
    Parse(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Request(e) => write!(f, "request failed: {}", e),
            Error::Api { status, message } => write!(f, "API error {}: {}", status, message),
            Error::Parse(e) => write!(f, "parse error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{basic_auth, body_string_contains, header, method, path},
    };

    #[test]
    fn messages_url_includes_account_sid() {
        let client = Client::new("AC123", "token");

        assert_eq!(
            client.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
    }

    fn client_for(server: &MockServer) -> Client {
        let mut client = Client::new("AC123", "token");
        client.base_url = server.uri();
        client
    }

    #[tokio::test]
    async fn send_message_posts_form_with_basic_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(basic_auth("AC123", "token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("To=%2B919876543210"))
            .and(body_string_contains("From=%2B15005550006"))
            .and(body_string_contains("Body=Your+verification+code"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "sid": "SM1", "status": "queued" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let message = client_for(&server)
            .send_message(
                "+919876543210",
                "+15005550006",
                "Your verification code is: 123456.",
            )
            .await
            .unwrap();

        assert_eq!(message.sid, "SM1");
        assert_eq!(message.status, "queued");
    }

    #[tokio::test]
    async fn send_message_rejects_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string("The 'To' number is not a valid phone number."),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_message("+10000000000", "+15005550006", "hello")
            .await
            .unwrap_err();

        let Error::Api { status, message } = err else {
            panic!("Expected Api error");
        };
        assert_eq!(status, 400);
        assert_eq!(message, "The 'To' number is not a valid phone number.");
    }

    #[tokio::test]
    async fn send_message_reports_unparseable_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .send_message("+919876543210", "+15005550006", "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = Error::Api {
            status: 400,
            message: "The 'To' number is not a valid phone number.".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "API error 400: The 'To' number is not a valid phone number."
        );
    }
}
