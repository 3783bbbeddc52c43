//! Contact Lambda - handles POST /contact.
//!
//! Validates the contact form message and forwards it to the studio inbox
//! as a single best-effort email.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde_json::json;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use validator::Validate;

use shared::booking::ContactMessage;
use shared::config::Config;
use shared::http::{error_response, json_response};
use shared::mail::{MailClient, NoopMailer, SesMailer};

/// Application state
struct AppState {
    mailer: Box<dyn MailClient>,
}

impl AppState {
    async fn from_env() -> Self {
        let config = Config::from_env();

        let mailer: Box<dyn MailClient> = match config.email {
            Some(email) => Box::new(SesMailer::new(email).await),
            None => {
                warn!("Email service not configured, contact emails disabled");
                Box::new(NoopMailer)
            }
        };

        Self { mailer }
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Contact request: {} {}", method, path);

    match (method, path) {
        ("POST", "/contact") => send_message(&state, event.body()).await,
        _ => error_response(404, "Not found"),
    }
}

async fn send_message(state: &AppState, body: &Body) -> Result<Response<Body>, Error> {
    let message: ContactMessage = match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(error = %e, "Contact error");
            return error_response(500, "Failed to send message");
        }
    };

    if let Err(validation_errors) = message.validate() {
        info!("Contact message rejected by validation");
        return json_response(
            400,
            &json!({
                "error": "Validation failed",
                "fields": validation_errors,
            }),
        );
    }

    info!(subject = %message.subject, "Forwarding contact message");

    // Best-effort: the sender still gets a success, matching the booking
    // endpoint's availability-over-consistency policy.
    if let Err(e) = state.mailer.send_contact_email(&message).await {
        error!(error = %e, "Contact email sending error");
    }

    json_response(200, &json!({ "message": "Message sent successfully" }))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::from_env().await);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_state() -> Arc<AppState> {
        Arc::new(AppState {
            mailer: Box::new(NoopMailer),
        })
    }

    fn post_contact(body: &str) -> Request {
        lambda_http::http::Request::builder()
            .method("POST")
            .uri("/contact")
            .body(Body::from(body))
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        serde_json::from_slice(response.body().as_ref()).unwrap()
    }

    #[tokio::test]
    async fn valid_message_succeeds_without_email_configured() {
        let payload = r#"{
            "name": "Sam Smith",
            "email": "sam@example.com",
            "subject": "Wedding enquiry",
            "message": "Do you cover weddings in Stellenbosch?"
        }"#;

        let response = handler(noop_state(), post_contact(payload)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response)["message"], "Message sent successfully");
    }

    #[tokio::test]
    async fn invalid_message_yields_field_errors() {
        let payload = r#"{
            "name": "S",
            "email": "not-an-email",
            "subject": "",
            "message": "hi"
        }"#;

        let response = handler(noop_state(), post_contact(payload)).await.unwrap();

        assert_eq!(response.status(), 400);
        let body = body_json(&response);
        assert_eq!(body["error"], "Validation failed");
        for field in ["name", "email", "subject", "message"] {
            assert!(body["fields"][field].is_array(), "missing errors for {field}");
        }
    }

    #[tokio::test]
    async fn malformed_json_yields_500() {
        let response = handler(noop_state(), post_contact("{oops"))
            .await
            .unwrap();

        assert_eq!(response.status(), 500);
        assert_eq!(body_json(&response)["error"], "Failed to send message");
    }
}
