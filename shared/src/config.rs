//! Configuration management for Lambda functions.
//!
//! Both external integrations are optional: a missing section means the
//! corresponding side effect is skipped, it is never a startup error.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Calendar credentials, present only when fully configured.
    pub google: Option<GoogleCalendarConfig>,
    /// Email sender settings, present only when `FROM_EMAIL` is set.
    pub email: Option<EmailConfig>,
}

/// Google Calendar OAuth credentials.
#[derive(Debug, Clone)]
pub struct GoogleCalendarConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Long-lived refresh token exchanged for an access token per request.
    pub refresh_token: String,
    /// Target calendar, defaults to the account's primary calendar.
    pub calendar_id: String,
}

/// Email sender settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Verified sender address.
    pub from_email: String,
    /// Studio inbox for booking notifications; falls back to the sender.
    pub business_email: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let google = match (
            env::var("GOOGLE_CLIENT_ID"),
            env::var("GOOGLE_CLIENT_SECRET"),
            env::var("GOOGLE_REFRESH_TOKEN"),
        ) {
            (Ok(client_id), Ok(client_secret), Ok(refresh_token)) => Some(GoogleCalendarConfig {
                client_id,
                client_secret,
                refresh_token,
                calendar_id: env::var("GOOGLE_CALENDAR_ID")
                    .unwrap_or_else(|_| "primary".to_string()),
            }),
            _ => None,
        };

        let email = env::var("FROM_EMAIL").ok().map(|from_email| EmailConfig {
            business_email: env::var("BUSINESS_EMAIL").unwrap_or_else(|_| from_email.clone()),
            from_email,
        });

        Self { google, email }
    }
}
