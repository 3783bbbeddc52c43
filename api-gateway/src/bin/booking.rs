//! Booking Lambda - handles POST /booking.
//!
//! Validates the request shape, then performs two sequential best-effort
//! side effects: a Google Calendar event and the confirmation/notification
//! emails. A structurally valid request always returns 200, whatever the
//! integrations do; there is no retry and no idempotency key, so a client
//! that resubmits after a perceived timeout creates duplicate events and
//! emails.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use shared::booking::{BookingRequest, BookingResponse};
use shared::calendar::{CalendarClient, GoogleCalendar, NoopCalendar};
use shared::config::Config;
use shared::http::{error_response, json_response};
use shared::mail::{MailClient, NoopMailer, SesMailer};

/// Application state
struct AppState {
    calendar: Box<dyn CalendarClient>,
    mailer: Box<dyn MailClient>,
}

impl AppState {
    async fn from_env() -> Result<Self, Error> {
        let config = Config::from_env();

        let calendar: Box<dyn CalendarClient> = match config.google {
            Some(google) => Box::new(GoogleCalendar::new(google)?),
            None => {
                warn!("Google Calendar not configured, calendar events disabled");
                Box::new(NoopCalendar)
            }
        };

        let mailer: Box<dyn MailClient> = match config.email {
            Some(email) => Box::new(SesMailer::new(email).await),
            None => {
                warn!("Email service not configured, email notifications disabled");
                Box::new(NoopMailer)
            }
        };

        Ok(Self { calendar, mailer })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let method = event.method().as_str();
    let raw_path = event.uri().path();
    // Strip /api stage prefix if present (API Gateway REST API includes stage in path)
    let path = raw_path.strip_prefix("/api").unwrap_or(raw_path);

    info!("Booking request: {} {}", method, path);

    match (method, path) {
        ("POST", "/booking") => create_booking(&state, event.body()).await,
        _ => error_response(404, "Not found"),
    }
}

async fn create_booking(state: &AppState, body: &Body) -> Result<Response<Body>, Error> {
    // A body that fails to parse is an unexpected handler failure, not a
    // missing-fields rejection; 400 is reserved for the shape check below.
    let request: BookingRequest = match serde_json::from_slice(body.as_ref()) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!(error = %e, "Booking error");
            return error_response(500, "Failed to create booking");
        }
    };

    let booking = match request.into_booking() {
        Ok(booking) => booking,
        Err(missing) => {
            info!(?missing, "Booking request missing required fields");
            return error_response(400, "Missing required fields");
        }
    };

    info!(
        service = %booking.service_type,
        date = %booking.date,
        time = %booking.time,
        "Creating booking"
    );

    // Best-effort: a calendar failure degrades to a null event id.
    let calendar_event_id = match state.calendar.create_event(&booking).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Calendar event creation error");
            None
        }
    };

    // Best-effort and independent of the calendar outcome.
    if let Err(e) = state.mailer.send_booking_emails(&booking).await {
        error!(error = %e, "Email sending error");
    }

    json_response(
        200,
        &BookingResponse {
            message: "Booking created successfully".to_string(),
            calendar_event_id,
        },
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::from_env().await?);
    let state_clone = state.clone();

    run(service_fn(move |event| {
        let state = state_clone.clone();
        async move { handler(state, event).await }
    }))
    .await
}
