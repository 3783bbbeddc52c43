//! Google Calendar integration.
//!
//! Creating the event is best-effort: callers log any `Err` and carry on
//! with a null event id. The client exchanges the configured refresh token
//! for an access token on each call, then inserts a single fixed-length
//! event on the studio calendar.

use async_trait::async_trait;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::sast;
use crate::booking::Booking;
use crate::config::GoogleCalendarConfig;
use crate::{Error, Result};

/// Every session blocks out a fixed two hours on the calendar.
pub const SESSION_HOURS: i64 = 2;

/// IANA zone sent alongside the fixed-offset timestamps.
const CALENDAR_TIME_ZONE: &str = "Africa/Johannesburg";

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Bound on each outbound call so a slow upstream cannot hold the booking
/// request open indefinitely.
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Calendar capability consumed by the booking handler.
#[async_trait]
pub trait CalendarClient: Send + Sync {
    /// Create an event for the booking, returning the provider's event id.
    /// `Ok(None)` means the integration is disabled.
    async fn create_event(&self, booking: &Booking) -> Result<Option<String>>;
}

/// No-op client selected when Google Calendar is not configured.
pub struct NoopCalendar;

#[async_trait]
impl CalendarClient for NoopCalendar {
    async fn create_event(&self, _booking: &Booking) -> Result<Option<String>> {
        debug!("Google Calendar not configured, skipping calendar event creation");
        Ok(None)
    }
}

/// Google Calendar event payload.
#[derive(Debug, Serialize)]
struct CalendarEvent {
    summary: String,
    description: String,
    location: String,
    start: EventTime,
    end: EventTime,
    attendees: Vec<Attendee>,
}

#[derive(Debug, Serialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "timeZone")]
    time_zone: &'static str,
}

#[derive(Debug, Serialize)]
struct Attendee {
    email: String,
}

#[derive(Debug, Deserialize)]
struct InsertedEvent {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google Calendar client using the OAuth refresh-token flow.
pub struct GoogleCalendar {
    http_client: reqwest::Client,
    config: GoogleCalendarConfig,
}

impl GoogleCalendar {
    pub fn new(config: GoogleCalendarConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Exchange the refresh token for a short-lived access token.
    async fn refresh_access_token(&self) -> Result<String> {
        let params = [
            ("refresh_token", self.config.refresh_token.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .http_client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Calendar(format!(
                "Token refresh failed: {}",
                error_text
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }
}

#[async_trait]
impl CalendarClient for GoogleCalendar {
    async fn create_event(&self, booking: &Booking) -> Result<Option<String>> {
        let access_token = self.refresh_access_token().await?;
        let event = event_payload(booking)?;

        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(&self.config.calendar_id)
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&event)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Calendar(format!(
                "Calendar API error: {}",
                error_text
            )));
        }

        let inserted: InsertedEvent = response.json().await?;
        debug!(event_id = ?inserted.id, "Calendar event created");
        Ok(inserted.id)
    }
}

/// Start and end of the booked session in studio time.
pub fn session_window(
    date: &str,
    time: &str,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| Error::Calendar(format!("Invalid booking date: {}", e)))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| Error::Calendar(format!("Invalid booking time: {}", e)))?;

    let start = date
        .and_time(time)
        .and_local_timezone(sast())
        .single()
        .ok_or_else(|| Error::Calendar("Ambiguous booking time".to_string()))?;

    Ok((start, start + Duration::hours(SESSION_HOURS)))
}

fn event_payload(booking: &Booking) -> Result<CalendarEvent> {
    let (start, end) = session_window(&booking.date, &booking.time)?;

    let mut description = format!(
        "Service: {}\nClient: {}\nEmail: {}\nPhone: {}\nLocation: {}",
        booking.service_type, booking.full_name, booking.email, booking.phone, booking.location
    );
    if let Some(requests) = &booking.special_requests {
        description.push_str("\n\nSpecial Requests:\n");
        description.push_str(requests);
    }

    Ok(CalendarEvent {
        summary: format!("{} - {}", booking.service_type, booking.full_name),
        description,
        location: booking.location.clone(),
        start: EventTime {
            date_time: start.to_rfc3339(),
            time_zone: CALENDAR_TIME_ZONE,
        },
        end: EventTime {
            date_time: end.to_rfc3339(),
            time_zone: CALENDAR_TIME_ZONE,
        },
        attendees: vec![Attendee {
            email: booking.email.clone(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking {
            service_type: "portrait-gold".to_string(),
            date: "2025-03-10".to_string(),
            time: "14:00".to_string(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "0821234567".to_string(),
            location: "Paarl".to_string(),
            special_requests: None,
        }
    }

    #[test]
    fn session_spans_two_hours_in_studio_time() {
        let (start, end) = session_window("2025-03-10", "14:00").unwrap();
        assert_eq!(start.to_rfc3339(), "2025-03-10T14:00:00+02:00");
        assert_eq!(end.to_rfc3339(), "2025-03-10T16:00:00+02:00");
    }

    #[test]
    fn malformed_date_or_time_is_rejected() {
        assert!(session_window("not-a-date", "14:00").is_err());
        assert!(session_window("2025-03-10", "2pm").is_err());
    }

    #[test]
    fn event_carries_booking_details() {
        let event = event_payload(&booking()).unwrap();
        assert_eq!(event.summary, "portrait-gold - Jane Doe");
        assert_eq!(event.location, "Paarl");
        assert_eq!(event.attendees.len(), 1);
        assert_eq!(event.attendees[0].email, "jane@example.com");
        assert!(event.description.contains("Client: Jane Doe"));
        assert!(!event.description.contains("Special Requests"));
        assert_eq!(event.start.time_zone, "Africa/Johannesburg");
    }

    #[test]
    fn special_requests_appear_in_description() {
        let mut booking = booking();
        booking.special_requests = Some("golden hour please".to_string());
        let event = event_payload(&booking).unwrap();
        assert!(event
            .description
            .ends_with("Special Requests:\ngolden hour please"));
    }

    #[tokio::test]
    async fn noop_client_returns_no_event_id() {
        let id = NoopCalendar.create_event(&booking()).await.unwrap();
        assert_eq!(id, None);
    }
}
