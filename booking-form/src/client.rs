//! HTTP submitter posting the finished form to the booking endpoint.

use async_trait::async_trait;
use tracing::debug;

use shared::booking::{BookingRequest, BookingResponse};
use shared::{Error, Result};

use crate::form::SubmitBooking;

/// Bound on the submission call; the form surfaces a timeout as a failed
/// submission the user can retry.
const HTTP_TIMEOUT_SECS: u64 = 10;

/// Submits bookings over HTTP.
pub struct HttpBookingApi {
    http_client: reqwest::Client,
    endpoint: String,
}

impl HttpBookingApi {
    /// `endpoint` is the full booking URL, e.g. `https://example.com/api/booking`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SubmitBooking for HttpBookingApi {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingResponse> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"]
                .as_str()
                .unwrap_or("unexpected response")
                .to_string();
            return Err(if status.as_u16() == 400 {
                Error::Validation(message)
            } else {
                Error::Internal(message)
            });
        }

        let booking_response: BookingResponse = response.json().await?;
        debug!(event_id = ?booking_response.calendar_event_id, "Booking accepted");
        Ok(booking_response)
    }
}
