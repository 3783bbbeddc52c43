//! Booking domain types.
//!
//! A booking is entirely ephemeral: built by the form, sent once to the
//! submission endpoint, handed to the calendar/email integrations, and
//! dropped. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Incoming booking payload, as sent by the booking form.
///
/// Every field is optional at the wire level so that a structurally
/// incomplete request still deserializes; [`BookingRequest::into_booking`]
/// decides between a 400 and further processing. `agreedToTerms` is a
/// client-side gate and is not re-checked here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub service_type: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub special_requests: Option<String>,
    pub agreed_to_terms: Option<bool>,
}

/// A structurally complete booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub service_type: String,
    pub date: String,
    pub time: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub special_requests: Option<String>,
}

/// Response body for a created booking.
///
/// `calendarEventId` is serialized even when null: a booking counts as
/// created as soon as the request shape is valid, whether or not the
/// calendar write happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub message: String,
    pub calendar_event_id: Option<String>,
}

impl BookingRequest {
    /// Promote the wire payload to a [`Booking`], or report which required
    /// fields are absent. An empty string counts as absent.
    pub fn into_booking(self) -> Result<Booking, Vec<&'static str>> {
        let mut missing = Vec::new();

        fn required(
            value: Option<String>,
            name: &'static str,
            missing: &mut Vec<&'static str>,
        ) -> String {
            match value {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        }

        let booking = Booking {
            service_type: required(self.service_type, "serviceType", &mut missing),
            date: required(self.date, "date", &mut missing),
            time: required(self.time, "time", &mut missing),
            full_name: required(self.full_name, "fullName", &mut missing),
            email: required(self.email, "email", &mut missing),
            phone: required(self.phone, "phone", &mut missing),
            location: required(self.location, "location", &mut missing),
            special_requests: self.special_requests.filter(|s| !s.is_empty()),
        };

        if missing.is_empty() {
            Ok(booking)
        } else {
            Err(missing)
        }
    }
}

/// Contact form payload, forwarded as a single email to the studio.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Please select a subject"))]
    pub subject: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> BookingRequest {
        serde_json::from_str(
            r#"{
                "serviceType": "portrait-gold",
                "date": "2025-03-10",
                "time": "14:00",
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "phone": "0821234567",
                "location": "Paarl",
                "agreedToTerms": true
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn complete_request_promotes() {
        let booking = full_request().into_booking().unwrap();
        assert_eq!(booking.service_type, "portrait-gold");
        assert_eq!(booking.time, "14:00");
        assert_eq!(booking.special_requests, None);
    }

    #[test]
    fn each_missing_field_is_reported() {
        for field in [
            "serviceType",
            "date",
            "time",
            "fullName",
            "email",
            "phone",
            "location",
        ] {
            let mut value: serde_json::Value =
                serde_json::to_value(full_request()).unwrap();
            value.as_object_mut().unwrap().remove(field);
            let request: BookingRequest = serde_json::from_value(value).unwrap();
            let missing = request.into_booking().unwrap_err();
            assert_eq!(missing, vec![field]);
        }
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let mut request = full_request();
        request.phone = Some(String::new());
        assert_eq!(request.into_booking().unwrap_err(), vec!["phone"]);
    }

    #[test]
    fn empty_special_requests_are_dropped() {
        let mut request = full_request();
        request.special_requests = Some(String::new());
        assert_eq!(request.into_booking().unwrap().special_requests, None);

        let mut request = full_request();
        request.special_requests = Some("golden hour please".to_string());
        assert_eq!(
            request.into_booking().unwrap().special_requests.as_deref(),
            Some("golden hour please")
        );
    }

    #[test]
    fn consent_is_not_required_server_side() {
        let mut request = full_request();
        request.agreed_to_terms = None;
        assert!(request.into_booking().is_ok());
    }

    #[test]
    fn response_serializes_null_event_id() {
        let response = BookingResponse {
            message: "Booking created successfully".to_string(),
            calendar_event_id: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"message":"Booking created successfully","calendarEventId":null}"#
        );
    }

    #[test]
    fn contact_message_validates_fields() {
        use validator::Validate;

        let message = ContactMessage {
            name: "J".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            subject: String::new(),
            message: "too short".to_string(),
        };
        let errors = message.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("subject"));
        assert!(fields.contains_key("message"));
    }
}
