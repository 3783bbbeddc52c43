//! Booking form state machine.
//!
//! The wizard is a validation gate, not a strict lock: every section is
//! editable at any time, and completeness is only enforced when the user
//! submits. Selecting a new date clears the chosen time, because the time
//! choice is scoped to the date it was picked for.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

use shared::availability::{
    generate_time_slots, is_date_available_on, time_slots_for_on, today, TimeSlot,
};
use shared::booking::{BookingRequest, BookingResponse};
use shared::catalog::{service_types, ServiceType};

/// Submission capability; the HTTP client implements this, tests fake it.
#[async_trait]
pub trait SubmitBooking: Send + Sync {
    async fn submit(&self, request: &BookingRequest) -> shared::Result<BookingResponse>;
}

/// Outcome indicator shown next to the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Succeeded,
    Failed,
}

/// Where the user currently is in the flow, derived from the form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    SelectingService,
    SelectingDate,
    SelectingTime,
    EnteringDetails,
    Submitting,
    Succeeded,
    Failed,
}

/// Why a submission attempt did not go out.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A previous submission has not resolved yet.
    #[error("a submission is already in flight")]
    InFlight,
    /// Structural validation failed; nothing was sent.
    #[error("validation failed")]
    Invalid(ValidationErrors),
}

/// Validatable snapshot of the form fields.
#[derive(Debug, Clone, Validate)]
struct FormData {
    #[validate(length(min = 1, message = "Please select a service"))]
    service_type: String,
    #[validate(length(min = 1, message = "Please select a date"))]
    date: String,
    #[validate(length(min = 1, message = "Please select a time"))]
    time: String,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    full_name: String,
    #[validate(email(message = "Invalid email address"))]
    email: String,
    #[validate(length(min = 10, message = "Please provide a valid phone number"))]
    phone: String,
    #[validate(length(min = 2, message = "Please provide a location"))]
    location: String,
    #[validate(custom(function = validate_consent))]
    agreed_to_terms: bool,
}

fn validate_consent(agreed: &bool) -> Result<(), ValidationError> {
    if *agreed {
        Ok(())
    } else {
        let mut error = ValidationError::new("consent");
        error.message = Some("You must agree to the terms and conditions".into());
        Err(error)
    }
}

/// First validation message per field, keyed by field name.
pub fn errors_by_field(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .iter()
        .filter_map(|(field, errors)| {
            errors.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

const DEFAULT_LOCATION: &str = "Paarl, Western Cape";

/// The booking form.
pub struct BookingForm {
    today: NaiveDate,
    service_type: String,
    date: Option<NaiveDate>,
    time: String,
    full_name: String,
    email: String,
    phone: String,
    location: String,
    special_requests: String,
    agreed_to_terms: bool,
    in_flight: bool,
    status: SubmitStatus,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::with_today(today())
    }

    /// Construct with an explicit "today", so the date rules are testable
    /// without the clock.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today,
            service_type: String::new(),
            date: None,
            time: String::new(),
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            location: DEFAULT_LOCATION.to_string(),
            special_requests: String::new(),
            agreed_to_terms: false,
            in_flight: false,
            status: SubmitStatus::Idle,
        }
    }

    /// Offerings to render in the service picker.
    pub fn services(&self) -> &'static [ServiceType] {
        service_types()
    }

    /// Slots to render for the selected date; empty until a date is chosen.
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        match self.date {
            Some(date) => time_slots_for_on(date, self.today),
            None => Vec::new(),
        }
    }

    pub fn select_service(&mut self, id: &str) {
        self.service_type = id.to_string();
    }

    /// Pick a date. Unavailable dates are refused, mirroring the calendar
    /// widget ignoring clicks on greyed-out days. A date change invalidates
    /// any previously chosen time.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        if !is_date_available_on(date, self.today) {
            return false;
        }
        self.date = Some(date);
        self.time.clear();
        true
    }

    /// Pick a time slot; only labels from the generated slot list count,
    /// and only once a date is selected.
    pub fn select_time(&mut self, time: &str) -> bool {
        if self.date.is_none() || !generate_time_slots().iter().any(|slot| slot == time) {
            return false;
        }
        self.time = time.to_string();
        true
    }

    pub fn set_full_name(&mut self, value: &str) {
        self.full_name = value.to_string();
    }

    pub fn set_email(&mut self, value: &str) {
        self.email = value.to_string();
    }

    pub fn set_phone(&mut self, value: &str) {
        self.phone = value.to_string();
    }

    pub fn set_location(&mut self, value: &str) {
        self.location = value.to_string();
    }

    pub fn set_special_requests(&mut self, value: &str) {
        self.special_requests = value.to_string();
    }

    pub fn set_agreed_to_terms(&mut self, agreed: bool) {
        self.agreed_to_terms = agreed;
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn step(&self) -> FormStep {
        if self.in_flight {
            return FormStep::Submitting;
        }
        match self.status {
            SubmitStatus::Succeeded => FormStep::Succeeded,
            SubmitStatus::Failed => FormStep::Failed,
            SubmitStatus::Idle => {
                if self.service_type.is_empty() {
                    FormStep::SelectingService
                } else if self.date.is_none() {
                    FormStep::SelectingDate
                } else if self.time.is_empty() {
                    FormStep::SelectingTime
                } else {
                    FormStep::EnteringDetails
                }
            }
        }
    }

    /// Dismiss the success/failure indicator.
    pub fn acknowledge_status(&mut self) {
        self.status = SubmitStatus::Idle;
    }

    fn snapshot(&self) -> FormData {
        FormData {
            service_type: self.service_type.clone(),
            date: self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            time: self.time.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            location: self.location.clone(),
            agreed_to_terms: self.agreed_to_terms,
        }
    }

    /// Run structural validation without submitting.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.snapshot().validate()
    }

    /// Validate and mark the form in flight, yielding the wire request.
    ///
    /// Refused while a previous submission is unresolved; failing
    /// validation never produces a request, so nothing reaches the network.
    pub fn begin_submit(&mut self) -> Result<BookingRequest, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }

        let data = self.snapshot();
        data.validate().map_err(SubmitError::Invalid)?;

        self.in_flight = true;
        self.status = SubmitStatus::Idle;

        Ok(BookingRequest {
            service_type: Some(data.service_type),
            date: Some(data.date),
            time: Some(data.time),
            full_name: Some(data.full_name),
            email: Some(data.email),
            phone: Some(data.phone),
            location: Some(data.location),
            special_requests: if self.special_requests.is_empty() {
                None
            } else {
                Some(self.special_requests.clone())
            },
            agreed_to_terms: Some(data.agreed_to_terms),
        })
    }

    /// Record the outcome of the in-flight submission.
    ///
    /// Success resets every field for a fresh booking; failure keeps the
    /// state populated so the user can resubmit as-is.
    pub fn finish_submit(&mut self, outcome: shared::Result<BookingResponse>) {
        self.in_flight = false;
        match outcome {
            Ok(response) => {
                debug!(event_id = ?response.calendar_event_id, "Booking submitted");
                *self = Self::with_today(self.today);
                self.status = SubmitStatus::Succeeded;
            }
            Err(_) => {
                self.status = SubmitStatus::Failed;
            }
        }
    }

    /// Submit through the given API, driving the full in-flight cycle.
    pub async fn submit<S: SubmitBooking + ?Sized>(
        &mut self,
        api: &S,
    ) -> Result<SubmitStatus, SubmitError> {
        let request = self.begin_submit()?;
        let outcome = api.submit(&request).await;
        self.finish_submit(outcome);
        Ok(self.status)
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}
