//! Client-side booking form.
//!
//! An explicit state machine for the multi-step booking wizard (service,
//! date, time, contact details, consent) plus the HTTP submitter that posts
//! the finished request to the booking endpoint. The form owns the only
//! concurrency guarantee in the system: at most one in-flight submission
//! per form instance.

mod client;
mod form;

pub use client::HttpBookingApi;
pub use form::{errors_by_field, BookingForm, FormStep, SubmitBooking, SubmitError, SubmitStatus};
