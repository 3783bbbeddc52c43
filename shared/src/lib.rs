//! Shared library for the studio booking Lambda functions.
//!
//! This crate provides the booking domain (availability rules, request
//! types, service catalog), environment configuration, and the two
//! best-effort integration clients (Google Calendar, SES email) used by the
//! API Lambdas and the booking-form client.

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod mail;

pub use availability::{generate_time_slots, is_date_available, next_available_date, TimeSlot};
pub use booking::{Booking, BookingRequest, BookingResponse, ContactMessage};
pub use calendar::{CalendarClient, GoogleCalendar, NoopCalendar};
pub use catalog::{service_types, ServiceType};
pub use config::Config;
pub use error::{Error, Result};
pub use mail::{MailClient, NoopMailer, SesMailer};
