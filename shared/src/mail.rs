//! Booking and contact email dispatch via SES.
//!
//! Sending is best-effort. A failed send is logged and swallowed; it never
//! fails the request that triggered it, and a failed client confirmation
//! does not stop the studio notification from being attempted.

use async_trait::async_trait;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::booking::{Booking, ContactMessage};
use crate::config::EmailConfig;
use crate::{Error, Result};

const STUDIO_NAME: &str = "Meraki Creative Media";

/// Mail capability consumed by the Lambda handlers.
#[async_trait]
pub trait MailClient: Send + Sync {
    /// Send the client confirmation and the studio notification.
    async fn send_booking_emails(&self, booking: &Booking) -> Result<()>;

    /// Forward a contact form message to the studio.
    async fn send_contact_email(&self, message: &ContactMessage) -> Result<()>;
}

/// No-op client selected when the email service is not configured.
pub struct NoopMailer;

#[async_trait]
impl MailClient for NoopMailer {
    async fn send_booking_emails(&self, _booking: &Booking) -> Result<()> {
        debug!("Email service not configured, skipping email notifications");
        Ok(())
    }

    async fn send_contact_email(&self, _message: &ContactMessage) -> Result<()> {
        debug!("Email service not configured, skipping contact email");
        Ok(())
    }
}

/// SES-backed mailer.
pub struct SesMailer {
    ses_client: aws_sdk_ses::Client,
    from_email: String,
    business_email: String,
}

impl SesMailer {
    pub async fn new(config: EmailConfig) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        Self {
            ses_client: aws_sdk_ses::Client::new(&aws_config),
            from_email: config.from_email,
            business_email: config.business_email,
        }
    }

    async fn send_html(&self, to_email: &str, subject: &str, html_body: &str) -> Result<String> {
        let subject = Content::builder()
            .data(subject)
            .charset("UTF-8")
            .build()
            .map_err(|e| Error::Email(format!("Failed to build subject: {}", e)))?;

        let html_content = Content::builder()
            .data(html_body)
            .charset("UTF-8")
            .build()
            .map_err(|e| Error::Email(format!("Failed to build body: {}", e)))?;

        let body_content = Body::builder().html(html_content).build();

        let message = Message::builder()
            .subject(subject)
            .body(body_content)
            .build();

        let destination = Destination::builder().to_addresses(to_email).build();

        let result = self
            .ses_client
            .send_email()
            .source(&self.from_email)
            .destination(destination)
            .message(message)
            .send()
            .await
            .map_err(|e| Error::Email(format!("Failed to send email: {}", e)))?;

        Ok(result.message_id().to_string())
    }
}

#[async_trait]
impl MailClient for SesMailer {
    async fn send_booking_emails(&self, booking: &Booking) -> Result<()> {
        let confirmation = confirmation_email(booking);
        match self
            .send_html(&booking.email, &confirmation.subject, &confirmation.html)
            .await
        {
            Ok(message_id) => info!(%message_id, "Booking confirmation sent"),
            Err(e) => error!(error = %e, "Failed to send booking confirmation"),
        }

        let notification = notification_email(booking);
        match self
            .send_html(
                &self.business_email,
                &notification.subject,
                &notification.html,
            )
            .await
        {
            Ok(message_id) => info!(%message_id, "Booking notification sent"),
            Err(e) => error!(error = %e, "Failed to send booking notification"),
        }

        Ok(())
    }

    async fn send_contact_email(&self, message: &ContactMessage) -> Result<()> {
        let email = contact_email(message);
        let message_id = self
            .send_html(&self.business_email, &email.subject, &email.html)
            .await?;
        info!(%message_id, "Contact email sent");
        Ok(())
    }
}

/// A composed outbound email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedEmail {
    pub subject: String,
    pub html: String,
}

/// Human-readable booking date, e.g. "Monday, March 10, 2025".
///
/// Falls back to the raw wire string if the date does not parse; the email
/// is still worth sending in that case.
fn format_booking_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Confirmation sent to the client.
pub fn confirmation_email(booking: &Booking) -> ComposedEmail {
    let special_requests = booking
        .special_requests
        .as_deref()
        .map(|requests| {
            format!(
                "<p><strong>Your Special Requests:</strong><br>{}</p>",
                requests.replace('\n', "<br>")
            )
        })
        .unwrap_or_default();

    let html = format!(
        r#"<h2>Thank you for booking with {studio}!</h2>
<p>Dear {name},</p>
<p>Your booking has been confirmed. Here are the details:</p>
<ul>
  <li><strong>Service:</strong> {service}</li>
  <li><strong>Date:</strong> {date}</li>
  <li><strong>Time:</strong> {time} SAST</li>
  <li><strong>Location:</strong> {location}</li>
</ul>
{special_requests}
<p>We'll contact you soon to discuss the details of your session.</p>
<p>Looking forward to working with you!</p>
<p>Best regards,<br>{studio}</p>"#,
        studio = STUDIO_NAME,
        name = booking.full_name,
        service = booking.service_type,
        date = format_booking_date(&booking.date),
        time = booking.time,
        location = booking.location,
        special_requests = special_requests,
    );

    ComposedEmail {
        subject: format!("Booking Confirmation - {}", STUDIO_NAME),
        html,
    }
}

/// Notification sent to the studio inbox.
pub fn notification_email(booking: &Booking) -> ComposedEmail {
    let special_requests = booking
        .special_requests
        .as_deref()
        .map(|requests| {
            format!(
                "<p><strong>Special Requests:</strong><br>{}</p>",
                requests.replace('\n', "<br>")
            )
        })
        .unwrap_or_default();

    let html = format!(
        r#"<h2>New Booking Received</h2>
<ul>
  <li><strong>Service:</strong> {service}</li>
  <li><strong>Client Name:</strong> {name}</li>
  <li><strong>Email:</strong> {email}</li>
  <li><strong>Phone:</strong> {phone}</li>
  <li><strong>Date:</strong> {date}</li>
  <li><strong>Time:</strong> {time} SAST</li>
  <li><strong>Location:</strong> {location}</li>
</ul>
{special_requests}"#,
        service = booking.service_type,
        name = booking.full_name,
        email = booking.email,
        phone = booking.phone,
        date = format_booking_date(&booking.date),
        time = booking.time,
        location = booking.location,
        special_requests = special_requests,
    );

    ComposedEmail {
        subject: format!(
            "New Booking: {} - {}",
            booking.service_type, booking.full_name
        ),
        html,
    }
}

/// Contact form message forwarded to the studio inbox.
pub fn contact_email(message: &ContactMessage) -> ComposedEmail {
    let phone = message
        .phone
        .as_deref()
        .map(|phone| format!("<li><strong>Phone:</strong> {}</li>", phone))
        .unwrap_or_default();

    let html = format!(
        r#"<h2>New Contact Message</h2>
<ul>
  <li><strong>Name:</strong> {name}</li>
  <li><strong>Email:</strong> {email}</li>
  {phone}
  <li><strong>Subject:</strong> {subject}</li>
</ul>
<p>{body}</p>"#,
        name = message.name,
        email = message.email,
        phone = phone,
        subject = message.subject,
        body = message.message.replace('\n', "<br>"),
    );

    ComposedEmail {
        subject: format!("New Enquiry: {}", message.subject),
        html,
    }
}
