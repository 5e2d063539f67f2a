//! Notification message formatting
//!
//! Pure builders turning site submissions into the HTML messages posted to
//! the team chat. Telegram renders the `<b>`/`<i>` tags; everything else is
//! plain text.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A contact form submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Contact details attached to a tech spec submission
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One answered section of a tech spec
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecAnswer {
    pub question: String,
    pub answer: String,
}

/// A submitted technical specification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TechSpecSubmission {
    pub contact: Option<ContactInfo>,
    pub answers: Vec<SpecAnswer>,
}

/// Build the contact form notification message
pub fn contact_form_notification(form: &ContactForm) -> String {
    let name = form.name.as_deref().unwrap_or("Not provided");
    let email = form.email.as_deref().unwrap_or("Not provided");
    let message = form.message.as_deref().unwrap_or("No message");

    let mut text = String::from("<b>📩 New Contact Form Submission</b>\n\n");
    text.push_str(&format!("<b>Name:</b> {name}\n"));
    text.push_str(&format!("<b>Email:</b> {email}\n"));
    text.push_str(&format!("<b>Message:</b>\n{message}\n"));
    text.push_str(&format!("\n<i>Submitted at: {}</i>", timestamp()));
    text
}

/// Build the tech spec notification message
pub fn tech_spec_notification(spec: &TechSpecSubmission) -> String {
    let mut text = String::from("<b>🔔 New Technical Specification Submitted</b>\n\n");

    if let Some(contact) = &spec.contact {
        text.push_str("<b>📋 Contact Information:</b>\n");
        if let Some(name) = contact.name.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("<b>Name:</b> {name}\n"));
        }
        if let Some(email) = contact.email.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("<b>Email:</b> {email}\n"));
        }
        if let Some(phone) = contact.phone.as_deref().filter(|s| !s.is_empty()) {
            text.push_str(&format!("<b>Phone:</b> {phone}\n"));
        }
        text.push('\n');
    }

    text.push_str("<b>═══════════ TECHNICAL SPECIFICATION ═══════════</b>\n\n");

    for (i, answer) in spec.answers.iter().enumerate() {
        text.push_str(&format!("<b>{}. {}</b>\n\n", i + 1, answer.question));

        if answer.answer.trim().is_empty() {
            text.push_str("   <i>No details provided</i>\n\n");
        } else {
            let indented = answer.answer.replace('\n', "\n   ");
            text.push_str(&format!("   {indented}\n\n"));
        }
    }

    text.push_str("<b>═════════════════════════════════════════</b>\n");
    text.push_str(&format!("<i>Submitted at: {}</i>", timestamp()));
    text
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
