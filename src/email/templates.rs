use chrono::{DateTime, Utc};

use crate::models::NewContact;

pub fn render_subject(contact: &NewContact) -> String {
    format!("New Contact Form Submission – {}", contact.name)
}

pub fn render_body(contact: &NewContact, submitted_at: DateTime<Utc>) -> String {
    let rule = "━".repeat(30);
    let phone = or_na(&contact.phone);
    let company = or_na(&contact.company);
    let service = or_na(&contact.service);

    format!(
        "New contact form submission received on the website.

{rule}
  Name     : {name}
  Email    : {email}
  Phone    : {phone}
  Company  : {company}
  Service  : {service}
{rule}

Message:
{message}

{rule}
Submitted at: {submitted} UTC",
        name = contact.name,
        email = contact.email,
        message = contact.message,
        submitted = submitted_at.format("%Y-%m-%d %H:%M:%S"),
    )
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}
