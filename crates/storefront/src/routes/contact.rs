//! Contact form route handlers.
//!
//! Messages are recorded in the log for the shop staff; nothing is stored.

use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submit the contact form.
#[instrument(skip(form), fields(email = %form.email))]
pub async fn submit(Json(form): Json<ContactForm>) -> Result<Json<ContactResponse>> {
    let email = form.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address.".to_string(),
        ));
    }

    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and message are required.".to_string(),
        ));
    }

    tracing::info!(
        email = %email,
        name = form.name.trim(),
        phone = form.phone.as_deref().unwrap_or("").trim(),
        message = form.message.trim(),
        "Contact message received"
    );

    Ok(Json(ContactResponse {
        success: true,
        message: Some("Votre message a bien été envoyé.".to_string()),
    }))
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
