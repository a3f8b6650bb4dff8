//! Testimonial route handlers.

use axum::{Json, extract::State, http::StatusCode};
use boutique_core::{NewTestimonial, Rating, Testimonial};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Testimonial submission form.
#[derive(Debug, Deserialize)]
pub struct TestimonialForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub comment: String,
    pub rating: Option<i64>,
}

impl TryFrom<TestimonialForm> for NewTestimonial {
    type Error = AppError;

    fn try_from(form: TestimonialForm) -> Result<Self> {
        let name = form.name.trim();
        let country = form.country.trim();
        let comment = form.comment.trim();
        if name.is_empty() || country.is_empty() || comment.is_empty() {
            return Err(AppError::BadRequest(
                "name, country and comment are required".to_string(),
            ));
        }

        let rating = form
            .rating
            .map_or(Ok(Rating::default()), Rating::new)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            country: country.to_string(),
            comment: comment.to_string(),
            rating,
        })
    }
}

/// List testimonials.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    state
        .blocking(|state| Ok(state.testimonials().list()?))
        .await
        .map(Json)
}

/// Submit a testimonial.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<TestimonialForm>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    let entry = NewTestimonial::try_from(form)?;
    let created = state
        .blocking(move |state| Ok(state.testimonials().add(entry)?))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}
