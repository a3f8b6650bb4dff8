//! Testimonial listing command.

use boutique_storefront::storage::SharedStorage;
use boutique_storefront::stores::TestimonialStore;

use super::{CliError, create_table};

/// Render the testimonial wall, seed entries first.
///
/// # Errors
///
/// Returns `CliError::Store` if the stored testimonials cannot be read.
pub fn run(storage: &SharedStorage) -> Result<String, CliError> {
    let testimonials = TestimonialStore::new(storage.clone()).list()?;

    let mut table = create_table(&["Name", "Country", "Rating", "Comment"]);
    for testimonial in &testimonials {
        table.add_row(vec![
            testimonial.name.clone(),
            testimonial.country.clone(),
            "★".repeat(usize::from(testimonial.rating.stars())),
            testimonial.comment.clone(),
        ]);
    }
    Ok(table.to_string())
}
