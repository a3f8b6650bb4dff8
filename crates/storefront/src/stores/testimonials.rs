//! Customer testimonials: a fixed seed wall plus submitted entries.

use std::collections::HashSet;

use boutique_core::{NewTestimonial, Testimonial, TestimonialId};
use tracing::instrument;

use super::collection::{Collection, MigrationOutcome, Outcome};
use super::{StoreError, TESTIMONIALS_KEY, seed};
use crate::storage::SharedStorage;

#[derive(Debug)]
pub struct TestimonialStore {
    seed: Vec<Testimonial>,
    submitted: Collection<Testimonial>,
}

impl TestimonialStore {
    /// A store showing the launch testimonials ahead of submitted ones.
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self {
            seed: seed::testimonials(),
            submitted: Collection::new(storage, TESTIMONIALS_KEY),
        }
    }

    /// Rewrite the submitted testimonials in the current blob layout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the blob cannot be read or written.
    pub fn migrate(&self) -> Result<MigrationOutcome, StoreError> {
        self.submitted.migrate()
    }

    /// Seed testimonials, then submitted ones whose id is not already
    /// listed. Without durable storage only the seed is returned.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored testimonials cannot be decoded.
    pub fn list(&self) -> Result<Vec<Testimonial>, StoreError> {
        let submitted = match self.submitted.read() {
            Err(StoreError::Unavailable) => Vec::new(),
            other => other?,
        };
        Ok(merge(self.seed.clone(), submitted))
    }

    /// Store a new testimonial under a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` without durable storage, or another
    /// `StoreError` if the collection cannot be read or written.
    #[instrument(skip(self, entry), fields(name = %entry.name))]
    pub fn add(&self, entry: NewTestimonial) -> Result<Testimonial, StoreError> {
        let created = self.submitted.modify(|items| {
            let taken: HashSet<&TestimonialId> =
                self.seed.iter().chain(items.iter()).map(|t| &t.id).collect();
            let id = loop {
                let candidate = TestimonialId::generate();
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            let created = entry.with_id(id);
            items.push(created.clone());
            Outcome::Write(created)
        })?;

        tracing::info!(testimonial_id = %created.id, "Testimonial added");
        Ok(created)
    }
}

fn merge(seed: Vec<Testimonial>, submitted: Vec<Testimonial>) -> Vec<Testimonial> {
    let mut seen: HashSet<TestimonialId> = seed.iter().map(|t| t.id.clone()).collect();
    let mut listed = seed;
    for entry in submitted {
        if seen.insert(entry.id.clone()) {
            listed.push(entry);
        }
    }
    listed
}
