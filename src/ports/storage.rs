//! Storage port: Trait for persistent storage operations.
//!
//! This trait abstracts the storage backend (SQLite) from the application logic.

use crate::domain::{Assessment, DoctorReview};

/// A page of assessments with pagination metadata.
#[derive(Debug, Clone)]
pub struct AssessmentPage {
    /// Assessments in this page, newest first
    pub items: Vec<Assessment>,
    /// Total count of all assessments (for UI pagination)
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl AssessmentPage {
    #[must_use]
    pub fn new(items: Vec<Assessment>, total_count: usize, offset: usize, limit: usize) -> Self {
        let has_more = offset + items.len() < total_count;
        Self {
            items,
            total_count,
            offset,
            limit,
            has_more,
        }
    }

    /// Offset of the next page, if any.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        self.has_more.then(|| self.offset + self.limit)
    }

    /// Offset of the previous page, if any.
    #[must_use]
    pub fn prev_offset(&self) -> Option<usize> {
        (self.offset > 0).then(|| self.offset.saturating_sub(self.limit))
    }

    /// 1-based page number and page count, for display.
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        if self.limit == 0 {
            return (1, 1);
        }
        let page = self.offset / self.limit + 1;
        let pages = self.total_count.div_ceil(self.limit).max(1);
        (page, pages)
    }
}

/// Trait for local assessment storage.
pub trait Storage: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert or replace an assessment.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_assessment(&self, assessment: &Assessment) -> Result<(), Self::Error>;

    /// Load one assessment by id.
    ///
    /// # Returns
    /// `None` if no assessment has that id.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_assessment(&self, id: &str) -> Result<Option<Assessment>, Self::Error>;

    /// Load the newest assessments (up to `limit`).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_recent_assessments(&self, limit: usize) -> Result<Vec<Assessment>, Self::Error>;

    /// Load the newest assessments for one patient (up to `limit`).
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_patient_assessments(
        &self,
        patient_id: &str,
        limit: usize,
    ) -> Result<Vec<Assessment>, Self::Error>;

    /// Load every assessment, newest first.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_all_assessments(&self) -> Result<Vec<Assessment>, Self::Error>;

    /// Load assessments with offset pagination.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load_assessments_paginated(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<AssessmentPage, Self::Error>;

    /// Total number of stored assessments.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn count_assessments(&self) -> Result<usize, Self::Error>;

    /// Record a review against an assessment, updating its status.
    ///
    /// # Returns
    /// `false` if the assessment does not exist.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save_review(&self, assessment_id: &str, review: &DoctorReview) -> Result<bool, Self::Error>;

    /// Delete an assessment by id.
    ///
    /// # Returns
    /// `false` if nothing was deleted.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn delete_assessment(&self, id: &str) -> Result<bool, Self::Error>;

    /// Clear all data.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn clear_all(&self) -> Result<(), Self::Error>;
}
