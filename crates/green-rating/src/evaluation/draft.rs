use super::catalog::CriteriaCatalog;
use super::domain::{EvaluationPayload, EvaluationRequest, ValidationError};
use super::review::{ReviewState, ReviewTransition};
use super::selection::SelectionSet;

/// Client-side working copy of an evaluation before it is submitted.
///
/// A draft owns its selections and review flags; [`ProjectDraft::submit`]
/// applies the same checks the browser form does and produces the immutable
/// request that crosses the HTTP boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub project_name: String,
    pub project_type: String,
    pub area_sqm: f64,
    selections: SelectionSet,
    review: ReviewState,
}

impl ProjectDraft {
    pub fn new(catalog: &CriteriaCatalog) -> Self {
        Self {
            project_name: String::new(),
            project_type: String::new(),
            area_sqm: 0.0,
            selections: SelectionSet::new(catalog),
            review: ReviewState::new(catalog),
        }
    }

    pub fn open_category(&mut self, category_id: &str) -> ReviewTransition {
        self.review.mark_viewed(category_id)
    }

    pub fn set_selected(&mut self, item_id: &str, selected: bool) {
        self.selections.set(item_id, selected);
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn review(&self) -> &ReviewState {
        &self.review
    }

    pub fn submit(&self, catalog: &CriteriaCatalog) -> Result<EvaluationRequest, ValidationError> {
        // Field errors take precedence over the review gate, matching the form.
        let request = self.payload(catalog).validate()?;
        if !self.review.can_submit(catalog) {
            return Err(ValidationError::ReviewIncomplete {
                pending: self.review.pending(catalog),
            });
        }
        Ok(request)
    }

    /// Wire body the browser would send for this draft.
    pub fn payload(&self, catalog: &CriteriaCatalog) -> EvaluationPayload {
        EvaluationPayload {
            name: Some(self.project_name.clone()),
            project_type: Some(self.project_type.clone()),
            area: Some(self.area_sqm),
            inputs: Some(self.selections.to_inputs(catalog)),
            reviewed: Some(
                self.review
                    .viewed_ids()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
        }
    }
}
