use std::sync::Arc;

use tracing::{error, info, warn};

use super::catalog::CriteriaCatalog;
use super::domain::{EvaluationPayload, EvaluationRecord, EvaluationRequest, ValidationError};
use super::repository::{EvaluationRepository, RepositoryError};
use super::review::ReviewState;
use super::scoring::ScoringEngine;
use super::selection::SelectionInput;

/// Whether the server re-checks the client's review gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewPolicy {
    /// The gate is UX only; requests are scored regardless of review state.
    #[default]
    Advisory,
    /// Requests must list every category as reviewed.
    Enforced,
}

impl ReviewPolicy {
    pub fn from_enforced(enforced: bool) -> Self {
        if enforced {
            Self::Enforced
        } else {
            Self::Advisory
        }
    }
}

/// Service composing validation, the scoring engine, and the evaluation store.
pub struct EvaluationService<R> {
    catalog: Arc<CriteriaCatalog>,
    engine: ScoringEngine,
    repository: Arc<R>,
    review_policy: ReviewPolicy,
}

impl<R> EvaluationService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(catalog: Arc<CriteriaCatalog>, repository: Arc<R>, review_policy: ReviewPolicy) -> Self {
        let engine = ScoringEngine::new(catalog.clone());
        Self {
            catalog,
            engine,
            repository,
            review_policy,
        }
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    pub fn review_policy(&self) -> ReviewPolicy {
        self.review_policy
    }

    /// Validate, score, and persist a raw request body.
    pub fn evaluate(
        &self,
        payload: EvaluationPayload,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        let request = payload.validate().map_err(|err| {
            warn!(error = %err, "rejected evaluation payload");
            err
        })?;
        self.record(request)
    }

    /// Score an already validated request and append it to the store.
    pub fn record(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        self.check_review(&request)?;

        let outcome = self
            .engine
            .score(request.selections().iter().map(SelectionInput::as_pair));
        let result = request.into_result(outcome.total_points, outcome.rating);

        match self.repository.append(result) {
            Ok(record) => {
                info!(
                    id = record.id.0,
                    total_points = record.total_points,
                    rating = %record.rating,
                    "evaluation recorded"
                );
                Ok(record)
            }
            Err(err) => {
                error!(error = %err, "failed to record evaluation");
                Err(err.into())
            }
        }
    }

    fn check_review(&self, request: &EvaluationRequest) -> Result<(), ValidationError> {
        if self.review_policy == ReviewPolicy::Advisory {
            return Ok(());
        }

        let reviewed = request.reviewed().unwrap_or_default();
        let state = ReviewState::from_viewed(&self.catalog, reviewed);
        if state.can_submit(&self.catalog) {
            Ok(())
        } else {
            let err = ValidationError::ReviewIncomplete {
                pending: state.pending(&self.catalog),
            };
            warn!(error = %err, "rejected evaluation with incomplete review");
            Err(err)
        }
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
