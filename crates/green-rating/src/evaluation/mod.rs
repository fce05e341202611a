//! Sustainability checklist evaluation: the criteria catalog, the weighted
//! scoring engine, the category review gate, and the append-only lifecycle of
//! an evaluation from draft to recorded row.

pub mod catalog;
pub mod domain;
pub mod draft;
pub mod repository;
pub mod review;
pub mod router;
pub mod scoring;
pub mod selection;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ChecklistItem, CriteriaCatalog, CriterionCategory, MAX_SCORE};
pub use domain::{
    EvaluationId, EvaluationPayload, EvaluationRecord, EvaluationRequest, EvaluationResult,
    EvaluationView, ValidationError,
};
pub use draft::ProjectDraft;
pub use repository::{EvaluationRepository, RepositoryError};
pub use review::{ReviewState, ReviewTransition};
pub use router::evaluation_router;
pub use scoring::{CategoryScore, Rating, ScoreOutcome, ScoringEngine};
pub use selection::{SelectionInput, SelectionSet};
pub use service::{EvaluationService, EvaluationServiceError, ReviewPolicy};
