use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::evaluation::catalog::{ChecklistItem, CriteriaCatalog, CriterionCategory};
use crate::evaluation::domain::{
    EvaluationId, EvaluationPayload, EvaluationRecord, EvaluationResult,
};
use crate::evaluation::repository::{EvaluationRepository, RepositoryError};
use crate::evaluation::scoring::ScoringEngine;
use crate::evaluation::selection::SelectionInput;
use crate::evaluation::service::{EvaluationService, ReviewPolicy};

pub(super) fn catalog() -> Arc<CriteriaCatalog> {
    Arc::new(CriteriaCatalog::standard())
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(catalog())
}

/// Two categories whose weights add up past the point cap.
pub(super) fn oversized_catalog() -> Arc<CriteriaCatalog> {
    Arc::new(CriteriaCatalog::from_categories(vec![
        CriterionCategory {
            id: "energy",
            title: "Energy",
            description: "",
            items: vec![
                ChecklistItem {
                    id: "e1",
                    text: "Solar",
                    weight: 70,
                },
                ChecklistItem {
                    id: "e2",
                    text: "Storage",
                    weight: 50,
                },
            ],
        },
        CriterionCategory {
            id: "water",
            title: "Water",
            description: "",
            items: vec![ChecklistItem {
                id: "w1",
                text: "Greywater",
                weight: 30,
            }],
        },
    ]))
}

pub(super) fn selected(ids: &[&str]) -> Vec<SelectionInput> {
    ids.iter().map(|id| SelectionInput::new(*id, true)).collect()
}

/// Wire inputs covering the whole catalog with the given ids switched on.
pub(super) fn full_inputs(ids: &[&str]) -> Vec<SelectionInput> {
    catalog()
        .item_ids()
        .map(|id| SelectionInput::new(id, ids.contains(&id)))
        .collect()
}

pub(super) fn pairs(inputs: &[SelectionInput]) -> impl Iterator<Item = (&str, bool)> {
    inputs.iter().map(SelectionInput::as_pair)
}

pub(super) const CERTIFIED_SELECTION: [&str; 7] = ["s4", "w1", "w3", "w5", "e1", "e4", "e5"];

pub(super) fn payload() -> EvaluationPayload {
    EvaluationPayload {
        name: Some("Riverside Offices".to_string()),
        project_type: Some("Commercial".to_string()),
        area: Some(4200.0),
        inputs: Some(full_inputs(&CERTIFIED_SELECTION)),
        reviewed: None,
    }
}

pub(super) fn all_category_ids() -> Vec<String> {
    catalog().category_ids().map(str::to_string).collect()
}

pub(super) fn build_service(
    policy: ReviewPolicy,
) -> (EvaluationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = EvaluationService::new(catalog(), repository.clone(), policy);
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<EvaluationRecord>>,
    sequence: AtomicI64,
}

impl MemoryRepository {
    pub(super) fn records(&self) -> Vec<EvaluationRecord> {
        self.records.lock().expect("repository mutex poisoned").clone()
    }
}

impl EvaluationRepository for MemoryRepository {
    fn append(&self, result: EvaluationResult) -> Result<EvaluationRecord, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let created_at = Utc
            .with_ymd_and_hms(2025, 10, 19, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let record = result.into_record(EvaluationId(id), created_at);
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record.clone());
        Ok(record)
    }
}

pub(super) struct UnavailableRepository;

impl EvaluationRepository for UnavailableRepository {
    fn append(&self, _result: EvaluationResult) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
