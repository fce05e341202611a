use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::Rating;
use super::selection::SelectionInput;

/// Auto-assigned sequence number of a recorded evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(pub i64);

/// Body of `POST /api/evaluate` as received. Every field is optional so that a
/// structurally incomplete request can be reported as a validation failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub project_type: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub inputs: Option<Vec<SelectionInput>>,
    /// Category ids the client reports as reviewed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed: Option<Vec<String>>,
}

impl EvaluationPayload {
    pub fn validate(self) -> Result<EvaluationRequest, ValidationError> {
        let project_name = required_text(self.name, "name")?;
        let project_type = required_text(self.project_type, "type")?;
        let area_sqm = self.area.ok_or(ValidationError::MissingField("area"))?;
        let selections = self.inputs.ok_or(ValidationError::MissingField("inputs"))?;

        EvaluationRequest::new(project_name, project_type, area_sqm, selections, self.reviewed)
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

/// Validated, immutable evaluation request.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationRequest {
    project_name: String,
    project_type: String,
    area_sqm: f64,
    selections: Vec<SelectionInput>,
    reviewed: Option<Vec<String>>,
}

impl EvaluationRequest {
    pub(crate) fn new(
        project_name: String,
        project_type: String,
        area_sqm: f64,
        selections: Vec<SelectionInput>,
        reviewed: Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        if project_name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if project_type.trim().is_empty() {
            return Err(ValidationError::MissingField("type"));
        }
        if !area_sqm.is_finite() || area_sqm <= 0.0 {
            return Err(ValidationError::InvalidArea(area_sqm));
        }

        Ok(Self {
            project_name,
            project_type,
            area_sqm,
            selections,
            reviewed,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_type(&self) -> &str {
        &self.project_type
    }

    pub fn area_sqm(&self) -> f64 {
        self.area_sqm
    }

    pub fn selections(&self) -> &[SelectionInput] {
        &self.selections
    }

    pub fn reviewed(&self) -> Option<&[String]> {
        self.reviewed.as_deref()
    }

    pub(crate) fn into_result(self, total_points: u32, rating: Rating) -> EvaluationResult {
        EvaluationResult {
            project_name: self.project_name,
            project_type: self.project_type,
            area_sqm: self.area_sqm,
            total_points,
            rating,
        }
    }
}

/// Scored evaluation awaiting persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub project_name: String,
    pub project_type: String,
    pub area_sqm: f64,
    pub total_points: u32,
    pub rating: Rating,
}

impl EvaluationResult {
    pub fn into_record(self, id: EvaluationId, created_at: DateTime<Utc>) -> EvaluationRecord {
        EvaluationRecord {
            id,
            project_name: self.project_name,
            project_type: self.project_type,
            area_sqm: self.area_sqm,
            total_points: self.total_points,
            rating: self.rating,
            created_at,
        }
    }
}

/// Append-only row describing a recorded evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub project_name: String,
    pub project_type: String,
    pub area_sqm: f64,
    pub total_points: u32,
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}

impl EvaluationRecord {
    pub fn view(&self) -> EvaluationView {
        EvaluationView {
            id: self.id,
            name: self.project_name.clone(),
            project_type: self.project_type.clone(),
            area: self.area_sqm,
            total_points: self.total_points,
            rating: self.rating,
        }
    }
}

/// Response body returned by the evaluate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationView {
    pub id: EvaluationId,
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: String,
    pub area: f64,
    pub total_points: u32,
    pub rating: Rating,
}

/// Rejections raised before an evaluation reaches the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing data: {0}")]
    MissingField(&'static str),
    #[error("area must be a positive number of square metres (got {0})")]
    InvalidArea(f64),
    #[error("review all criteria before submitting (pending: {})", .pending.join(", "))]
    ReviewIncomplete { pending: Vec<&'static str> },
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}
