use super::common::*;
use crate::evaluation::domain::{EvaluationPayload, ValidationError};
use crate::evaluation::draft::ProjectDraft;
use crate::evaluation::review::ReviewTransition;
use crate::evaluation::selection::SelectionInput;

fn reviewed_draft() -> ProjectDraft {
    let catalog = catalog();
    let mut draft = ProjectDraft::new(&catalog);
    draft.project_name = "  Lakeside Library ".to_string();
    draft.project_type = "Institutional".to_string();
    draft.area_sqm = 1800.0;
    for id in catalog.category_ids() {
        draft.open_category(id);
    }
    draft
}

#[test]
fn submit_produces_trimmed_request_with_catalog_ordered_inputs() {
    let catalog = catalog();
    let mut draft = reviewed_draft();
    draft.set_selected("e1", true);

    let request = draft.submit(&catalog).expect("draft submits");

    assert_eq!(request.project_name(), "Lakeside Library");
    assert_eq!(request.project_type(), "Institutional");
    assert_eq!(request.area_sqm(), 1800.0);
    assert_eq!(request.selections().len(), 26);
    assert!(request
        .selections()
        .contains(&SelectionInput::new("e1", true)));
    assert_eq!(request.reviewed().map(<[String]>::len), Some(6));
}

#[test]
fn submit_requires_every_category_reviewed() {
    let catalog = catalog();
    let mut draft = ProjectDraft::new(&catalog);
    draft.project_name = "Depot".to_string();
    draft.project_type = "Industrial".to_string();
    draft.area_sqm = 300.0;
    assert_eq!(draft.open_category("site"), ReviewTransition::FirstView);

    match draft.submit(&catalog) {
        Err(ValidationError::ReviewIncomplete { pending }) => {
            assert_eq!(
                pending,
                vec!["water", "energy", "materials", "indoor", "innovation"]
            );
        }
        other => panic!("expected incomplete review, got {other:?}"),
    }
}

#[test]
fn field_errors_are_reported_before_review_gate() {
    let catalog = catalog();
    let draft = ProjectDraft::new(&catalog);

    assert_eq!(
        draft.submit(&catalog),
        Err(ValidationError::MissingField("name"))
    );
}

#[test]
fn submit_rejects_non_positive_or_non_finite_area() {
    let catalog = catalog();
    for area in [0.0, -12.5, f64::NAN, f64::INFINITY] {
        let mut draft = reviewed_draft();
        draft.area_sqm = area;

        match draft.submit(&catalog) {
            Err(ValidationError::InvalidArea(_)) => {}
            other => panic!("expected invalid area for {area}, got {other:?}"),
        }
    }
}

#[test]
fn payload_requires_each_field() {
    let cases: [(&str, fn(&mut EvaluationPayload)); 4] = [
        ("name", |p| p.name = None),
        ("type", |p| p.project_type = Some("   ".to_string())),
        ("area", |p| p.area = None),
        ("inputs", |p| p.inputs = None),
    ];

    for (field, strip) in cases {
        let mut body = payload();
        strip(&mut body);
        assert_eq!(
            body.validate(),
            Err(ValidationError::MissingField(field)),
            "expected {field} to be required"
        );
    }
}

#[test]
fn payload_accepts_empty_input_list() {
    let mut body = payload();
    body.inputs = Some(Vec::new());

    let request = body.validate().expect("empty selections are valid");

    assert!(request.selections().is_empty());
    assert!(request.reviewed().is_none());
}

#[test]
fn payload_deserializes_wire_field_names() {
    let body: EvaluationPayload = serde_json::from_value(serde_json::json!({
        "name": "Harbor Lofts",
        "type": "Residential",
        "area": 950,
        "inputs": [{ "id": "w1", "selected": true }, { "id": "w2" }],
    }))
    .expect("payload parses");

    let request = body.validate().expect("payload validates");

    assert_eq!(request.project_type(), "Residential");
    assert_eq!(request.area_sqm(), 950.0);
    assert_eq!(request.selections()[1], SelectionInput::new("w2", false));
}
