use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::CriteriaCatalog;

/// Wire representation of one checkbox: `{ "id": "w1", "selected": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionInput {
    pub id: String,
    #[serde(default)]
    pub selected: bool,
}

impl SelectionInput {
    pub fn new(id: impl Into<String>, selected: bool) -> Self {
        Self {
            id: id.into(),
            selected,
        }
    }

    pub fn as_pair(&self) -> (&str, bool) {
        (self.id.as_str(), self.selected)
    }
}

/// Selected flag for every known checklist item of a draft evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    flags: BTreeMap<String, bool>,
}

impl SelectionSet {
    pub fn new(catalog: &CriteriaCatalog) -> Self {
        let flags = catalog
            .item_ids()
            .map(|id| (id.to_string(), false))
            .collect();
        Self { flags }
    }

    /// Applies wire flags on top of an all-false set. Later entries win and
    /// ids outside the catalog are kept so the scorer can ignore them.
    pub fn from_inputs<I>(catalog: &CriteriaCatalog, inputs: I) -> Self
    where
        I: IntoIterator<Item = SelectionInput>,
    {
        let mut set = Self::new(catalog);
        for input in inputs {
            set.flags.insert(input.id, input.selected);
        }
        set
    }

    pub fn set(&mut self, id: &str, selected: bool) {
        match self.flags.get_mut(id) {
            Some(flag) => *flag = selected,
            None => {
                self.flags.insert(id.to_string(), selected);
            }
        }
    }

    /// Flips an item and returns its new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = !self.is_selected(id);
        self.set(id, next);
        next
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.flags.iter().map(|(id, selected)| (id.as_str(), *selected))
    }

    pub fn selected_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .filter_map(|(id, selected)| selected.then_some(id))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Wire list in catalog order, followed by any ids the catalog does not know.
    pub fn to_inputs(&self, catalog: &CriteriaCatalog) -> Vec<SelectionInput> {
        let mut inputs: Vec<SelectionInput> = catalog
            .item_ids()
            .map(|id| SelectionInput::new(id, self.is_selected(id)))
            .collect();
        inputs.extend(
            self.flags
                .iter()
                .filter(|(id, _)| catalog.item(id).is_none())
                .map(|(id, selected)| SelectionInput::new(id.clone(), *selected)),
        );
        inputs
    }
}
