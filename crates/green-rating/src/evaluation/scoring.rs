use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{CriteriaCatalog, MAX_SCORE};
use super::selection::SelectionSet;

/// Certification tier derived from the clamped point total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rating {
    #[serde(rename = "Not Certified")]
    NotCertified,
    Certified,
    Silver,
    Gold,
    Platinum,
}

impl Rating {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::NotCertified,
            Self::Certified,
            Self::Silver,
            Self::Gold,
            Self::Platinum,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotCertified => "Not Certified",
            Self::Certified => "Certified",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    /// Lowest point total that earns this tier.
    pub const fn minimum_points(self) -> u32 {
        match self {
            Self::NotCertified => 0,
            Self::Certified => 40,
            Self::Silver => 50,
            Self::Gold => 60,
            Self::Platinum => 75,
        }
    }

    pub fn for_points(points: u32) -> Self {
        Self::ordered()
            .into_iter()
            .rev()
            .find(|rating| points >= rating.minimum_points())
            .unwrap_or(Self::NotCertified)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Points earned within one category, before the overall cap is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: &'static str,
    pub points: u32,
    pub max_points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreOutcome {
    pub total_points: u32,
    pub rating: Rating,
    pub breakdown: Vec<CategoryScore>,
}

/// Stateless scorer over the shared catalog. Never fails: unknown ids count
/// for zero and the total is capped at [`MAX_SCORE`].
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<CriteriaCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<CriteriaCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CriteriaCatalog {
        &self.catalog
    }

    /// Scores a sequence of `(item id, selected)` flags. Repeated ids are
    /// counted every time they appear selected.
    pub fn score<'a, I>(&self, selections: I) -> ScoreOutcome
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut breakdown: Vec<CategoryScore> = self
            .catalog
            .categories()
            .iter()
            .map(|category| CategoryScore {
                category: category.id,
                points: 0,
                max_points: category.max_points(),
            })
            .collect();
        let mut raw_total: u32 = 0;

        for (id, selected) in selections {
            if !selected {
                continue;
            }
            let Some(category) = self.catalog.category_of(id) else {
                continue;
            };
            let weight = self.catalog.weight(id);
            raw_total = raw_total.saturating_add(weight);
            if let Some(entry) = breakdown
                .iter_mut()
                .find(|entry| entry.category == category.id)
            {
                entry.points = entry.points.saturating_add(weight);
            }
        }

        let total_points = raw_total.min(MAX_SCORE);

        ScoreOutcome {
            total_points,
            rating: Rating::for_points(total_points),
            breakdown,
        }
    }

    pub fn score_set(&self, selections: &SelectionSet) -> ScoreOutcome {
        self.score(selections.iter())
    }
}
