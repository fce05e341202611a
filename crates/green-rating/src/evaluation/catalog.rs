use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

/// Upper bound of the weighted point scale.
pub const MAX_SCORE: u32 = 100;

/// A single yes/no sustainability measure and the points it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub text: &'static str,
    pub weight: u32,
}

/// Themed group of checklist items (e.g. Water Conservation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub items: Vec<ChecklistItem>,
}

impl CriterionCategory {
    pub fn max_points(&self) -> u32 {
        self.items.iter().map(|item| item.weight).sum()
    }
}

/// Read-only lookup over the categories, items, and weights loaded at startup.
#[derive(Debug, Clone)]
pub struct CriteriaCatalog {
    categories: Vec<CriterionCategory>,
    index: HashMap<&'static str, (usize, usize)>,
}

impl CriteriaCatalog {
    pub fn standard() -> Self {
        Self::from_categories(standard_categories())
    }

    pub fn from_categories(categories: Vec<CriterionCategory>) -> Self {
        let mut index = HashMap::new();
        for (category_pos, category) in categories.iter().enumerate() {
            for (item_pos, item) in category.items.iter().enumerate() {
                index.entry(item.id).or_insert((category_pos, item_pos));
            }
        }

        Self { categories, index }
    }

    pub fn categories(&self) -> &[CriterionCategory] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&CriterionCategory> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|category| category.id)
    }

    /// Every item id across all categories, in display order.
    pub fn item_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter().map(|item| item.id))
    }

    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.index
            .get(id)
            .map(|&(category_pos, item_pos)| &self.categories[category_pos].items[item_pos])
    }

    pub fn category_of(&self, item_id: &str) -> Option<&CriterionCategory> {
        self.index
            .get(item_id)
            .map(|&(category_pos, _)| &self.categories[category_pos])
    }

    /// Point weight of an item; ids missing from the catalog weigh nothing.
    pub fn weight(&self, item_id: &str) -> u32 {
        self.item(item_id).map(|item| item.weight).unwrap_or(0)
    }

    pub fn max_score(&self) -> u32 {
        self.categories.iter().map(CriterionCategory::max_points).sum()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut category_ids = BTreeSet::new();
        let mut item_ids = BTreeSet::new();

        for category in &self.categories {
            if !category_ids.insert(category.id) {
                return Err(CatalogError::DuplicateCategory(category.id));
            }
            for item in &category.items {
                if !item_ids.insert(item.id) {
                    return Err(CatalogError::DuplicateItem(item.id));
                }
            }
        }

        let total = self.max_score();
        if total != MAX_SCORE {
            return Err(CatalogError::WeightTotal {
                expected: MAX_SCORE,
                found: total,
            });
        }

        Ok(())
    }
}

/// Structural problems detected when a catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("category id '{0}' is defined more than once")]
    DuplicateCategory(&'static str),
    #[error("checklist item id '{0}' is defined more than once")]
    DuplicateItem(&'static str),
    #[error("checklist weights sum to {found}, expected {expected}")]
    WeightTotal { expected: u32, found: u32 },
}

fn standard_categories() -> Vec<CriterionCategory> {
    vec![
        CriterionCategory {
            id: "site",
            title: "Site Selection and Planning",
            description: "Focuses on sustainable site choice, preserving natural features, and reducing environmental impact during construction.",
            items: vec![
                item("s1", "Site is NOT on sensitive land (wetlands, prime farmland)", 3),
                item("s2", "Preserved over 50% of existing natural habitat", 3),
                item("s3", "Implemented soil erosion control measures", 3),
                item("s4", "Reduced site disturbance during construction", 6),
            ],
        },
        CriterionCategory {
            id: "water",
            title: "Water Conservation",
            description: "Encourages efficient water use, rainwater harvesting, and wastewater treatment.",
            items: vec![
                item("w1", "On-site wastewater treatment (e.g., STP)", 7),
                item("w2", "Low-flow plumbing fixtures (taps, showers)", 3),
                item("w3", "Rainwater harvesting system installed (min 50% of roof)", 6),
                item("w4", "Water-efficient landscaping (drip irrigation, xeriscaping)", 3),
                item("w5", "Use of recycled/treated water for flushing", 6),
            ],
        },
        CriterionCategory {
            id: "energy",
            title: "Energy Efficiency",
            description: "Promotes optimized energy performance, use of renewable energy, and efficient lighting and HVAC systems.",
            items: vec![
                item("e1", "On-site renewable energy (Solar PV, etc.)", 7),
                item("e2", "100% LED lighting systems", 3),
                item("e3", "Natural ventilation design maximized", 3),
                item("e4", "High-performance insulation (walls and roof)", 6),
                item("e5", "Energy-efficient HVAC system (VRV/VRF, etc.)", 7),
            ],
        },
        CriterionCategory {
            id: "materials",
            title: "Materials & Resources",
            description: "Focuses on using sustainable, recycled, and local materials, and managing construction waste.",
            items: vec![
                item("m1", "Use of recycled content in materials", 3),
                item("m2", "Segregated waste management plan (post-occupancy)", 3),
                item("m3", "Use of local materials (within 500km)", 3),
                item("m4", "Use of certified green building materials", 4),
                item("m5", "Diverted > 75% of construction waste from landfill", 7),
            ],
        },
        CriterionCategory {
            id: "indoor",
            title: "Indoor Environmental Quality",
            description: "Aims to improve indoor air quality, natural light, ventilation, and occupant comfort and well-being.",
            items: vec![
                item("i1", "Maximized daylighting for > 75% of spaces", 4),
                item("i2", "Use of low-VOC paints, adhesives, and sealants", 2),
                item("i3", "Provided views to the exterior for > 90% of occupants", 2),
                item("i4", "Cross-ventilation design for fresh air", 2),
            ],
        },
        CriterionCategory {
            id: "innovation",
            title: "Innovation & Design Process",
            description: "Awards points for using innovative green technologies or strategies that exceed the standard requirements.",
            items: vec![
                item("in1", "Employed an IGBC Accredited Professional (AP)", 2),
                item("in2", "Implemented innovative green technology (e.g., green roof)", 1),
                item("in3", "Exceeded base requirements significantly in one category", 1),
            ],
        },
    ]
}

const fn item(id: &'static str, text: &'static str, weight: u32) -> ChecklistItem {
    ChecklistItem { id, text, weight }
}
