//! Source records and the categories derived from them

use serde::{Deserialize, Serialize};

/// One dataset row (a learning standard and the learner's mastery of it).
///
/// Immutable after load. Field aliases accept the flat lowercase keys used by
/// exported datasets (`grade`, `mastery`, `standardid`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u32,
    #[serde(alias = "subject")]
    pub subject_label: String,
    #[serde(alias = "grade")]
    pub grade_label: String,
    /// 0-based index into [`Category::ALL`]
    #[serde(alias = "mastery")]
    pub mastery_level: u32,
    #[serde(alias = "domainid")]
    pub domain_id: String,
    #[serde(alias = "domain")]
    pub domain_label: String,
    #[serde(alias = "cluster")]
    pub cluster_label: String,
    #[serde(alias = "standardid")]
    pub standard_id: String,
    #[serde(alias = "standarddescription")]
    pub standard_description: String,
}

impl Record {
    /// Category for this record's mastery level, if it is in range
    pub fn category(&self) -> Option<Category> {
        Category::from_mastery(self.mastery_level)
    }

    /// Inspection text shown when a unit is picked
    pub fn summary(&self) -> String {
        format!(
            "{}: {}\n{}\n{}: {}",
            self.grade_label,
            self.domain_label,
            self.cluster_label,
            self.standard_id,
            self.standard_description
        )
    }
}

/// Block material, ordered by durability (weakest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Glass,
    Wood,
    Stone,
}

impl Category {
    /// All categories, indexed by mastery level
    pub const ALL: [Category; 3] = [Category::Glass, Category::Wood, Category::Stone];

    pub fn from_mastery(level: u32) -> Option<Self> {
        Self::ALL.get(level as usize).copied()
    }

    pub fn mastery_level(&self) -> u32 {
        match self {
            Category::Glass => 0,
            Category::Wood => 1,
            Category::Stone => 2,
        }
    }

    /// Tag string used by collaborators that look units up by category
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Glass => "Glass",
            Category::Wood => "Wood",
            Category::Stone => "Stone",
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "glass" => Some(Category::Glass),
            "wood" => Some(Category::Wood),
            "stone" => Some(Category::Stone),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record(id: u32, mastery_level: u32) -> Record {
    Record {
        id,
        subject_label: "Math".to_string(),
        grade_label: "6th".to_string(),
        mastery_level,
        domain_id: "6.RP".to_string(),
        domain_label: "Ratios & Proportional Relationships".to_string(),
        cluster_label: "Understand ratio concepts".to_string(),
        standard_id: format!("6.RP.A.{id}"),
        standard_description: "Use ratio reasoning to solve problems.".to_string(),
    }
}
