//! Problem definitions: the wizard's entry points.

use serde::{Deserialize, Serialize};

/// A canned statement of the user's challenge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
    pub id: String,
    /// User-facing problem statement, e.g. "I need customers fast"
    pub statement: String,
    /// Goal label shown once the problem is picked
    pub goal: String,
    /// KPI name suggested for moves addressing this problem
    pub default_kpi: String,
    /// Suggested move length in days
    pub default_duration: u32,
    /// Frameworks the catalog associates with this problem
    #[serde(default)]
    pub frameworks: Vec<String>,
}

impl Problem {
    pub fn has_affinity(&self, framework_id: &str) -> bool {
        self.frameworks.iter().any(|id| id == framework_id)
    }
}
