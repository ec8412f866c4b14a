//! The catalog of problems, frameworks and scoring weights.
//!
//! The catalog is versioned data owned outside the core. It is loaded from
//! JSON (the built-in asset or a user-supplied file), validated once, and
//! treated as immutable afterwards. Nothing downstream ever writes to it.
//!
//! ```rust
//! use playbook_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin().expect("built-in catalog is valid");
//! assert!(catalog.problem("need-customers-fast").is_some());
//! ```

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{PlaybookError, Result};

pub mod framework;
pub mod problem;

pub use framework::{
    ActionSchedule, ActionTemplate, ChannelFit, ChannelPlan, Deliverable, DeliverableKind,
    FieldType, FitProfile, Framework, InputField, InputSchema, MetricKind, MetricsSchema,
    OutputSchema, PrimaryMetric, Rule, RuleSet,
};
pub use problem::Problem;

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Relative weight of each scoring criterion.
///
/// Only the ratios matter: scores are normalised by the total weight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringWeights {
    pub duration: f64,
    pub channel: f64,
    pub capacity: f64,
    pub proof: f64,
    pub sales_motion: f64,
    pub traffic: f64,
    pub paid_budget: f64,
    pub offer_clarity: f64,
    pub problem_affinity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            duration: 1.0,
            channel: 1.0,
            capacity: 1.0,
            proof: 1.0,
            sales_motion: 1.0,
            traffic: 1.0,
            paid_budget: 1.0,
            offer_clarity: 1.0,
            problem_affinity: 1.0,
        }
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    fn as_array(&self) -> [f64; 9] {
        [
            self.duration,
            self.channel,
            self.capacity,
            self.proof,
            self.sales_motion,
            self.traffic,
            self.paid_budget,
            self.offer_clarity,
            self.problem_affinity,
        ]
    }
}

/// Immutable set of problems and frameworks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub version: String,
    #[serde(default)]
    pub weights: ScoringWeights,
    pub problems: Vec<Problem>,
    /// Declaration order is the recommender's tie-breaker
    pub frameworks: Vec<Framework>,
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load and validate a catalog file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| PlaybookError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    pub fn problem(&self, id: &str) -> Option<&Problem> {
        self.problems.iter().find(|p| p.id == id)
    }

    pub fn framework(&self, id: &str) -> Option<&Framework> {
        self.frameworks.iter().find(|f| f.id == id)
    }

    /// Structural checks that downstream invariants rely on.
    fn validate(&self) -> Result<()> {
        if self.frameworks.is_empty() {
            return Err(PlaybookError::catalog("catalog declares no frameworks"));
        }
        if self.weights.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(PlaybookError::catalog(
                "scoring weights must be finite and non-negative",
            ));
        }

        let mut framework_ids = HashSet::new();
        for framework in &self.frameworks {
            if !framework_ids.insert(framework.id.as_str()) {
                return Err(PlaybookError::catalog(format!(
                    "duplicate framework id '{}'",
                    framework.id
                )));
            }
            Self::validate_framework(framework)?;
        }

        let mut problem_ids = HashSet::new();
        for problem in &self.problems {
            if !problem_ids.insert(problem.id.as_str()) {
                return Err(PlaybookError::catalog(format!(
                    "duplicate problem id '{}'",
                    problem.id
                )));
            }
            if let Some(unknown) = problem
                .frameworks
                .iter()
                .find(|id| !framework_ids.contains(id.as_str()))
            {
                return Err(PlaybookError::catalog(format!(
                    "problem '{}' references unknown framework '{unknown}'",
                    problem.id
                )));
            }
        }

        Ok(())
    }

    fn validate_framework(framework: &Framework) -> Result<()> {
        let fail = |reason: String| {
            Err(PlaybookError::catalog(format!(
                "framework '{}': {reason}",
                framework.id
            )))
        };

        if framework.default_duration == 0 {
            return fail("default duration must be at least one day".to_string());
        }
        if let Some(t) = framework
            .daily_actions
            .templates
            .iter()
            .find(|t| t.day == 0 || t.day > framework.default_duration)
        {
            return fail(format!(
                "task '{}' is scheduled on day {} outside 1..={}",
                t.task, t.day, framework.default_duration
            ));
        }
        if !framework.outputs.deliverables.iter().any(|d| d.required) {
            return fail("at least one deliverable must be required".to_string());
        }

        let mut field_ids = HashSet::new();
        for field in &framework.inputs.fields {
            if !field_ids.insert(field.id.as_str()) {
                return fail(format!("duplicate input field '{}'", field.id));
            }
            if let FieldType::Choice { options } = &field.field_type {
                if options.is_empty() {
                    return fail(format!("choice field '{}' has no options", field.id));
                }
            }
        }

        Ok(())
    }
}
