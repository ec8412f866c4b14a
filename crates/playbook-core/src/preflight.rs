//! Preflight validation: the hard gate between a draft and a move.
//!
//! [`validate`] is a pure function of the framework and the current slots.
//! It never fails; a failing gate is data. Every failed check names the
//! wizard step that fixes it.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::Framework,
    draft::{Slots, WizardStep, MAX_CHANNELS},
};

/// Areas a draft is checked in, in report order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PreflightCategory {
    Offer,
    Tracking,
    Outputs,
    Channels,
}

impl PreflightCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offer => "Offer",
            Self::Tracking => "Tracking",
            Self::Outputs => "Outputs",
            Self::Channels => "Channels",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Check {
    /// Stable identifier, e.g. `offer.input.ideal_customer`
    pub id: String,
    pub label: String,
    pub passed: bool,
    /// Where to go to make this check pass
    pub fix_step: WizardStep,
}

impl Check {
    fn new(id: String, label: String, passed: bool, fix_step: WizardStep) -> Self {
        Self {
            id,
            label,
            passed,
            fix_step,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: PreflightCategory,
    pub checks: Vec<Check>,
}

impl CategoryReport {
    /// An empty category passes.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Outcome of a preflight run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreflightReport {
    pub categories: Vec<CategoryReport>,
    /// True iff every check in every category passed
    pub passed: bool,
}

impl PreflightReport {
    pub fn failing_checks(&self) -> impl Iterator<Item = &Check> {
        self.categories
            .iter()
            .flat_map(|c| &c.checks)
            .filter(|c| !c.passed)
    }

    pub fn category(&self, category: PreflightCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Derive the preflight report for a framework and its slots.
///
/// Unvisited slots count as empty, except outputs, which count as their
/// framework seed.
pub fn validate(framework: &Framework, slots: &Slots) -> PreflightReport {
    let categories = vec![
        offer_checks(framework, slots),
        tracking_checks(slots),
        output_checks(framework, slots),
        channel_checks(slots),
    ];
    let passed = categories.iter().all(CategoryReport::passed);
    PreflightReport { categories, passed }
}

fn offer_checks(framework: &Framework, slots: &Slots) -> CategoryReport {
    let fields = framework.required_fields().map(|field| {
        let filled = slots
            .inputs
            .as_ref()
            .is_some_and(|inputs| inputs.is_filled(&field.id));
        Check::new(
            format!("offer.input.{}", field.id),
            format!("\"{}\" is filled in", field.label),
            filled,
            WizardStep::Inputs,
        )
    });

    let rules = framework.rules.required.iter().map(|rule| {
        Check::new(
            format!("offer.rule.{}", rule.id),
            format!("Rule: {}", rule.text),
            true,
            WizardStep::Rules,
        )
    });

    CategoryReport {
        category: PreflightCategory::Offer,
        checks: fields.chain(rules).collect(),
    }
}

fn tracking_checks(slots: &Slots) -> CategoryReport {
    let metrics = slots.metrics.as_ref();
    CategoryReport {
        category: PreflightCategory::Tracking,
        checks: vec![
            Check::new(
                "tracking.kpi".to_string(),
                "Primary KPI selected".to_string(),
                true,
                WizardStep::Metrics,
            ),
            Check::new(
                "tracking.baseline".to_string(),
                "Baseline recorded".to_string(),
                metrics.is_some_and(|m| m.baseline.is_some()),
                WizardStep::Metrics,
            ),
            Check::new(
                "tracking.target".to_string(),
                "Target set".to_string(),
                metrics.is_some_and(|m| m.target.is_some()),
                WizardStep::Metrics,
            ),
        ],
    }
}

fn output_checks(framework: &Framework, slots: &Slots) -> CategoryReport {
    CategoryReport {
        category: PreflightCategory::Outputs,
        checks: vec![Check::new(
            "outputs.required".to_string(),
            "At least one required deliverable".to_string(),
            slots.outputs_or_seed(framework).has_required(),
            WizardStep::Outputs,
        )],
    }
}

fn channel_checks(slots: &Slots) -> CategoryReport {
    let selected = slots.channels.as_ref().map_or(0, |c| c.selected.len());
    CategoryReport {
        category: PreflightCategory::Channels,
        checks: vec![
            Check::new(
                "channels.min".to_string(),
                "At least one channel selected".to_string(),
                selected >= 1,
                WizardStep::Channels,
            ),
            Check::new(
                "channels.max".to_string(),
                format!("At most {MAX_CHANNELS} channels selected"),
                selected <= MAX_CHANNELS,
                WizardStep::Channels,
            ),
        ],
    }
}
