//! The wizard's in-memory plan draft.
//!
//! A [`PlanDraft`] collects the problem, the situation answers, the chosen
//! framework and the six slots. It is owned by whoever drives the wizard and
//! is never persisted; abandoning it leaves no trace.
//!
//! Two rules hold for every draft:
//!
//! - selecting a framework resets all slots
//! - any slot mutation clears `preflight_passed`, so the gate has to be run
//!   again on the edited draft
//!
//! ```rust
//! use playbook_core::{catalog::Catalog, draft::PlanDraft};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut draft = PlanDraft::new("need-customers-fast");
//! draft.select_framework(catalog.framework("founder-led-outreach").unwrap().clone());
//! draft.set_input("offer", "Free pipeline audit").unwrap();
//!
//! let report = draft.run_preflight().unwrap();
//! assert!(!report.passed);
//! assert!(!draft.preflight_passed());
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::Framework,
    error::{PlaybookError, Result},
    models::RunMode,
    preflight::{self, PreflightReport},
    situation::Situation,
};

pub mod builder;
pub mod slots;

pub use builder::PlanDraftBuilder;
pub use slots::{
    ActionEntry, ActionsSlot, ChannelWarning, ChannelsSlot, InputsSlot, MetricsSlot,
    OutputsSlot, RulesSlot, Slots, MAX_CHANNELS,
};

/// Screens of the wizard, in order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Problem,
    Situation,
    Framework,
    Inputs,
    Rules,
    Actions,
    Outputs,
    Channels,
    Metrics,
    Preflight,
    Launch,
}

impl WizardStep {
    pub const ALL: [WizardStep; 11] = [
        Self::Problem,
        Self::Situation,
        Self::Framework,
        Self::Inputs,
        Self::Rules,
        Self::Actions,
        Self::Outputs,
        Self::Channels,
        Self::Metrics,
        Self::Preflight,
        Self::Launch,
    ];

    /// The steps that edit a slot.
    pub const SLOTS: [WizardStep; 6] = [
        Self::Inputs,
        Self::Rules,
        Self::Actions,
        Self::Outputs,
        Self::Channels,
        Self::Metrics,
    ];

    pub fn next(&self) -> Option<WizardStep> {
        let index = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(index + 1).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        let index = Self::ALL.iter().position(|s| s == self)?;
        index.checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Problem => "Problem",
            Self::Situation => "Situation",
            Self::Framework => "Framework",
            Self::Inputs => "Inputs",
            Self::Rules => "Rules",
            Self::Actions => "Daily actions",
            Self::Outputs => "Outputs",
            Self::Channels => "Channels",
            Self::Metrics => "Metrics",
            Self::Preflight => "Preflight",
            Self::Launch => "Launch",
        }
    }
}

/// Wizard-local plan under construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDraft {
    problem_type: String,
    situation: Situation,
    framework: Option<Framework>,
    slots: Slots,
    preflight_passed: bool,

    /// Defaults to the framework name at launch
    pub move_name: Option<String>,
    /// Defaults to the launch date
    pub start_date: Option<Date>,
    pub campaign_id: Option<u64>,
    pub run_mode: RunMode,
    /// Start the move in `generating` so the content collaborator can run
    pub generate_content: bool,
}

impl PlanDraft {
    pub fn new(problem_type: impl Into<String>) -> Self {
        Self {
            problem_type: problem_type.into(),
            situation: Situation::default(),
            framework: None,
            slots: Slots::default(),
            preflight_passed: false,
            move_name: None,
            start_date: None,
            campaign_id: None,
            run_mode: RunMode::default(),
            generate_content: false,
        }
    }

    pub fn problem_type(&self) -> &str {
        &self.problem_type
    }

    pub fn situation(&self) -> &Situation {
        &self.situation
    }

    /// Replace the situation answers. Slots are left untouched.
    pub fn set_situation(&mut self, situation: Situation) {
        self.situation = situation;
    }

    pub fn framework(&self) -> Option<&Framework> {
        self.framework.as_ref()
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    pub fn preflight_passed(&self) -> bool {
        self.preflight_passed
    }

    /// Pick the framework to configure. Resets every slot.
    pub fn select_framework(&mut self, framework: Framework) {
        self.framework = Some(framework);
        self.slots = Slots::default();
        self.preflight_passed = false;
    }

    /// Seed the slot behind `step` on first visit.
    pub fn visit(&mut self, step: WizardStep) -> Result<()> {
        let primary = self.situation.primary_channel.clone();
        self.edit(|framework, slots| {
            slots.visit(step, framework, primary.as_deref());
            Ok(())
        })
    }

    pub fn set_input(&mut self, field_id: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.edit(|framework, slots| slots.set_input(framework, field_id, value))
    }

    /// Flip an optional rule. Returns the new state.
    pub fn toggle_rule(&mut self, rule_id: &str) -> Result<bool> {
        self.edit(|framework, slots| slots.toggle_rule(framework, rule_id))
    }

    /// Include or exclude the daily action at `index` (framework order).
    pub fn set_action_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        self.edit(|framework, slots| slots.set_action_enabled(framework, index, enabled))
    }

    pub fn add_output(&mut self, deliverable_id: &str) -> Result<()> {
        self.edit(|framework, slots| slots.add_output(framework, deliverable_id))
    }

    pub fn remove_output(&mut self, deliverable_id: &str) -> Result<()> {
        self.edit(|framework, slots| slots.remove_output(framework, deliverable_id))
    }

    /// Select or deselect a channel. Policy problems with a new selection
    /// come back as warnings; they never block the change.
    pub fn toggle_channel(&mut self, channel: &str) -> Result<Vec<ChannelWarning>> {
        let primary = self.situation.primary_channel.clone();
        let warnings = self.edit(|framework, slots| {
            slots.toggle_channel(framework, primary.as_deref(), channel)
        })?;
        for warning in &warnings {
            log::warn!("Channel policy: {warning:?}");
        }
        Ok(warnings)
    }

    pub fn set_baseline(&mut self, value: Option<f64>) -> Result<()> {
        self.edit(|framework, slots| slots.set_baseline(framework, value))
    }

    pub fn set_target(&mut self, value: Option<f64>) -> Result<()> {
        self.edit(|framework, slots| slots.set_target(framework, value))
    }

    /// Policy warnings raised by the current channel selection.
    pub fn channel_warnings(&self) -> Vec<ChannelWarning> {
        match (&self.framework, &self.slots.channels) {
            (Some(framework), Some(channels)) => channels.warnings(framework),
            _ => Vec::new(),
        }
    }

    /// Derive the preflight report without touching the gate.
    pub fn preflight(&self) -> Result<PreflightReport> {
        let framework = self.framework.as_ref().ok_or_else(no_framework)?;
        Ok(preflight::validate(framework, &self.slots))
    }

    /// Run the gate and record whether it passed.
    pub fn run_preflight(&mut self) -> Result<PreflightReport> {
        let report = self.preflight()?;
        self.preflight_passed = report.passed;
        Ok(report)
    }

    /// Apply a slot mutation. A successful edit invalidates the gate.
    fn edit<T>(&mut self, f: impl FnOnce(&Framework, &mut Slots) -> Result<T>) -> Result<T> {
        let framework = self.framework.as_ref().ok_or_else(no_framework)?;
        let out = f(framework, &mut self.slots)?;
        self.preflight_passed = false;
        Ok(out)
    }
}

fn no_framework() -> PlaybookError {
    PlaybookError::invalid_input("framework").with_reason("no framework selected")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn ready_draft() -> PlanDraft {
        let catalog = Catalog::builtin().unwrap();
        let mut draft = PlanDraft::new("need-customers-fast");
        draft.select_framework(catalog.framework("founder-led-outreach").unwrap().clone());
        draft.set_input("ideal_customer", "Agency owners").unwrap();
        draft.set_input("offer", "Free audit").unwrap();
        draft.toggle_channel("email").unwrap();
        draft.set_baseline(Some(0.0)).unwrap();
        draft.set_target(Some(10.0)).unwrap();
        draft
    }

    #[test]
    fn test_slot_edits_require_a_framework() {
        let mut draft = PlanDraft::new("need-customers-fast");
        assert!(draft.set_input("offer", "x").is_err());
        assert!(draft.preflight().is_err());
    }

    #[test]
    fn test_run_preflight_sets_flag() {
        let mut draft = ready_draft();
        assert!(!draft.preflight_passed());
        let report = draft.run_preflight().unwrap();
        assert!(report.passed);
        assert!(draft.preflight_passed());
    }

    #[test]
    fn test_any_slot_edit_clears_flag() {
        let edits: Vec<Box<dyn Fn(&mut PlanDraft)>> = vec![
            Box::new(|d| d.set_input("offer", "Better audit").unwrap()),
            Box::new(|d| {
                d.toggle_rule("voice-notes").unwrap();
            }),
            Box::new(|d| d.set_action_enabled(0, false).unwrap()),
            Box::new(|d| d.remove_output("follow-up-email").unwrap()),
            Box::new(|d| {
                d.toggle_channel("linkedin").unwrap();
            }),
            Box::new(|d| d.set_target(Some(12.0)).unwrap()),
        ];

        for edit in edits {
            let mut draft = ready_draft();
            draft.run_preflight().unwrap();
            assert!(draft.preflight_passed());
            edit(&mut draft);
            assert!(!draft.preflight_passed());
        }
    }

    #[test]
    fn test_failed_edit_keeps_flag() {
        let mut draft = ready_draft();
        draft.run_preflight().unwrap();
        assert!(draft.set_input("unknown", "x").is_err());
        assert!(draft.preflight_passed());
    }

    #[test]
    fn test_selecting_framework_resets_slots() {
        let catalog = Catalog::builtin().unwrap();
        let mut draft = ready_draft();
        draft.run_preflight().unwrap();

        draft.select_framework(catalog.framework("win-back").unwrap().clone());
        assert_eq!(draft.slots(), &Slots::default());
        assert!(!draft.preflight_passed());
        assert_eq!(draft.framework().unwrap().id, "win-back");
    }

    #[test]
    fn test_visit_seeds_once() {
        let mut draft = ready_draft();
        draft.set_action_enabled(1, false).unwrap();
        draft.visit(WizardStep::Actions).unwrap();
        let actions = draft.slots().actions.as_ref().unwrap();
        assert!(!actions.entries[1].enabled);

        draft.visit(WizardStep::Rules).unwrap();
        assert!(draft.slots().rules.as_ref().unwrap().is_enabled("daily-quota"));
    }

    #[test]
    fn test_step_navigation() {
        assert_eq!(WizardStep::Problem.previous(), None);
        assert_eq!(WizardStep::Problem.next(), Some(WizardStep::Situation));
        assert_eq!(WizardStep::Metrics.next(), Some(WizardStep::Preflight));
        assert_eq!(WizardStep::Launch.next(), None);
    }

    #[test]
    fn test_channel_warnings_reflect_selection() {
        let mut draft = ready_draft();
        assert!(draft.channel_warnings().is_empty());
        draft.toggle_channel("tiktok").unwrap();
        assert_eq!(
            draft.channel_warnings(),
            vec![ChannelWarning::NotRecommended {
                channel: "tiktok".to_string()
            }]
        );
    }
}
