//! Non-interactive draft assembly for the command-line and MCP surfaces.

use jiff::civil::Date;

use super::{PlanDraft, WizardStep};
use crate::{
    catalog::Catalog,
    error::{PlaybookError, Result},
    models::RunMode,
    recommender,
    situation::Situation,
};

/// Builder that walks the wizard in one go.
///
/// Without an explicit framework the best-ranked recommendation is used.
/// When channels are given they replace the seeded selection. The returned
/// draft has every slot visited but preflight has not been run.
#[derive(Debug, Clone, Default)]
pub struct PlanDraftBuilder {
    problem_id: String,
    situation: Situation,
    framework_id: Option<String>,
    inputs: Vec<(String, String)>,
    disabled_rules: Vec<String>,
    disabled_actions: Vec<usize>,
    removed_outputs: Vec<String>,
    channels: Vec<String>,
    baseline: Option<f64>,
    target: Option<f64>,
    move_name: Option<String>,
    start_date: Option<Date>,
    campaign_id: Option<u64>,
    run_mode: RunMode,
    generate_content: bool,
}

impl PlanDraftBuilder {
    pub fn new(problem_id: impl Into<String>) -> Self {
        Self {
            problem_id: problem_id.into(),
            ..Default::default()
        }
    }

    pub fn situation(mut self, situation: Situation) -> Self {
        self.situation = situation;
        self
    }

    pub fn framework(mut self, framework_id: Option<impl Into<String>>) -> Self {
        self.framework_id = framework_id.map(Into::into);
        self
    }

    pub fn input(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push((field_id.into(), value.into()));
        self
    }

    pub fn disable_rule(mut self, rule_id: impl Into<String>) -> Self {
        self.disabled_rules.push(rule_id.into());
        self
    }

    /// Exclude a daily action by its 0-based position in the framework.
    pub fn disable_action(mut self, index: usize) -> Self {
        self.disabled_actions.push(index);
        self
    }

    pub fn remove_output(mut self, deliverable_id: impl Into<String>) -> Self {
        self.removed_outputs.push(deliverable_id.into());
        self
    }

    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channels.push(channel.into());
        self
    }

    pub fn baseline(mut self, value: Option<f64>) -> Self {
        self.baseline = value;
        self
    }

    pub fn target(mut self, value: Option<f64>) -> Self {
        self.target = value;
        self
    }

    pub fn move_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.move_name = name.map(Into::into);
        self
    }

    pub fn start_date(mut self, date: Option<Date>) -> Self {
        self.start_date = date;
        self
    }

    pub fn campaign(mut self, campaign_id: Option<u64>) -> Self {
        self.campaign_id = campaign_id;
        self
    }

    pub fn run_mode(mut self, run_mode: RunMode) -> Self {
        self.run_mode = run_mode;
        self
    }

    pub fn generate_content(mut self, generate: bool) -> Self {
        self.generate_content = generate;
        self
    }

    /// Resolve everything against the catalog and fill the draft.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::ProblemNotFound` or
    /// `PlaybookError::FrameworkNotFound` for unknown ids, and
    /// `PlaybookError::InvalidInput` for slot edits the framework rejects.
    pub fn build(self, catalog: &Catalog) -> Result<PlanDraft> {
        if catalog.problem(&self.problem_id).is_none() {
            return Err(PlaybookError::ProblemNotFound {
                id: self.problem_id,
            });
        }

        let framework = match &self.framework_id {
            Some(id) => catalog
                .framework(id)
                .cloned()
                .ok_or_else(|| PlaybookError::FrameworkNotFound { id: id.clone() })?,
            None => recommender::recommend(catalog, Some(&self.problem_id), &self.situation, 1)
                .into_iter()
                .next()
                .map(|r| r.framework)
                .ok_or_else(|| PlaybookError::catalog("no framework to recommend"))?,
        };
        log::debug!(
            "Building draft for problem '{}' with framework '{}'",
            self.problem_id,
            framework.id
        );

        let mut draft = PlanDraft::new(self.problem_id);
        draft.set_situation(self.situation);
        draft.select_framework(framework);
        for step in WizardStep::SLOTS {
            draft.visit(step)?;
        }

        for (field, value) in self.inputs {
            draft.set_input(&field, value)?;
        }
        for rule in &self.disabled_rules {
            let state = draft
                .slots()
                .rules
                .as_ref()
                .and_then(|r| r.optional.get(rule).copied());
            // unknown and required rules fall through to the toggle, which rejects them
            if state != Some(false) {
                draft.toggle_rule(rule)?;
            }
        }
        for index in self.disabled_actions {
            draft.set_action_enabled(index, false)?;
        }
        for output in &self.removed_outputs {
            draft.remove_output(output)?;
        }
        if !self.channels.is_empty() {
            let seeded = draft
                .slots()
                .channels
                .as_ref()
                .map(|c| c.selected.clone())
                .unwrap_or_default();
            for channel in seeded {
                draft.toggle_channel(&channel)?;
            }
            for channel in &self.channels {
                if !draft
                    .slots()
                    .channels
                    .as_ref()
                    .is_some_and(|c| c.is_selected(channel))
                {
                    draft.toggle_channel(channel)?;
                }
            }
        }
        draft.set_baseline(self.baseline)?;
        draft.set_target(self.target)?;

        draft.move_name = self.move_name;
        draft.start_date = self.start_date;
        draft.campaign_id = self.campaign_id;
        draft.run_mode = self.run_mode;
        draft.generate_content = self.generate_content;

        Ok(draft)
    }
}
