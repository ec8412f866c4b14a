//! The six configuration slots of a plan draft.
//!
//! Each slot is seeded from the selected framework the first time it is
//! visited and edited independently afterwards. A mutation only ever touches
//! its own slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::WizardStep;
use crate::{
    catalog::{ActionTemplate, ChannelFit, Deliverable, FieldType, Framework},
    error::{PlaybookError, Result},
};

/// Channels the policy is comfortable with.
pub const MAX_CHANNELS: usize = 2;

/// Answers to the framework's input fields, keyed by field id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputsSlot {
    pub values: BTreeMap<String, String>,
}

impl InputsSlot {
    /// Whether a field has a non-blank answer.
    pub fn is_filled(&self, field_id: &str) -> bool {
        self.values
            .get(field_id)
            .is_some_and(|v| !v.trim().is_empty())
    }

    fn set(&mut self, framework: &Framework, field_id: &str, value: String) -> Result<()> {
        let field = framework.input_field(field_id).ok_or_else(|| {
            PlaybookError::invalid_input(field_id)
                .with_reason(format!("'{}' declares no such field", framework.name))
        })?;

        if let FieldType::Choice { options } = &field.field_type {
            if !value.trim().is_empty() && !options.iter().any(|o| o == value.trim()) {
                return Err(PlaybookError::invalid_input(field_id)
                    .with_reason(format!("expected one of: {}", options.join(", "))));
            }
        }

        self.values.insert(field_id.to_string(), value);
        Ok(())
    }
}

/// Toggle state of the framework's optional rules. Required rules are not
/// stored: they always hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RulesSlot {
    pub optional: BTreeMap<String, bool>,
}

impl RulesSlot {
    fn seed(framework: &Framework) -> Self {
        Self {
            optional: framework
                .rules
                .optional
                .iter()
                .map(|r| (r.id.clone(), true))
                .collect(),
        }
    }

    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.optional.get(rule_id).copied().unwrap_or(false)
    }

    fn toggle(&mut self, rule_id: &str) -> Result<bool> {
        let enabled = self.optional.get_mut(rule_id).ok_or_else(|| {
            PlaybookError::invalid_input(rule_id).with_reason("not an optional rule of this framework")
        })?;
        *enabled = !*enabled;
        Ok(*enabled)
    }
}

/// One daily-action template and whether it will be generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionEntry {
    pub template: ActionTemplate,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionsSlot {
    pub entries: Vec<ActionEntry>,
}

impl ActionsSlot {
    fn seed(framework: &Framework) -> Self {
        Self {
            entries: framework
                .daily_actions
                .templates
                .iter()
                .map(|t| ActionEntry {
                    template: t.clone(),
                    enabled: true,
                })
                .collect(),
        }
    }

    pub fn enabled(&self) -> impl Iterator<Item = &ActionTemplate> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| &e.template)
    }

    fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<()> {
        let count = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            PlaybookError::invalid_input("action")
                .with_reason(format!("index {index} out of range (framework has {count} actions)"))
        })?;
        entry.enabled = enabled;
        Ok(())
    }
}

/// Deliverables the move will produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputsSlot {
    pub deliverables: Vec<Deliverable>,
}

impl OutputsSlot {
    fn seed(framework: &Framework) -> Self {
        Self {
            deliverables: framework.outputs.deliverables.clone(),
        }
    }

    pub fn has_required(&self) -> bool {
        self.deliverables.iter().any(|d| d.required)
    }

    fn contains(&self, id: &str) -> bool {
        self.deliverables.iter().any(|d| d.id == id)
    }

    fn add(&mut self, framework: &Framework, id: &str) -> Result<()> {
        let deliverable = framework.deliverable(id).ok_or_else(|| {
            PlaybookError::invalid_input(id).with_reason("not a deliverable of this framework")
        })?;
        if !self.contains(id) {
            // keep framework order so re-adding restores the original position
            self.deliverables.push(deliverable.clone());
            let order = |d: &Deliverable| {
                framework
                    .outputs
                    .deliverables
                    .iter()
                    .position(|f| f.id == d.id)
            };
            self.deliverables.sort_by_key(order);
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        match self.deliverables.iter().position(|d| d.id == id) {
            Some(index) if self.deliverables[index].required => {
                Err(PlaybookError::invalid_input(id).with_reason("required deliverables cannot be removed"))
            }
            Some(index) => {
                self.deliverables.remove(index);
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Why a channel selection goes against the framework's advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelWarning {
    /// More than [`MAX_CHANNELS`] channels are selected
    TooMany { selected: usize },
    /// The framework advises against this channel
    NotRecommended { channel: String },
}

/// Selected distribution channels, in selection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelsSlot {
    pub selected: Vec<String>,
}

impl ChannelsSlot {
    /// Seeded with the situation's primary channel when the framework lists it.
    fn seed(framework: &Framework, primary: Option<&str>) -> Self {
        let selected = primary
            .filter(|c| framework.channels.fit(c) != ChannelFit::Unlisted)
            .map(|c| vec![c.to_string()])
            .unwrap_or_default();
        Self { selected }
    }

    pub fn is_selected(&self, channel: &str) -> bool {
        self.selected.iter().any(|c| c.eq_ignore_ascii_case(channel))
    }

    /// Every policy warning raised by the current selection.
    pub fn warnings(&self, framework: &Framework) -> Vec<ChannelWarning> {
        let mut warnings: Vec<_> = self
            .selected
            .iter()
            .filter(|c| framework.channels.fit(c) == ChannelFit::NotRecommended)
            .map(|c| ChannelWarning::NotRecommended { channel: c.clone() })
            .collect();
        if self.selected.len() > MAX_CHANNELS {
            warnings.push(ChannelWarning::TooMany {
                selected: self.selected.len(),
            });
        }
        warnings
    }

    /// Select or deselect a channel. Only channels the framework lists can
    /// be selected.
    fn toggle(&mut self, framework: &Framework, channel: &str) -> Result<Vec<ChannelWarning>> {
        if self.is_selected(channel) {
            self.selected.retain(|c| !c.eq_ignore_ascii_case(channel));
            return Ok(Vec::new());
        }

        if framework.channels.fit(channel) == ChannelFit::Unlisted {
            return Err(PlaybookError::invalid_input("channel").with_reason(format!(
                "'{}' does not list '{channel}'",
                framework.name
            )));
        }

        self.selected.push(channel.to_string());

        let mut warnings = Vec::new();
        if framework.channels.fit(channel) == ChannelFit::NotRecommended {
            warnings.push(ChannelWarning::NotRecommended {
                channel: channel.to_string(),
            });
        }
        if self.selected.len() > MAX_CHANNELS {
            warnings.push(ChannelWarning::TooMany {
                selected: self.selected.len(),
            });
        }
        Ok(warnings)
    }
}

/// Tracking setup: the KPI is fixed by the framework, baseline and target
/// come from the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSlot {
    pub primary: String,
    pub baseline: Option<f64>,
    pub target: Option<f64>,
    pub leading: Vec<String>,
}

impl MetricsSlot {
    fn seed(framework: &Framework) -> Self {
        Self {
            primary: framework.metrics.primary.name.clone(),
            baseline: None,
            target: None,
            leading: framework.metrics.leading.clone(),
        }
    }
}

fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlaybookError::invalid_input(field).with_reason("must be a finite number"))
    }
}

/// All six slots. `None` means the slot was never visited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Slots {
    pub inputs: Option<InputsSlot>,
    pub rules: Option<RulesSlot>,
    pub actions: Option<ActionsSlot>,
    pub outputs: Option<OutputsSlot>,
    pub channels: Option<ChannelsSlot>,
    pub metrics: Option<MetricsSlot>,
}

impl Slots {
    /// Seed the slot behind a wizard step if it was never visited.
    /// Returns true when something was seeded.
    pub(crate) fn visit(
        &mut self,
        step: WizardStep,
        framework: &Framework,
        primary_channel: Option<&str>,
    ) -> bool {
        fn seed<T>(slot: &mut Option<T>, init: impl FnOnce() -> T) -> bool {
            if slot.is_some() {
                return false;
            }
            *slot = Some(init());
            true
        }

        match step {
            WizardStep::Inputs => seed(&mut self.inputs, InputsSlot::default),
            WizardStep::Rules => seed(&mut self.rules, || RulesSlot::seed(framework)),
            WizardStep::Actions => seed(&mut self.actions, || ActionsSlot::seed(framework)),
            WizardStep::Outputs => seed(&mut self.outputs, || OutputsSlot::seed(framework)),
            WizardStep::Channels => seed(&mut self.channels, || {
                ChannelsSlot::seed(framework, primary_channel)
            }),
            WizardStep::Metrics => seed(&mut self.metrics, || MetricsSlot::seed(framework)),
            _ => false,
        }
    }

    /// Seed every unvisited slot from the framework.
    #[cfg(test)]
    pub(crate) fn seed_all(&mut self, framework: &Framework, primary_channel: Option<&str>) {
        for step in WizardStep::SLOTS {
            self.visit(step, framework, primary_channel);
        }
    }

    /// The outputs slot, or what it would be seeded with.
    pub fn outputs_or_seed(&self, framework: &Framework) -> OutputsSlot {
        self.outputs
            .clone()
            .unwrap_or_else(|| OutputsSlot::seed(framework))
    }

    pub(crate) fn set_input(
        &mut self,
        framework: &Framework,
        field_id: &str,
        value: String,
    ) -> Result<()> {
        self.inputs
            .get_or_insert_with(InputsSlot::default)
            .set(framework, field_id, value)
    }

    pub(crate) fn toggle_rule(&mut self, framework: &Framework, rule_id: &str) -> Result<bool> {
        self.rules
            .get_or_insert_with(|| RulesSlot::seed(framework))
            .toggle(rule_id)
    }

    pub(crate) fn set_action_enabled(
        &mut self,
        framework: &Framework,
        index: usize,
        enabled: bool,
    ) -> Result<()> {
        self.actions
            .get_or_insert_with(|| ActionsSlot::seed(framework))
            .set_enabled(index, enabled)
    }

    pub(crate) fn add_output(&mut self, framework: &Framework, id: &str) -> Result<()> {
        self.outputs
            .get_or_insert_with(|| OutputsSlot::seed(framework))
            .add(framework, id)
    }

    pub(crate) fn remove_output(&mut self, framework: &Framework, id: &str) -> Result<()> {
        self.outputs
            .get_or_insert_with(|| OutputsSlot::seed(framework))
            .remove(id)
    }

    pub(crate) fn toggle_channel(
        &mut self,
        framework: &Framework,
        primary_channel: Option<&str>,
        channel: &str,
    ) -> Result<Vec<ChannelWarning>> {
        self.channels
            .get_or_insert_with(|| ChannelsSlot::seed(framework, primary_channel))
            .toggle(framework, channel)
    }

    pub(crate) fn set_baseline(&mut self, framework: &Framework, value: Option<f64>) -> Result<()> {
        let value = value.map(|v| finite("baseline", v)).transpose()?;
        self.metrics
            .get_or_insert_with(|| MetricsSlot::seed(framework))
            .baseline = value;
        Ok(())
    }

    pub(crate) fn set_target(&mut self, framework: &Framework, value: Option<f64>) -> Result<()> {
        let value = value.map(|v| finite("target", v)).transpose()?;
        self.metrics
            .get_or_insert_with(|| MetricsSlot::seed(framework))
            .target = value;
        Ok(())
    }
}
