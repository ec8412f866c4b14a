//! Framework definitions: the templates a move is built from.

use serde::{Deserialize, Serialize};

use crate::situation::{SalesMotion, TrafficLevel};

/// Kind of answer an input field expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    LongText,
    Number,
    Url,
    Choice { options: Vec<String> },
}

/// A question the framework needs answered before launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputField {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputSchema {
    #[serde(default)]
    pub fields: Vec<InputField>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub id: String,
    pub text: String,
}

/// Required rules are policy and always hold; optional rules are toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleSet {
    #[serde(default)]
    pub required: Vec<Rule>,
    #[serde(default)]
    pub optional: Vec<Rule>,
}

/// A templated task scheduled on a given day of the move.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionTemplate {
    pub day: u32,
    pub task: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionSchedule {
    #[serde(default)]
    pub templates: Vec<ActionTemplate>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliverableKind {
    Post,
    Email,
    LandingPage,
    Video,
    Script,
    Offer,
    Document,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deliverable {
    pub id: String,
    pub name: String,
    pub kind: DeliverableKind,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputSchema {
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
}

/// Where the framework says to distribute.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelPlan {
    #[serde(default)]
    pub recommended: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
    #[serde(default)]
    pub not_recommended: Vec<String>,
}

/// How well a channel suits a framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFit {
    Recommended,
    Optional,
    NotRecommended,
    Unlisted,
}

impl ChannelPlan {
    pub fn fit(&self, channel: &str) -> ChannelFit {
        let listed = |list: &[String]| list.iter().any(|c| c.eq_ignore_ascii_case(channel));
        if listed(&self.recommended) {
            ChannelFit::Recommended
        } else if listed(&self.optional) {
            ChannelFit::Optional
        } else if listed(&self.not_recommended) {
            ChannelFit::NotRecommended
        } else {
            ChannelFit::Unlisted
        }
    }

    /// Every channel the framework mentions, recommended first.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.recommended
            .iter()
            .chain(&self.optional)
            .chain(&self.not_recommended)
    }
}

/// Funnel stage the primary KPI measures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Reach,
    Engagement,
    Conversion,
    Revenue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrimaryMetric {
    pub name: String,
    /// Suggested target, shown as guidance
    pub target: String,
    pub kind: MetricKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSchema {
    pub primary: PrimaryMetric,
    #[serde(default)]
    pub leading: Vec<String>,
}

/// Situational attributes a framework declares for scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FitProfile {
    /// Sales motions the framework works for; empty means any
    #[serde(default)]
    pub sales_motions: Vec<SalesMotion>,
    /// Minimum existing traffic the framework relies on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_traffic: Option<TrafficLevel>,
    #[serde(default)]
    pub needs_paid_budget: bool,
    #[serde(default)]
    pub needs_clear_offer: bool,
}

/// A named strategic template scored against a problem and situation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Framework {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub expert: String,
    pub default_duration: u32,
    #[serde(default)]
    pub inputs: InputSchema,
    #[serde(default)]
    pub rules: RuleSet,
    #[serde(default)]
    pub daily_actions: ActionSchedule,
    #[serde(default)]
    pub outputs: OutputSchema,
    #[serde(default)]
    pub channels: ChannelPlan,
    pub metrics: MetricsSchema,
    #[serde(default)]
    pub fit: FitProfile,
}

impl Framework {
    pub fn input_field(&self, id: &str) -> Option<&InputField> {
        self.inputs.fields.iter().find(|f| f.id == id)
    }

    pub fn deliverable(&self, id: &str) -> Option<&Deliverable> {
        self.outputs.deliverables.iter().find(|d| d.id == id)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &InputField> {
        self.inputs.fields.iter().filter(|f| f.required)
    }
}
