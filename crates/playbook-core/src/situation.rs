//! Context answers collected by the wizard.
//!
//! Every answer is optional. An unanswered question neither helps nor hurts
//! a framework's fit score, so answering more questions can only move
//! aligned frameworks up.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How quickly the user needs results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub enum Speed {
    #[serde(rename = "7")]
    Week,
    #[serde(rename = "14")]
    Fortnight,
    #[serde(rename = "30")]
    Month,
    #[serde(rename = "90")]
    Quarter,
}

impl Speed {
    /// Horizon in days.
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Fortnight => 14,
            Self::Month => 30,
            Self::Quarter => 90,
        }
    }
}

impl FromStr for Speed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7" => Ok(Self::Week),
            "14" => Ok(Self::Fortnight),
            "30" => Ok(Self::Month),
            "90" => Ok(Self::Quarter),
            _ => Err(format!("Invalid speed: {s} (expected 7, 14, 30 or 90)")),
        }
    }
}

/// Hours per week available for execution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum TimeBudget {
    /// Under two hours a week
    Low,
    /// Two to five hours a week
    Medium,
    /// More than five hours a week
    High,
}

impl TimeBudget {
    /// How many deliverables can realistically be produced on this budget.
    /// `None` means no practical limit.
    pub fn deliverable_capacity(&self) -> Option<usize> {
        match self {
            Self::Low => Some(2),
            Self::Medium => Some(4),
            Self::High => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SalesMotion {
    SelfServe,
    SalesLed,
    Hybrid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum TrafficLevel {
    None,
    Low,
    Medium,
    High,
}

/// How much social proof (testimonials, case studies, logos) exists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ProofStrength {
    None,
    Weak,
    Strong,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum OfferClarity {
    Fuzzy,
    Clear,
}

/// Snapshot of the wizard's context questions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Situation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_needed: Option<Speed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_budget: Option<TimeBudget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_motion: Option<SalesMotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic: Option<TrafficLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_strength: Option<ProofStrength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_clarity: Option<OfferClarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_budget: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_channel: Option<String>,
}

impl Situation {
    /// Number of questions answered so far.
    pub fn answered(&self) -> usize {
        [
            self.speed_needed.is_some(),
            self.time_budget.is_some(),
            self.sales_motion.is_some(),
            self.traffic.is_some(),
            self.proof_strength.is_some(),
            self.offer_clarity.is_some(),
            self.paid_budget.is_some(),
            self.primary_channel.is_some(),
        ]
        .into_iter()
        .filter(|answered| *answered)
        .count()
    }
}
