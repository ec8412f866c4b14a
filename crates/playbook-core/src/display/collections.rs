//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use serde::Serialize;

use crate::{
    catalog::Problem, models::MoveSummary, params::ListMoves, playbook::move_ops::DayTasks,
    recommender::Recommendation,
};

/// Implements the shared read-only collection API for a newtype over `Vec`.
macro_rules! collection_newtype {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            /// Check if the collection is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Get the number of items in the collection.
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// Get a reference to the item at the given index.
            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            /// Get an iterator over the items.
            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Newtype wrapper for displaying collections of move summaries.
///
/// Handles empty collections gracefully; titles are left to the caller.
///
/// # Examples
///
/// ```rust
/// use playbook_core::{
///     display::MoveSummaries,
///     models::{MoveHealth, MoveStatus, MoveSummary},
/// };
///
/// let summary = MoveSummary {
///     id: 1,
///     name: "Launch week".to_string(),
///     framework_name: "Founder-Led Outreach".to_string(),
///     status: MoveStatus::Active,
///     campaign_id: None,
///     day: 3,
///     duration_days: 7,
///     total_tasks: 7,
///     completed_tasks: 2,
///     health: MoveHealth::OnTrack,
/// };
///
/// let summaries = MoveSummaries(vec![summary]);
/// let output = format!("{}", summaries);
/// assert!(output.contains("## Launch week (ID: 1) (2/7)"));
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct MoveSummaries(pub Vec<MoveSummary>);

collection_newtype!(MoveSummaries, MoveSummary);

impl fmt::Display for MoveSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No moves found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// Heading for a move listing, describing the filter that produced it.
pub fn move_list_title(params: &ListMoves) -> String {
    let mut title = match params.status {
        Some(status) => format!("Moves ({status})"),
        None if params.all => "All Moves".to_string(),
        None => "Open Moves".to_string(),
    };
    if let Some(campaign_id) = params.campaign_id {
        title.push_str(&format!(" for campaign {campaign_id}"));
    }
    title
}

/// Ranked frameworks, best first.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Recommendations(pub Vec<Recommendation>);

collection_newtype!(Recommendations, Recommendation);

impl fmt::Display for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No frameworks found.")
        } else {
            for recommendation in &self.0 {
                write!(f, "{recommendation}")?;
            }
            Ok(())
        }
    }
}

/// The catalog's problems.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Problems(pub Vec<Problem>);

collection_newtype!(Problems, Problem);

impl fmt::Display for Problems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No problems found.")
        } else {
            for problem in &self.0 {
                write!(f, "{problem}")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for DayTasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) day {} of {}",
            self.move_name, self.move_id, self.day, self.duration_days
        )?;
        writeln!(f)?;

        if self.tasks.is_empty() {
            writeln!(f, "No tasks found.")
        } else {
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
            Ok(())
        }
    }
}
