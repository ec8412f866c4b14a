//! Wizard operations: browsing the catalog, ranking frameworks, running the
//! preflight gate and launching moves.

use serde::Serialize;

use super::Playbook;
use crate::{
    display::{Problems, Recommendations},
    draft::{ChannelWarning, PlanDraft},
    error::Result,
    factory::MoveFactory,
    models::Move,
    params::{LaunchMove, Recommend},
    preflight::PreflightReport,
    recommender::{self, DEFAULT_LIMIT},
    store::MoveStore,
};

/// Result of a launch attempt.
///
/// A draft that fails preflight is not an error: the report is handed back
/// so the caller can show what to fix.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LaunchOutcome {
    Launched {
        #[serde(rename = "move")]
        mv: Move,
        warnings: Vec<ChannelWarning>,
    },
    Blocked {
        report: PreflightReport,
    },
}

impl LaunchOutcome {
    pub fn launched(&self) -> Option<&Move> {
        match self {
            Self::Launched { mv, .. } => Some(mv),
            Self::Blocked { .. } => None,
        }
    }
}

impl<S: MoveStore> Playbook<S> {
    /// All problems in the catalog, in declaration order.
    pub fn list_problems(&self) -> Problems {
        Problems(self.catalog.problems.clone())
    }

    /// Ranks frameworks for a problem and situation, best first.
    pub fn recommend(&self, params: &Recommend) -> Recommendations {
        Recommendations(recommender::recommend(
            &self.catalog,
            params.problem_id.as_deref(),
            &params.situation,
            params.limit.unwrap_or(DEFAULT_LIMIT),
        ))
    }

    /// Assembles a plan draft from launch parameters without running the
    /// gate.
    ///
    /// # Errors
    ///
    /// `ProblemNotFound`, `FrameworkNotFound`, or `InvalidInput` for values
    /// the selected framework rejects.
    pub fn draft(&self, params: &LaunchMove) -> Result<PlanDraft> {
        params.to_builder()?.build(&self.catalog)
    }

    /// Dry-runs the preflight gate for the given parameters.
    pub fn preflight(&self, params: &LaunchMove) -> Result<PreflightReport> {
        self.draft(params)?.preflight()
    }

    /// Builds a draft, runs the gate and launches the move if it passes.
    pub async fn launch(&self, params: &LaunchMove) -> Result<LaunchOutcome> {
        let mut draft = self.draft(params)?;
        let report = draft.run_preflight()?;
        if !report.passed {
            log::debug!(
                "Launch blocked: {} failing checks",
                report.failing_checks().count()
            );
            return Ok(LaunchOutcome::Blocked { report });
        }

        let warnings = draft.channel_warnings();
        for warning in &warnings {
            log::warn!("{warning}");
        }
        let mv = self.launch_move(&draft).await?;
        Ok(LaunchOutcome::Launched { mv, warnings })
    }

    /// Materializes a draft whose gate has passed and persists the new move.
    ///
    /// # Errors
    ///
    /// `PreflightNotPassed` if the draft's gate has not been run since its
    /// last edit or no longer passes. Nothing is stored in that case.
    pub async fn launch_move(&self, draft: &PlanDraft) -> Result<Move> {
        let new_move = MoveFactory::materialize(draft, self.today())?;
        let mv = self
            .run_blocking(move |store| store.create_move(&new_move))
            .await?;
        log::info!(
            "Launched move {} \"{}\" ({}, {} tasks, status {})",
            mv.id,
            mv.name,
            mv.framework_id,
            mv.checklist_items.len(),
            mv.status
        );
        Ok(mv)
    }
}
