//! Turns a validated plan draft into a new move.

use jiff::civil::Date;

use crate::{
    catalog::ActionTemplate,
    draft::PlanDraft,
    error::{PlaybookError, Result},
    models::{MoveStatus, NewChecklistItem, NewMove},
};

/// Materializes drafts into [`NewMove`]s ready for the store.
pub struct MoveFactory;

impl MoveFactory {
    /// Expand a draft into a move as of `today`.
    ///
    /// The draft's own flag is not trusted alone: the report is derived again
    /// from the current slots and must pass as well.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::PreflightNotPassed` when the gate was not run
    /// or no longer passes, and `PlaybookError::InvalidInput` when no
    /// framework is selected. Nothing is produced in either case.
    pub fn materialize(draft: &PlanDraft, today: Date) -> Result<NewMove> {
        let report = draft.preflight()?;
        if !draft.preflight_passed() || !report.passed {
            return Err(PlaybookError::PreflightNotPassed {
                failing: report.failing_checks().count(),
            });
        }

        let framework = draft
            .framework()
            .ok_or_else(|| PlaybookError::invalid_input("framework").with_reason("no framework selected"))?;
        let slots = draft.slots();
        let duration_days = framework.default_duration.max(1);

        let templates: Vec<&ActionTemplate> = match &slots.actions {
            Some(actions) if !actions.entries.is_empty() => actions.enabled().collect(),
            _ => framework.daily_actions.templates.iter().collect(),
        };
        let checklist_items = templates
            .into_iter()
            .enumerate()
            .map(|(position, template)| NewChecklistItem {
                text: template.task.clone(),
                day: template.day.clamp(1, duration_days),
                duration_minutes: template.duration_minutes,
                position: position as u32,
            })
            .collect();

        let (baseline, target) = slots
            .metrics
            .as_ref()
            .map_or((None, None), |m| (m.baseline, m.target));

        let start_date = draft.start_date.unwrap_or(today);
        let status = if draft.generate_content {
            MoveStatus::Generating
        } else if start_date > today {
            MoveStatus::Pending
        } else {
            MoveStatus::Active
        };

        Ok(NewMove {
            name: draft
                .move_name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .unwrap_or(&framework.name)
                .to_string(),
            problem_type: draft.problem_type().to_string(),
            framework_id: framework.id.clone(),
            framework_name: framework.name.clone(),
            campaign_id: draft.campaign_id,
            channel: slots
                .channels
                .as_ref()
                .and_then(|c| c.selected.first().cloned()),
            run_mode: draft.run_mode,
            duration_days,
            checklist_items,
            metric: framework.metrics.primary.name.clone(),
            baseline,
            target,
            status,
            start_date,
        })
    }
}
