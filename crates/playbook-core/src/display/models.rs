//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns.
//!
//! The Display implementations provide:
//! - Markdown-formatted output for rich terminal display
//! - Consistent formatting with status icons and structured sections

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    catalog::{Framework, Problem},
    draft::{ChannelWarning, WizardStep, MAX_CHANNELS},
    models::{ChecklistItem, Move, MoveHealth, MoveStatus, MoveSummary, Outcome, RunMode, Tracking},
    preflight::PreflightReport,
    recommender::Recommendation,
};

impl fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for MoveHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for ChannelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooMany { selected } => write!(
                f,
                "{selected} channels selected; focus works best with at most {}",
                MAX_CHANNELS
            ),
            Self::NotRecommended { channel } => {
                write!(f, "'{channel}' is not a recommended channel for this framework")
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        let progress = self.progress();
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Framework: {}", self.framework_name)?;
        writeln!(f, "- Problem: {}", self.problem_type)?;
        if let Some(channel) = &self.channel {
            writeln!(f, "- Channel: {channel}")?;
        }
        writeln!(f, "- Run mode: {}", self.run_mode)?;
        if let Some(campaign_id) = self.campaign_id {
            writeln!(f, "- Campaign: {campaign_id}")?;
        }
        writeln!(
            f,
            "- Starts: {} ({} days)",
            self.start_date, self.duration_days
        )?;
        writeln!(
            f,
            "- Progress: {}/{} tasks ({}%)",
            progress.completed,
            progress.total,
            progress.percent()
        )?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f, "\n## Tracking")?;
        writeln!(f)?;
        write!(f, "{}", self.tracking)?;

        if let Some(result) = &self.result {
            writeln!(f, "\n## Result")?;
            writeln!(f)?;
            writeln!(f, "- Outcome: {}", result.outcome)?;
            if let Some(learning) = &result.learning {
                writeln!(f)?;
                writeln!(f, "{learning}")?;
            }
        }

        if self.checklist_items.is_empty() {
            writeln!(f, "\nNo tasks in this move.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            for (day, tasks) in self.tasks_by_day() {
                writeln!(f)?;
                writeln!(f, "### Day {day}")?;
                writeln!(f)?;
                for task in tasks {
                    write!(f, "{task}")?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Tracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- KPI: {}", self.metric)?;
        if let Some(baseline) = self.baseline {
            writeln!(f, "- Baseline: {baseline}")?;
        }
        if let Some(target) = self.target {
            writeln!(f, "- Target: {target}")?;
        }
        match self.latest() {
            Some(latest) => writeln!(
                f,
                "- Latest: {} ({}, {} updates)",
                latest.value,
                LocalDateTime(&latest.recorded_at),
                self.updates.len()
            ),
            None => writeln!(f, "- No updates logged yet"),
        }
    }
}

impl fmt::Display for ChecklistItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { "x" } else { " " };
        write!(f, "- [{mark}] {} (ID: {}", self.text, self.id)?;
        if let Some(minutes) = self.duration_minutes {
            write!(f, ", {minutes} min")?;
        }
        writeln!(f, ")")?;

        if let Some(proof) = &self.proof {
            if let Some(url) = &proof.url {
                writeln!(f, "  - Proof: {url}")?;
            }
            if let Some(note) = &proof.note {
                writeln!(f, "  - Note: {note}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for MoveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({}/{})",
            self.name, self.id, self.completed_tasks, self.total_tasks
        )?;
        writeln!(f)?;

        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        writeln!(f, "- **Day**: {} of {}", self.day, self.duration_days)?;
        writeln!(f, "- **Health**: {}", self.health)?;
        writeln!(f, "- **Framework**: {}", self.framework_name)?;
        if let Some(campaign_id) = self.campaign_id {
            writeln!(f, "- **Campaign**: {campaign_id}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.statement, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Goal**: {}", self.goal)?;
        writeln!(f, "- **KPI**: {}", self.default_kpi)?;
        writeln!(f, "- **Typical length**: {} days", self.default_duration)?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "{}", self.subtitle)?;
        writeln!(f)?;
        writeln!(f, "- **Length**: {} days", self.default_duration)?;
        writeln!(f, "- **Daily actions**: {}", self.daily_actions.templates.len())?;
        writeln!(f, "- **KPI**: {}", self.metrics.primary.name)?;
        Ok(())
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fw = &self.framework;
        writeln!(f, "## {} ({}) fit {}%", fw.name, fw.id, self.fit_score)?;
        writeln!(f)?;
        writeln!(f, "{}", fw.subtitle)?;
        writeln!(f)?;
        writeln!(f, "- **Length**: {} days", fw.default_duration)?;
        writeln!(f, "- **KPI**: {}", fw.metrics.primary.name)?;
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for PreflightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.passed {
            "ready to launch"
        } else {
            "blocked"
        };
        writeln!(f, "# Preflight: {verdict}")?;

        for report in &self.categories {
            let mark = if report.passed() { "✓" } else { "✗" };
            writeln!(f)?;
            writeln!(f, "## {mark} {}", report.category.label())?;
            writeln!(f)?;
            for check in &report.checks {
                if check.passed {
                    writeln!(f, "- ✓ {}", check.label)?;
                } else {
                    writeln!(f, "- ✗ {} (fix now: {})", check.label, check.fix_step)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;
    use crate::{
        catalog::Catalog,
        draft::PlanDraftBuilder,
        models::{MoveResult, Proof, TrackingUpdate},
    };

    fn create_test_move() -> Move {
        let ts = Timestamp::from_second(1_790_000_000).unwrap();
        Move {
            id: 7,
            name: "Launch week".to_string(),
            problem_type: "need-customers-fast".to_string(),
            framework_id: "founder-led-outreach".to_string(),
            framework_name: "Founder-Led Outreach".to_string(),
            campaign_id: Some(12),
            channel: Some("email".to_string()),
            run_mode: RunMode::Solo,
            duration_days: 7,
            checklist_items: vec![
                ChecklistItem {
                    id: 1,
                    text: "List 20 prospects".to_string(),
                    done: true,
                    day: 1,
                    duration_minutes: Some(45),
                    proof: Some(Proof {
                        url: Some("https://example.com/sheet".to_string()),
                        note: None,
                    }),
                    position: 0,
                },
                ChecklistItem {
                    id: 2,
                    text: "Send 10 messages".to_string(),
                    done: false,
                    day: 2,
                    duration_minutes: None,
                    proof: None,
                    position: 1,
                },
            ],
            tracking: Tracking {
                metric: "Booked calls".to_string(),
                baseline: Some(0.0),
                target: Some(10.0),
                updates: vec![TrackingUpdate {
                    id: 1,
                    value: 3.0,
                    recorded_at: ts,
                }],
            },
            status: MoveStatus::Active,
            result: None,
            start_date: date(2026, 10, 1),
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_move_display() {
        let output = create_test_move().to_string();
        assert!(output.starts_with("# 7. Launch week"));
        assert!(output.contains("- Status: ➤ Active"));
        assert!(output.contains("- Campaign: 12"));
        assert!(output.contains("- Progress: 1/2 tasks (50%)"));
        assert!(output.contains("- KPI: Booked calls"));
        assert!(output.contains("### Day 1"));
        assert!(output.contains("### Day 2"));
        assert!(output.contains("- [x] List 20 prospects (ID: 1, 45 min)"));
        assert!(output.contains("  - Proof: https://example.com/sheet"));
        assert!(output.contains("- [ ] Send 10 messages (ID: 2)"));
        assert!(!output.contains("## Result"));
    }

    #[test]
    fn test_completed_move_shows_result() {
        let mut mv = create_test_move();
        mv.status = MoveStatus::Completed;
        mv.result = Some(MoveResult {
            outcome: Outcome::Won,
            learning: Some("Warm intros convert best".to_string()),
        });
        let output = mv.to_string();
        assert!(output.contains("## Result"));
        assert!(output.contains("- Outcome: won"));
        assert!(output.contains("Warm intros convert best"));
    }

    #[test]
    fn test_move_without_tasks() {
        let mut mv = create_test_move();
        mv.checklist_items.clear();
        mv.tracking.updates.clear();
        let output = mv.to_string();
        assert!(output.contains("No tasks in this move."));
        assert!(output.contains("- No updates logged yet"));
    }

    #[test]
    fn test_preflight_report_display() {
        let catalog = Catalog::builtin().unwrap();
        let mut draft = PlanDraftBuilder::new("need-customers-fast")
            .framework(Some("founder-led-outreach"))
            .input("offer", "Free audit")
            .build(&catalog)
            .unwrap();
        let report = draft.run_preflight().unwrap();

        let output = report.to_string();
        assert!(output.starts_with("# Preflight: blocked"));
        assert!(output.contains("## ✗ Offer"));
        assert!(output.contains("(fix now: "));
    }
}
