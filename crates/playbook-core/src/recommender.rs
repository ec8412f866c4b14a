//! Framework recommendation.
//!
//! Every framework in the catalog is scored against the chosen problem and
//! the current [`Situation`]. Each criterion yields an agreement in `[0, 1]`;
//! an unanswered question yields `0`. The weighted sum is normalised by the
//! catalog's total weight, so the score lands in `[0, 100]` and can only
//! grow as more answers line up with a framework.

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, ChannelFit, Framework, MetricKind, Problem, ScoringWeights},
    situation::{OfferClarity, ProofStrength, Situation},
};

/// How many frameworks the wizard shows unless told otherwise.
pub const DEFAULT_LIMIT: usize = 4;

/// A framework annotated with how well it fits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub framework: Framework,
    /// 0 to 100
    pub fit_score: u8,
}

/// Rank the catalog's frameworks for a problem.
///
/// Returns at most `limit` entries, best first, ties in catalog declaration
/// order. An absent or unknown problem yields an empty list.
pub fn recommend(
    catalog: &Catalog,
    problem_id: Option<&str>,
    situation: &Situation,
    limit: usize,
) -> Vec<Recommendation> {
    let Some(problem) = problem_id.and_then(|id| catalog.problem(id)) else {
        return Vec::new();
    };

    let mut ranked: Vec<Recommendation> = catalog
        .frameworks
        .iter()
        .map(|framework| Recommendation {
            fit_score: fit_score(&catalog.weights, problem, framework, situation),
            framework: framework.clone(),
        })
        .collect();

    // sort_by is stable, which keeps declaration order among equal scores
    ranked.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));
    ranked.truncate(limit);
    ranked
}

/// Score one framework in `[0, 100]`.
pub fn fit_score(
    weights: &ScoringWeights,
    problem: &Problem,
    framework: &Framework,
    situation: &Situation,
) -> u8 {
    let total = weights.total();
    if total <= 0.0 {
        return 0;
    }

    let weighted = [
        (weights.duration, duration_fit(framework, situation)),
        (weights.channel, channel_fit(framework, situation)),
        (weights.capacity, capacity_fit(framework, situation)),
        (weights.proof, proof_fit(framework, situation)),
        (weights.sales_motion, sales_motion_fit(framework, situation)),
        (weights.traffic, traffic_fit(framework, situation)),
        (weights.paid_budget, paid_budget_fit(framework, situation)),
        (weights.offer_clarity, offer_clarity_fit(framework, situation)),
        (
            weights.problem_affinity,
            Some(if problem.has_affinity(&framework.id) { 1.0 } else { 0.0 }),
        ),
    ]
    .into_iter()
    .map(|(weight, agreement)| weight * agreement.unwrap_or(0.0))
    .sum::<f64>();

    (100.0 * weighted / total).round().clamp(0.0, 100.0) as u8
}

fn duration_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let wanted = f64::from(situation.speed_needed?.days());
    let takes = f64::from(framework.default_duration.max(1));
    Some(if takes <= wanted { 1.0 } else { wanted / takes })
}

fn channel_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let channel = situation.primary_channel.as_deref()?;
    Some(match framework.channels.fit(channel) {
        ChannelFit::Recommended => 1.0,
        ChannelFit::Optional => 0.5,
        ChannelFit::NotRecommended | ChannelFit::Unlisted => 0.0,
    })
}

fn capacity_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let budget = situation.time_budget?;
    let needed = framework.outputs.deliverables.len();
    Some(match budget.deliverable_capacity() {
        Some(capacity) if needed > capacity => capacity as f64 / needed as f64,
        _ => 1.0,
    })
}

fn proof_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let proof = situation.proof_strength?;
    let kind = framework.metrics.primary.kind;
    Some(match (proof, kind) {
        (ProofStrength::None, MetricKind::Reach | MetricKind::Engagement) => 1.0,
        (ProofStrength::None, MetricKind::Conversion) => 0.25,
        (ProofStrength::None, MetricKind::Revenue) => 0.0,
        (ProofStrength::Weak, MetricKind::Engagement) => 1.0,
        (ProofStrength::Weak, MetricKind::Reach | MetricKind::Conversion) => 0.75,
        (ProofStrength::Weak, MetricKind::Revenue) => 0.5,
        (ProofStrength::Strong, MetricKind::Conversion | MetricKind::Revenue) => 1.0,
        (ProofStrength::Strong, MetricKind::Engagement) => 0.75,
        (ProofStrength::Strong, MetricKind::Reach) => 0.5,
    })
}

fn sales_motion_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let motion = situation.sales_motion?;
    let motions = &framework.fit.sales_motions;
    Some(if motions.is_empty() || motions.contains(&motion) { 1.0 } else { 0.0 })
}

fn traffic_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let traffic = situation.traffic?;
    Some(match framework.fit.min_traffic {
        Some(min) if traffic < min => 0.0,
        _ => 1.0,
    })
}

fn paid_budget_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let has_budget = situation.paid_budget?;
    Some(if framework.fit.needs_paid_budget && !has_budget { 0.0 } else { 1.0 })
}

fn offer_clarity_fit(framework: &Framework, situation: &Situation) -> Option<f64> {
    let clarity = situation.offer_clarity?;
    Some(
        if framework.fit.needs_clear_offer && clarity == OfferClarity::Fuzzy {
            0.0
        } else {
            1.0
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::situation::{SalesMotion, Speed, TimeBudget, TrafficLevel};

    fn builtin() -> Catalog {
        Catalog::builtin().expect("built-in catalog")
    }

    /// Two frameworks identical except for duration.
    fn twin_catalog() -> Catalog {
        let mut catalog = builtin();
        let mut week = catalog.frameworks[0].clone();
        week.id = "week".to_string();
        week.default_duration = 7;
        week.daily_actions.templates.clear();
        let mut month = week.clone();
        month.id = "month".to_string();
        month.default_duration = 30;
        // month first so declaration order cannot explain the ranking
        catalog.frameworks = vec![month, week];
        for problem in &mut catalog.problems {
            problem.frameworks.clear();
        }
        catalog
    }

    #[test]
    fn test_no_problem_fails_closed() {
        let catalog = builtin();
        assert!(recommend(&catalog, None, &Situation::default(), 4).is_empty());
        assert!(recommend(&catalog, Some("unknown"), &Situation::default(), 4).is_empty());
    }

    #[test]
    fn test_seven_day_framework_ranks_above_thirty_day() {
        let catalog = twin_catalog();
        let situation = Situation {
            speed_needed: Some(Speed::Week),
            ..Default::default()
        };

        let ranked = recommend(&catalog, Some("need-customers-fast"), &situation, 4);

        assert_eq!(ranked[0].framework.id, "week");
        assert_eq!(ranked[1].framework.id, "month");
        assert!(ranked[0].fit_score > ranked[1].fit_score);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let catalog = twin_catalog();
        let ranked = recommend(
            &catalog,
            Some("need-customers-fast"),
            &Situation::default(),
            4,
        );
        assert_eq!(ranked[0].fit_score, ranked[1].fit_score);
        assert_eq!(ranked[0].framework.id, "month");
        assert_eq!(ranked[1].framework.id, "week");
    }

    #[test]
    fn test_scores_bounded_sorted_and_capped() {
        let catalog = builtin();
        let situations = [
            Situation::default(),
            Situation {
                speed_needed: Some(Speed::Quarter),
                time_budget: Some(TimeBudget::Low),
                sales_motion: Some(SalesMotion::SelfServe),
                traffic: Some(TrafficLevel::None),
                proof_strength: Some(ProofStrength::None),
                offer_clarity: Some(OfferClarity::Fuzzy),
                paid_budget: Some(false),
                primary_channel: Some("tiktok".to_string()),
            },
            Situation {
                speed_needed: Some(Speed::Week),
                time_budget: Some(TimeBudget::High),
                sales_motion: Some(SalesMotion::SalesLed),
                traffic: Some(TrafficLevel::High),
                proof_strength: Some(ProofStrength::Strong),
                offer_clarity: Some(OfferClarity::Clear),
                paid_budget: Some(true),
                primary_channel: Some("email".to_string()),
            },
        ];

        for problem in &catalog.problems {
            for situation in &situations {
                for limit in [0, 1, 3, 4, 10] {
                    let ranked = recommend(&catalog, Some(&problem.id), situation, limit);
                    assert!(ranked.len() <= limit);
                    assert!(ranked.iter().all(|r| r.fit_score <= 100));
                    assert!(ranked.windows(2).all(|w| w[0].fit_score >= w[1].fit_score));
                }
            }
        }
    }

    #[test]
    fn test_default_limit_is_four() {
        let catalog = builtin();
        let ranked = recommend(
            &catalog,
            Some("need-customers-fast"),
            &Situation::default(),
            DEFAULT_LIMIT,
        );
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn test_deterministic() {
        let catalog = builtin();
        let situation = Situation {
            speed_needed: Some(Speed::Fortnight),
            primary_channel: Some("linkedin".to_string()),
            ..Default::default()
        };
        let first = recommend(&catalog, Some("nobody-knows-us"), &situation, 5);
        let second = recommend(&catalog, Some("nobody-knows-us"), &situation, 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_aligned_answers_never_lower_the_score() {
        let catalog = builtin();
        let problem = catalog.problem("need-customers-fast").unwrap();
        let framework = catalog.framework("founder-led-outreach").unwrap();

        let steps: Vec<Box<dyn Fn(&mut Situation)>> = vec![
            Box::new(|s| s.speed_needed = Some(Speed::Week)),
            Box::new(|s| s.primary_channel = Some("email".to_string())),
            Box::new(|s| s.time_budget = Some(TimeBudget::Medium)),
            Box::new(|s| s.proof_strength = Some(ProofStrength::Strong)),
            Box::new(|s| s.sales_motion = Some(SalesMotion::SalesLed)),
            Box::new(|s| s.traffic = Some(TrafficLevel::Low)),
            Box::new(|s| s.paid_budget = Some(false)),
            Box::new(|s| s.offer_clarity = Some(OfferClarity::Clear)),
        ];

        let mut situation = Situation::default();
        let mut previous = fit_score(&catalog.weights, problem, framework, &situation);
        for step in steps {
            step(&mut situation);
            let score = fit_score(&catalog.weights, problem, framework, &situation);
            assert!(score > previous, "{score} should exceed {previous}");
            previous = score;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn test_paid_requirement_penalised_without_budget() {
        let catalog = builtin();
        let problem = catalog.problem("need-customers-fast").unwrap();
        let framework = catalog.framework("paid-smoke-test").unwrap();
        let with_budget = Situation {
            paid_budget: Some(true),
            ..Default::default()
        };
        let without_budget = Situation {
            paid_budget: Some(false),
            ..Default::default()
        };
        assert!(
            fit_score(&catalog.weights, problem, framework, &with_budget)
                > fit_score(&catalog.weights, problem, framework, &without_budget)
        );
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let catalog = builtin();
        let weights = ScoringWeights {
            duration: 0.0,
            channel: 0.0,
            capacity: 0.0,
            proof: 0.0,
            sales_motion: 0.0,
            traffic: 0.0,
            paid_budget: 0.0,
            offer_clarity: 0.0,
            problem_affinity: 0.0,
        };
        let problem = &catalog.problems[0];
        assert_eq!(
            fit_score(&weights, problem, &catalog.frameworks[0], &Situation::default()),
            0
        );
    }
}
