//! Concept mastery tracking.
//!
//! Two update rules exist and they are not equivalent:
//! - `IncrementalNudge` (canonical): +correct_delta on a first-try success,
//!   -incorrect_delta otherwise, clamped to [0, 1]. Not idempotent.
//! - `RollingSuccessRate`: recomputed from scratch as the first-try success
//!   rate over the concept's last `rolling_window` records.
//!
//! After either rule runs, the struggling/mastered sets are re-derived for
//! the concept so that it sits in at most one of them.

use tracing::debug;

use crate::adaptive::config::{MasteryParams, MasteryRuleKind};
use crate::adaptive::types::{LearningProfile, PerformanceRecord};

const SCORE_PRECISION: f64 = 10_000.0;

pub trait MasteryRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// `concept_history` holds every record for the concept in arrival order,
    /// including `record` as its last element.
    fn next_mastery(
        &self,
        current: Option<f64>,
        record: &PerformanceRecord,
        concept_history: &[&PerformanceRecord],
    ) -> f64;
}

#[derive(Debug, Clone)]
pub struct IncrementalNudge {
    params: MasteryParams,
}

impl IncrementalNudge {
    pub fn new(params: MasteryParams) -> Self {
        Self { params }
    }
}

impl MasteryRule for IncrementalNudge {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn next_mastery(
        &self,
        current: Option<f64>,
        record: &PerformanceRecord,
        _concept_history: &[&PerformanceRecord],
    ) -> f64 {
        let base = current.unwrap_or(self.params.initial);
        let delta = if record.correct_on_first_try {
            self.params.correct_delta
        } else {
            -self.params.incorrect_delta
        };
        clamp_score(base + delta)
    }
}

#[derive(Debug, Clone)]
pub struct RollingSuccessRate {
    params: MasteryParams,
}

impl RollingSuccessRate {
    pub fn new(params: MasteryParams) -> Self {
        Self { params }
    }
}

impl MasteryRule for RollingSuccessRate {
    fn name(&self) -> &'static str {
        "rolling_average"
    }

    fn next_mastery(
        &self,
        current: Option<f64>,
        _record: &PerformanceRecord,
        concept_history: &[&PerformanceRecord],
    ) -> f64 {
        let start = concept_history
            .len()
            .saturating_sub(self.params.rolling_window);
        match success_rate(concept_history[start..].iter().copied()) {
            Some(rate) => clamp_score(rate),
            None => current.unwrap_or(self.params.initial),
        }
    }
}

pub fn build_rule(kind: MasteryRuleKind, params: &MasteryParams) -> Box<dyn MasteryRule> {
    match kind {
        MasteryRuleKind::Incremental => Box::new(IncrementalNudge::new(params.clone())),
        MasteryRuleKind::RollingAverage => Box::new(RollingSuccessRate::new(params.clone())),
    }
}

/// First-try success rate, `None` for an empty slice.
pub fn success_rate<'a, I>(records: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    let (total, correct) = records.into_iter().fold((0usize, 0usize), |(t, c), r| {
        (t + 1, c + usize::from(r.correct_on_first_try))
    });
    if total == 0 {
        None
    } else {
        Some(correct as f64 / total as f64)
    }
}

/// Clamps to [0, 1] and drops float noise below four decimals, so that
/// 0.5 + 3 * 0.1 lands on 0.8 exactly.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    ((value.clamp(0.0, 1.0) * SCORE_PRECISION).round() / SCORE_PRECISION).clamp(0.0, 1.0)
}

/// Re-derives struggling/mastered membership for one concept.
pub fn reclassify_concept(profile: &mut LearningProfile, concept: &str, params: &MasteryParams) {
    let Some(mastery) = profile.mastery(concept) else {
        return;
    };

    let struggling = mastery < params.struggling_below;
    let mastered = mastery >= params.mastered_from;

    set_membership(&mut profile.struggling_concepts, concept, struggling);
    set_membership(&mut profile.mastered_concepts, concept, mastered);

    debug!(concept, mastery, struggling, mastered, "concept reclassified");
}

fn set_membership(set: &mut Vec<String>, concept: &str, member: bool) {
    let present = set.iter().any(|c| c == concept);
    if member && !present {
        set.push(concept.to_string());
    } else if !member && present {
        set.retain(|c| c != concept);
    }
}
