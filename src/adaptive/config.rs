use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum MasteryRuleKind {
    #[default]
    Incremental,
    RollingAverage,
}

impl MasteryRuleKind {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().replace('-', "_").as_str() {
            "rolling_average" | "rolling" => Self::RollingAverage,
            _ => Self::Incremental,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasteryParams {
    pub initial: f64,
    pub correct_delta: f64,
    pub incorrect_delta: f64,
    pub rolling_window: usize,
    pub struggling_below: f64,
    pub mastered_from: f64,
}

impl Default for MasteryParams {
    fn default() -> Self {
        Self {
            initial: 0.5,
            correct_delta: 0.1,
            incorrect_delta: 0.05,
            rolling_window: 5,
            struggling_below: 0.3,
            mastered_from: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceParams {
    pub speed_window: usize,
    pub fast_below_secs: f64,
    pub slow_above_secs: f64,
    pub preference_window: usize,
    pub preference_success_rate: f64,
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self {
            speed_window: 10,
            fast_below_secs: 30.0,
            slow_above_secs: 90.0,
            preference_window: 5,
            preference_success_rate: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyParams {
    pub recent_window: usize,
    pub neutral_rate: f64,
    pub hard_rate_above: f64,
    pub hard_mastery_above: f64,
    pub easy_rate_below: f64,
    pub easy_mastery_below: f64,
}

impl Default for DifficultyParams {
    fn default() -> Self {
        Self {
            recent_window: 3,
            neutral_rate: 0.5,
            hard_rate_above: 0.8,
            hard_mastery_above: 0.7,
            easy_rate_below: 0.4,
            easy_mastery_below: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationParams {
    pub review_days_mastered: f64,
    pub review_days_familiar: f64,
    pub review_days_default: f64,
    pub review_mastered_above: f64,
    pub review_familiar_above: f64,
    pub advance_window: usize,
    pub advance_min_records: usize,
    pub advance_success_rate: f64,
    pub advance_max_avg_hints: f64,
    pub break_window: usize,
    pub break_min_records: usize,
    pub break_total_secs: f64,
    pub break_avg_attempts: f64,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            review_days_mastered: 7.0,
            review_days_familiar: 3.0,
            review_days_default: 1.0,
            review_mastered_above: 0.8,
            review_familiar_above: 0.5,
            advance_window: 5,
            advance_min_records: 3,
            advance_success_rate: 0.8,
            advance_max_avg_hints: 1.0,
            break_window: 10,
            break_min_records: 5,
            break_total_secs: 1800.0,
            break_avg_attempts: 3.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub mastery_rule: MasteryRuleKind,
    pub mastery: MasteryParams,
    pub inference: InferenceParams,
    pub difficulty: DifficultyParams,
    pub recommendation: RecommendationParams,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mastery_rule = std::env::var("MASTERY_RULE")
            .map(|v| MasteryRuleKind::parse(&v))
            .unwrap_or_default();

        Self {
            mastery_rule,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_parse() {
        assert_eq!(MasteryRuleKind::parse("rolling-average"), MasteryRuleKind::RollingAverage);
        assert_eq!(MasteryRuleKind::parse("ROLLING"), MasteryRuleKind::RollingAverage);
        assert_eq!(MasteryRuleKind::parse("whatever"), MasteryRuleKind::Incremental);
    }

    #[test]
    fn test_defaults_match_documented_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.mastery_rule, MasteryRuleKind::Incremental);
        assert_eq!(config.mastery.struggling_below, 0.3);
        assert_eq!(config.mastery.mastered_from, 0.8);
        assert_eq!(config.difficulty.recent_window, 3);
        assert_eq!(config.recommendation.break_total_secs, 1800.0);
    }
}
