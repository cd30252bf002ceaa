use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use grammar_galaxy_engine::achievements::{Achievement, ProgressSnapshot};
use grammar_galaxy_engine::adaptive::{Difficulty, EngineConfig, LearningProfile, PerformanceRecord, Recommendation};
use grammar_galaxy_engine::companion::companion_evolution;
use grammar_galaxy_engine::config::Config;
use grammar_galaxy_engine::logging::init_tracing;
use grammar_galaxy_engine::persistence::JsonFileStore;
use grammar_galaxy_engine::{GameSession, StoreError};

#[derive(Debug, thiserror::Error)]
enum ReplayError {
    #[error("usage: grammar-galaxy-replay <records.json> [snapshot.json]")]
    Usage,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to resolve student id: {0}")]
    StudentId(std::io::Error),
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("failed to encode report: {0}")]
    Report(serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayReport<'a> {
    student_id: &'a str,
    mastery_rule: &'static str,
    records_replayed: usize,
    profile: &'a LearningProfile,
    recommendations: Vec<Recommendation>,
    adaptive_difficulty: BTreeMap<String, Difficulty>,
    newly_unlocked: Vec<Achievement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    evolution_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    companion: Option<&'static str>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ReplayError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ReplayError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn run(config: &Config) -> Result<String, ReplayError> {
    let mut args = std::env::args_os().skip(1);
    let records_path = PathBuf::from(args.next().ok_or(ReplayError::Usage)?);
    let snapshot_path = args.next().map(PathBuf::from);

    let records: Vec<PerformanceRecord> = read_json(&records_path)?;
    let snapshot: Option<ProgressSnapshot> = snapshot_path.as_deref().map(read_json::<ProgressSnapshot>).transpose()?;

    let student_id = config.resolve_student_id().map_err(ReplayError::StudentId)?;
    let store = JsonFileStore::new(&config.data_dir);
    let data_dir = store.dir().to_path_buf();
    let mut session = GameSession::load(Box::new(store), &student_id, EngineConfig::from_env())?;

    let records_replayed = records.len();
    let last_active = records.iter().map(|r| r.completed_at).max();
    for record in records {
        session.record_performance(record);
    }
    // A replayed batch counts as activity on the day of its latest record.
    // Batches older than the last active day leave the streak alone.
    if let Some(at) = last_active {
        let streak = &session.profile().streak_data;
        if streak.current == 0 || at >= streak.last_active_date {
            session.engine_mut().update_streak_at(true, at);
        }
    }

    let newly_unlocked = snapshot
        .as_ref()
        .map(|s| session.check_achievements(s))
        .unwrap_or_default();
    let evolution_level = snapshot.as_ref().map(|s| session.evolution_level(s));

    session.save()?;
    tracing::info!(
        student_id = %student_id,
        records = records_replayed,
        data_dir = %data_dir.display(),
        "replay saved"
    );

    let engine = session.engine();
    let adaptive_difficulty = engine
        .learning_profile()
        .concept_mastery
        .keys()
        .map(|concept| (concept.clone(), engine.adaptive_difficulty(concept)))
        .collect();

    let report = ReplayReport {
        student_id: &student_id,
        mastery_rule: engine.rule_name(),
        records_replayed,
        profile: engine.learning_profile(),
        recommendations: engine.recommendations(),
        adaptive_difficulty,
        newly_unlocked,
        evolution_level,
        companion: evolution_level.map(|level| companion_evolution(level).name),
    };

    serde_json::to_string_pretty(&report).map_err(ReplayError::Report)
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_level);

    match run(&config) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
