use std::path::{Path, PathBuf};

use tracing::{info, warn};

const APP_DIR: &str = "grammar-galaxy";
const STUDENT_ID_FILE: &str = "student-id";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub data_dir: PathBuf,
    /// `GALAXY_STUDENT_ID`, if set. See `resolve_student_id`.
    pub student_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let data_dir = std::env::var("GALAXY_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let student_id = std::env::var("GALAXY_STUDENT_ID")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Self {
            log_level,
            data_dir,
            student_id,
        }
    }

    /// The configured id, else the one remembered in the data dir, else a
    /// new UUID v4 that is written there so later runs reuse it.
    pub fn resolve_student_id(&self) -> std::io::Result<String> {
        if let Some(id) = &self.student_id {
            return Ok(id.clone());
        }
        remembered_student_id(&self.data_dir)
    }
}

fn remembered_student_id(data_dir: &Path) -> std::io::Result<String> {
    let path = data_dir.join(STUDENT_ID_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) if !contents.trim().is_empty() => {
            let id = contents.trim().to_string();
            info!(student_id = %id, path = %path.display(), "using remembered student id");
            return Ok(id);
        }
        Ok(_) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }

    let id = uuid::Uuid::new_v4().to_string();
    std::fs::create_dir_all(data_dir)?;
    std::fs::write(&path, &id)?;
    warn!(
        student_id = %id,
        path = %path.display(),
        "GALAXY_STUDENT_ID not set, generated a new student id"
    );
    Ok(id)
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./data"))
}
