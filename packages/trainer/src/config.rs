use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Daily log files go here when set
    pub log_dir: Option<PathBuf>,
    pub history_path: PathBuf,
    pub progress_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = std::env::var("WOORDJES_LOG_DIR")
            .ok()
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let history_path = std::env::var("WOORDJES_HISTORY")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./history.json"));

        let progress_path = std::env::var("WOORDJES_PROGRESS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./progress.json"));

        let snapshot_path = std::env::var("WOORDJES_SNAPSHOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./session.json"));

        let seed = std::env::var("WOORDJES_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());

        Self {
            log_level,
            log_dir,
            history_path,
            progress_path,
            snapshot_path,
            seed,
        }
    }
}
