use std::fs;
use std::path::Path;

use chrono::Utc;
use scout_core::CompletedAnalysisSnapshot;
use scout_engine::AtomicFileWriter;
use scout_logging::{scout_error, scout_info, scout_warn};
use serde::{Deserialize, Serialize};

const HISTORY_FILENAME: &str = ".scout_history.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedAnalysis {
    url: String,
    page_count: usize,
    seo_attached: bool,
    finished_utc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedHistory {
    completed: Vec<PersistedAnalysis>,
}

pub(crate) fn load_history(state_dir: &Path) -> Vec<CompletedAnalysisSnapshot> {
    let path = state_dir.join(HISTORY_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Vec::new();
        }
        Err(err) => {
            scout_warn!("Failed to read analysis history from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let history: PersistedHistory = match ron::from_str(&content) {
        Ok(history) => history,
        Err(err) => {
            scout_warn!("Failed to parse analysis history from {:?}: {}", path, err);
            return Vec::new();
        }
    };

    let completed = history
        .completed
        .into_iter()
        .map(|entry| CompletedAnalysisSnapshot {
            url: entry.url,
            page_count: entry.page_count,
            seo_attached: entry.seo_attached,
            finished_at: Some(entry.finished_utc),
        })
        .collect();

    scout_info!("Loaded analysis history from {:?}", path);
    completed
}

pub(crate) fn save_history(state_dir: &Path, completed: &[CompletedAnalysisSnapshot]) {
    let history = PersistedHistory {
        completed: completed
            .iter()
            .map(|entry| PersistedAnalysis {
                url: entry.url.clone(),
                page_count: entry.page_count,
                seo_attached: entry.seo_attached,
                finished_utc: entry
                    .finished_at
                    .clone()
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
            })
            .collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&history, pretty) {
        Ok(text) => text,
        Err(err) => {
            scout_error!("Failed to serialize analysis history: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir.to_path_buf());
    if let Err(err) = writer.write(HISTORY_FILENAME, &content) {
        scout_error!("Failed to write analysis history to {:?}: {}", state_dir, err);
    }
}
