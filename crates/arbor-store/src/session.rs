//! Draft estimate and last finalized estimate

use arbor_domain::{EstimateDraft, SessionRepository};
use arbor_types::{Error, FinalizedEstimate, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SessionState {
    draft: EstimateDraft,
    estimate: Option<FinalizedEstimate>,
}

/// Persistent store for the estimate being built
pub struct SessionStore {
    store_path: PathBuf,
    state: SessionState,
}

impl SessionStore {
    /// Create or load a session store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join(SESSION_FILE);

        let state = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            match serde_json::from_reader(reader) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %store_path.display(), error = %e, "unreadable session, starting fresh");
                    SessionState::default()
                }
            }
        } else {
            SessionState::default()
        };
        debug!(
            items = state.draft.line_items.len(),
            finalized = state.estimate.is_some(),
            "session loaded"
        );

        Ok(Self { store_path, state })
    }

    pub fn path(&self) -> &Path {
        &self.store_path
    }

    /// Save store to disk
    fn persist(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.state)?;
        Ok(())
    }
}

impl SessionRepository for SessionStore {
    fn load_draft(&self) -> std::result::Result<EstimateDraft, Error> {
        Ok(self.state.draft.clone())
    }

    fn save_draft(&mut self, draft: &EstimateDraft) -> std::result::Result<(), Error> {
        self.state.draft = draft.clone();
        self.persist()
    }

    fn load_estimate(&self) -> std::result::Result<Option<FinalizedEstimate>, Error> {
        Ok(self.state.estimate.clone())
    }

    fn save_estimate(&mut self, estimate: &FinalizedEstimate) -> std::result::Result<(), Error> {
        self.state.estimate = Some(estimate.clone());
        self.persist()?;
        info!(final_total = estimate.final_total, "finalized estimate saved");
        Ok(())
    }

    fn clear(&mut self) -> std::result::Result<(), Error> {
        self.state = SessionState::default();
        self.persist()?;
        info!("session cleared");
        Ok(())
    }
}
