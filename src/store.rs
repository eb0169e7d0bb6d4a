//! The knowledge store: durable home of the [`RocketKnowledgeState`].
//!
//! The store is a pass-through. It never computes subsystem values itself;
//! its own logic is limited to picking the priority target and keeping the
//! report history capped.

use anyhow::Result;
use thiserror::Error;

use crate::db::Database;
use crate::models::*;

/// Key the state document is stored under.
pub const STORAGE_KEY: &str = "mairis_prime_blueprint_v5";

/// Why an imported document was turned away.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import rejected: document is not valid JSON: {0}")]
    NotJson(serde_json::Error),

    #[error("Import rejected: document has no `subsystems` key")]
    MissingSubsystems,

    #[error("Import rejected: {0}")]
    Invalid(serde_json::Error),

    #[error("Import failed to persist: {0}")]
    Persistence(anyhow::Error),
}

#[derive(Clone)]
pub struct KnowledgeStore {
    db: Database,
}

impl KnowledgeStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Load the persisted state, falling back to genesis.
    ///
    /// Never fails: a missing, unreadable or structurally invalid document is
    /// treated as absent.
    pub fn load(&self) -> RocketKnowledgeState {
        let body = match self.db.get_document(STORAGE_KEY) {
            Ok(Some(body)) => body,
            Ok(None) => return RocketKnowledgeState::genesis(),
            Err(e) => {
                tracing::warn!("Failed to read persisted state, using genesis: {}", e);
                return RocketKnowledgeState::genesis();
            }
        };

        match serde_json::from_str::<RocketKnowledgeState>(&body) {
            Ok(mut state) => {
                state.past_reports.truncate(MAX_PAST_REPORTS);
                state
            }
            Err(e) => {
                tracing::warn!("Persisted state is malformed, using genesis: {}", e);
                RocketKnowledgeState::genesis()
            }
        }
    }

    /// Overwrite the persisted document with `state`.
    pub fn save(&self, state: &RocketKnowledgeState) -> Result<()> {
        let body = serde_json::to_string(state)?;
        self.db.put_document(STORAGE_KEY, &body)
    }

    /// Discard everything and return to genesis.
    ///
    /// Irreversible. Callers are responsible for confirming intent first.
    pub fn reset(&self) -> Result<RocketKnowledgeState> {
        let genesis = RocketKnowledgeState::genesis();
        let body = serde_json::to_string(&genesis)?;
        self.db.replace_document(STORAGE_KEY, &body)?;
        tracing::warn!("Knowledge state reset to genesis");
        Ok(genesis)
    }

    /// Validate and persist an imported state document.
    ///
    /// Nothing is written unless the whole document is accepted.
    pub fn import(&self, document: &str) -> Result<RocketKnowledgeState, ImportError> {
        let value: serde_json::Value =
            serde_json::from_str(document).map_err(ImportError::NotJson)?;
        if value.get("subsystems").is_none() {
            return Err(ImportError::MissingSubsystems);
        }
        let mut state: RocketKnowledgeState =
            serde_json::from_value(value).map_err(ImportError::Invalid)?;
        state.past_reports.truncate(MAX_PAST_REPORTS);
        self.save(&state).map_err(ImportError::Persistence)?;
        Ok(state)
    }
}

/// Render the full state as pretty-printed JSON for download.
pub fn export(state: &RocketKnowledgeState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Pick the subsystem the next cycle should focus on.
///
/// A pinned override always wins. Otherwise the subsystem with the strictly
/// lowest `status`; ties go to whichever comes first in
/// [`SubsystemKey::ALL`].
pub fn select_priority_target(
    state: &RocketKnowledgeState,
    pinned: Option<SubsystemKey>,
) -> SubsystemKey {
    if let Some(key) = pinned {
        return key;
    }

    let mut weakest = SubsystemKey::ALL[0];
    let mut lowest = state.subsystems.get(weakest).status;
    for (key, subsystem) in state.subsystems.iter().skip(1) {
        if subsystem.status < lowest {
            weakest = key;
            lowest = subsystem.status;
        }
    }
    weakest
}

/// Attach `report` to the head of the history carried over from `current`.
///
/// Every other field of the result comes from `next`, the state the
/// collaborator produced.
pub fn merge(
    current: &RocketKnowledgeState,
    mut next: RocketKnowledgeState,
    report: ResearchReport,
) -> RocketKnowledgeState {
    next.past_reports = std::iter::once(report)
        .chain(current.past_reports.iter().cloned())
        .take(MAX_PAST_REPORTS)
        .collect();
    next
}
