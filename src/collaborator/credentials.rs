use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// The model API credential and the "credential required" gate.
///
/// Selecting a credential is optimistic: the gate opens immediately and is
/// only re-evaluated by the next [`check`](Self::check) or closed again by
/// [`mark_required`](Self::mark_required) when the API rejects the key.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    key: Arc<RwLock<Option<String>>>,
    required: Arc<AtomicBool>,
}

impl Credentials {
    /// Read the key from `MAIRIS_GEMINI_API_KEY`, falling back to `API_KEY`.
    pub fn from_env() -> Self {
        let key = std::env::var("MAIRIS_GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty());
        Self::new(key)
    }

    pub fn new(key: Option<String>) -> Self {
        let required = key.is_none();
        Self {
            key: Arc::new(RwLock::new(key)),
            required: Arc::new(AtomicBool::new(required)),
        }
    }

    pub fn current(&self) -> Option<String> {
        self.key.read().expect("credentials lock poisoned").clone()
    }

    /// Re-derive the gate from whether a key is present. Returns `true` when
    /// a credential is required.
    pub fn check(&self) -> bool {
        let required = self.current().is_none();
        self.required.store(required, Ordering::SeqCst);
        required
    }

    pub fn is_required(&self) -> bool {
        self.required.load(Ordering::SeqCst)
    }

    /// Install a new key and open the gate without verifying it.
    pub fn select(&self, key: impl Into<String>) {
        *self.key.write().expect("credentials lock poisoned") = Some(key.into());
        self.required.store(false, Ordering::SeqCst);
    }

    /// Close the gate after the API rejected the current key.
    pub fn mark_required(&self) {
        self.required.store(true, Ordering::SeqCst);
    }
}
