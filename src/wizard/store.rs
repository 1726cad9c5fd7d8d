use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::{HireKind, WizardState};

/// Drafts untouched for this long are dropped.
const DRAFT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

struct Draft {
    state: WizardState,
    touched: Instant,
}

/// In-progress wizard drafts, keyed by an opaque per-session owner token.
/// The cookie session carries only the token.
#[derive(Clone)]
pub struct WizardStore {
    drafts: Arc<Mutex<HashMap<(String, HireKind), Draft>>>,
    ttl: Duration,
}

impl Default for WizardStore {
    fn default() -> Self {
        Self::with_ttl(DRAFT_TTL)
    }
}

impl WizardStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            drafts: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn get(&self, owner: &str, kind: HireKind) -> Option<WizardState> {
        let map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        map.get(&(owner.to_string(), kind))
            .filter(|d| d.touched.elapsed() < self.ttl)
            .map(|d| d.state.clone())
    }

    /// Store `state`, dropping expired drafts of every owner on the way.
    pub fn put(&self, owner: &str, kind: HireKind, state: WizardState) {
        let mut map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        map.retain(|_, d| d.touched.elapsed() < self.ttl);
        map.insert(
            (owner.to_string(), kind),
            Draft {
                state,
                touched: Instant::now(),
            },
        );
    }

    pub fn remove(&self, owner: &str, kind: HireKind) {
        let mut map = self.drafts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&(owner.to_string(), kind));
    }

    pub fn len(&self) -> usize {
        self.drafts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
