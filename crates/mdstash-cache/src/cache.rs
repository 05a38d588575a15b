use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use mdstash_hash::ContentHasher;
use mdstash_types::ContentDigest;
use tracing::debug;

/// Outcome of a transmission check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendDecision {
    /// Content changed since the last send; transmit this converted text.
    Send(String),
    /// Content is unchanged; nothing to transmit.
    Suppressed,
}

/// Per-instance cache state: the last conversion and the last-sent digest.
#[derive(Default)]
struct InstanceState {
    converted: Option<(ContentDigest, String)>,
    last_sent: Option<ContentDigest>,
}

/// Keyed render cache.
///
/// Each instance identifier maps to its own state behind its own `Mutex`,
/// inside an outer `RwLock`ed map. Holding the per-instance lock across
/// the hash-compare-then-write sequence serializes concurrent callers on
/// one identifier, so there is no lost-update race between comparison and
/// cache write. Lookups never fail: a missing entry is simply a miss and
/// gets recomputed.
pub struct RenderCache {
    instances: RwLock<HashMap<String, Arc<Mutex<InstanceState>>>>,
}

impl RenderCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Number of instances with cache state.
    pub fn len(&self) -> usize {
        self.instances.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no instance has cache state.
    pub fn is_empty(&self) -> bool {
        self.instances.read().expect("lock poisoned").is_empty()
    }

    /// Drop all cache state.
    pub fn clear(&self) {
        self.instances.write().expect("lock poisoned").clear();
    }

    /// Return the cached conversion for `raw` if its digest matches the
    /// last one seen for this instance; otherwise run `convert`, cache the
    /// result, and return it. At most one conversion happens per distinct
    /// content per instance between invalidations.
    pub fn get_or_convert<F>(&self, id: &str, raw: &str, convert: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        let digest = ContentHasher::DOCUMENT.hash_text(raw);
        let state = self.instance(id);
        let mut state = state.lock().expect("lock poisoned");

        if let Some((cached, converted)) = &state.converted {
            if *cached == digest {
                debug!(id, "conversion cache hit");
                return converted.clone();
            }
        }

        let converted = convert(raw);
        state.converted = Some((digest, converted.clone()));
        debug!(id, "conversion cache refreshed");
        converted
    }

    /// Decide whether `raw` needs transmitting to the rendering surface.
    ///
    /// If the digest equals the last-sent digest for this instance, the
    /// send is suppressed. Otherwise the digest is recorded and the
    /// instance's current converted text is returned, reusing the cached
    /// conversion when it matches, running `convert` when it does not.
    pub fn should_send<F>(&self, id: &str, raw: &str, convert: F) -> SendDecision
    where
        F: FnOnce(&str) -> String,
    {
        let digest = ContentHasher::DOCUMENT.hash_text(raw);
        let state = self.instance(id);
        let mut state = state.lock().expect("lock poisoned");

        if state.last_sent == Some(digest) {
            debug!(id, "send suppressed, content unchanged");
            return SendDecision::Suppressed;
        }
        state.last_sent = Some(digest);

        let converted = match &state.converted {
            Some((cached, converted)) if *cached == digest => converted.clone(),
            _ => {
                let converted = convert(raw);
                state.converted = Some((digest, converted.clone()));
                converted
            }
        };
        SendDecision::Send(converted)
    }

    fn instance(&self, id: &str) -> Arc<Mutex<InstanceState>> {
        if let Some(state) = self.instances.read().expect("lock poisoned").get(id) {
            return Arc::clone(state);
        }
        let mut map = self.instances.write().expect("lock poisoned");
        Arc::clone(map.entry(id.to_string()).or_default())
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RenderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCache")
            .field("instances", &self.len())
            .finish()
    }
}
