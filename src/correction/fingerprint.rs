//! Anti-thrash memory: what was just corrected, per surface.
//!
//! Entries expire after a TTL. Recent outputs are kept separately for the
//! near-duplicate check, which uses a shorter window.

use std::{
    collections::{HashMap, VecDeque},
    time::{Duration, Instant},
};

use crate::{domain::text::analysis::ProcessedHistory, surface::SurfaceId};

const MAX_ENTRIES: usize = 256;
const MAX_RECENT_OUTPUTS: usize = 16;

/// Identity of a piece of content on a given surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub surface: SurfaceId,
    /// Char offset for word-level entries, `None` for whole buffers.
    pub offset: Option<usize>,
    pub hash: u32,
    pub len: usize,
}

impl Fingerprint {
    pub fn of_buffer(surface: SurfaceId, text: &str) -> Self {
        Self {
            surface,
            offset: None,
            hash: crc32fast::hash(text.as_bytes()),
            len: text.chars().count(),
        }
    }

    pub fn of_word(surface: SurfaceId, offset: usize, word: &str) -> Self {
        Self {
            surface,
            offset: Some(offset),
            hash: crc32fast::hash(word.as_bytes()),
            len: word.chars().count(),
        }
    }
}

#[derive(Clone, Debug)]
struct RecentOutput {
    surface: SurfaceId,
    text: String,
    at: Instant,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FingerprintPolicy {
    pub ttl: Duration,
    pub recent_window: Duration,
    pub similarity_threshold: f64,
}

impl Default for FingerprintPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            recent_window: Duration::from_secs(5),
            similarity_threshold: 0.8,
        }
    }
}

#[derive(Debug, Default)]
pub struct FingerprintCache {
    policy: FingerprintPolicy,
    entries: HashMap<Fingerprint, Instant>,
    recent: VecDeque<RecentOutput>,
}

impl FingerprintCache {
    pub fn new(policy: FingerprintPolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
            recent: VecDeque::new(),
        }
    }

    pub fn set_policy(&mut self, policy: FingerprintPolicy) {
        self.policy = policy;
    }

    pub fn record(&mut self, fingerprint: Fingerprint, now: Instant) {
        self.prune(now);
        if self.entries.len() >= MAX_ENTRIES
            && let Some(oldest) = self.entries.iter().min_by_key(|(_, at)| **at).map(|(k, _)| *k)
        {
            self.entries.remove(&oldest);
        }
        self.entries.insert(fingerprint, now);
    }

    /// Records the text a batch produced, both exactly and for the similarity check.
    pub fn record_output(&mut self, surface: SurfaceId, text: &str, now: Instant) {
        self.record(Fingerprint::of_buffer(surface, text), now);
        self.recent.push_back(RecentOutput {
            surface,
            text: text.to_owned(),
            at: now,
        });
        while self.recent.len() > MAX_RECENT_OUTPUTS {
            let _ = self.recent.pop_front();
        }
    }

    pub fn contains(&self, fingerprint: &Fingerprint, now: Instant) -> bool {
        self.entries
            .get(fingerprint)
            .is_some_and(|at| now.saturating_duration_since(*at) < self.policy.ttl)
    }

    /// True when `text` is at least as similar as the threshold to an output this
    /// surface received within the recent window.
    pub fn resembles_recent_output(&self, surface: SurfaceId, text: &str, now: Instant) -> bool {
        self.recent
            .iter()
            .filter(|r| r.surface == surface)
            .filter(|r| now.saturating_duration_since(r.at) < self.policy.recent_window)
            .any(|r| strsim::normalized_levenshtein(&r.text, text) >= self.policy.similarity_threshold)
    }

    pub fn prune(&mut self, now: Instant) {
        let ttl = self.policy.ttl;
        let window = self.policy.recent_window;
        self.entries
            .retain(|_, at| now.saturating_duration_since(*at) < ttl);
        self.recent
            .retain(|r| now.saturating_duration_since(r.at) < window);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view bound to one surface and instant, as the analyzer consumes it.
    pub fn view(&self, surface: SurfaceId, now: Instant) -> SurfaceHistory<'_> {
        SurfaceHistory {
            cache: self,
            surface,
            now,
        }
    }
}

pub struct SurfaceHistory<'a> {
    cache: &'a FingerprintCache,
    surface: SurfaceId,
    now: Instant,
}

impl ProcessedHistory for SurfaceHistory<'_> {
    fn already_processed(&self, text: &str) -> bool {
        self.cache
            .contains(&Fingerprint::of_buffer(self.surface, text), self.now)
    }

    fn recently_produced(&self, text: &str) -> bool {
        self.cache.resembles_recent_output(self.surface, text, self.now)
    }
}
