//! Navigation history and platform history integration.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use feednav_model::{NavigationEvent, PageState};

/// Default maximum number of retained navigation events.
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 50;

// =============================================================================
// NAVIGATION HISTORY
// =============================================================================

/// Bounded log of committed transitions, oldest first.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    events: VecDeque<NavigationEvent>,
    max_length: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_LENGTH)
    }
}

impl NavigationHistory {
    /// Create an empty history. A zero maximum is raised to one.
    pub fn new(max_length: usize) -> Self {
        let max_length = max_length.max(1);
        Self {
            events: VecDeque::new(),
            max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Append an event, evicting the oldest ones over the maximum.
    pub fn push(&mut self, event: NavigationEvent) {
        self.events.push_back(event);
        while self.events.len() > self.max_length {
            self.events.pop_front();
        }
    }

    /// Find the back target for `current` and forget everything from it on.
    ///
    /// The target is the `from` of the newest event whose `from` differs
    /// from `current`. That event and all newer ones are removed, so
    /// repeated calls walk strictly backwards and eventually run dry.
    pub fn take_back_target(&mut self, current: &PageState) -> Option<PageState> {
        let index = self
            .events
            .iter()
            .rposition(|event| event.from() != current)?;
        let target = self.events[index].from().clone();
        self.events.truncate(index);
        Some(target)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NavigationEvent> {
        self.events.iter()
    }

    pub fn to_vec(&self) -> Vec<NavigationEvent> {
        self.events.iter().cloned().collect()
    }
}

// =============================================================================
// PLATFORM HISTORY
// =============================================================================

/// The host's history stack (for a browser, `pushState` and `location`).
pub trait HistoryAdapter: Send + Sync {
    /// Push a new entry for `location`, carrying `state` as its payload.
    fn push_entry(&self, location: &str, state: &PageState);

    /// The current location, path and query included.
    fn current_location(&self) -> String;
}

/// A history-restore notification (back/forward in the host).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSignal {
    /// State stored with the restored entry, if the entry has one.
    pub payload: Option<PageState>,
}

impl RestoreSignal {
    pub fn with_payload(state: PageState) -> Self {
        Self {
            payload: Some(state),
        }
    }
}

/// One entry of a [`MemoryHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub location: String,
    pub payload: Option<PageState>,
}

#[derive(Debug)]
struct MemoryHistoryInner {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

/// In-process stand-in for a browser history stack.
///
/// Clones share the same stack, so one handle can be given to the
/// [`StateManager`](crate::StateManager) and another kept to drive
/// back/forward.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    inner: Arc<Mutex<MemoryHistoryInner>>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryHistory {
    /// Start with a single entry for `location`, without payload.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryHistoryInner {
                entries: vec![HistoryEntry {
                    location: location.into(),
                    payload: None,
                }],
                cursor: 0,
            })),
        }
    }

    /// Simulate typing a URL: a new entry without payload.
    pub fn load_url(&self, location: impl Into<String>) {
        self.push(HistoryEntry {
            location: location.into(),
            payload: None,
        });
    }

    /// Step back one entry. `None` at the start of the stack.
    pub fn go_back(&self) -> Option<RestoreSignal> {
        let mut inner = self.lock();
        if inner.cursor == 0 {
            return None;
        }
        inner.cursor -= 1;
        Some(RestoreSignal {
            payload: inner.entries[inner.cursor].payload.clone(),
        })
    }

    /// Step forward one entry. `None` at the end of the stack.
    pub fn go_forward(&self) -> Option<RestoreSignal> {
        let mut inner = self.lock();
        if inner.cursor + 1 >= inner.entries.len() {
            return None;
        }
        inner.cursor += 1;
        Some(RestoreSignal {
            payload: inner.entries[inner.cursor].payload.clone(),
        })
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.lock().entries.clone()
    }

    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    pub fn location(&self) -> String {
        let inner = self.lock();
        inner.entries[inner.cursor].location.clone()
    }

    fn push(&self, entry: HistoryEntry) {
        let mut inner = self.lock();
        let keep = inner.cursor + 1;
        inner.entries.truncate(keep);
        inner.entries.push(entry);
        inner.cursor = inner.entries.len() - 1;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryHistoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HistoryAdapter for MemoryHistory {
    fn push_entry(&self, location: &str, state: &PageState) {
        self.push(HistoryEntry {
            location: location.to_string(),
            payload: Some(state.clone()),
        });
    }

    fn current_location(&self) -> String {
        self.location()
    }
}
