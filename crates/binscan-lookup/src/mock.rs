//! Scripted lookup transport for deterministic testing

use crate::LookupError;
use binscan_domain::traits::BinLookup;
use binscan_domain::{Attempt, Bin, BinDetails, LookupResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::time::Instant;

/// One scripted reply
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// 200 with a payload
    Found(BinDetails),
    /// 200 with an empty payload
    NoData,
    /// 429
    RateLimited,
    /// Any other HTTP status
    Status(u16),
    /// Request timed out
    Timeout,
}

impl MockReply {
    fn into_attempt(self) -> Attempt<LookupError> {
        match self {
            MockReply::Found(details) => Attempt::Success(LookupResponse::Found(details)),
            MockReply::NoData => Attempt::Success(LookupResponse::NoData),
            MockReply::RateLimited => Attempt::Retryable(LookupError::RateLimited),
            MockReply::Timeout => Attempt::Retryable(LookupError::Timeout),
            MockReply::Status(429) => Attempt::Retryable(LookupError::RateLimited),
            MockReply::Status(code) => Attempt::Terminal(LookupError::status(code)),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    scripts: HashMap<Bin, VecDeque<MockReply>>,
    calls: HashMap<Bin, Vec<Instant>>,
}

/// Lookup transport that replays scripted replies without network calls
///
/// Each bin has a queue of replies consumed one per call; once a bin's queue is
/// empty (or it never had one) the default reply is returned. Clones share
/// scripts and call history.
///
/// # Examples
///
/// ```
/// use binscan_domain::traits::BinLookup;
/// use binscan_domain::{Attempt, Bin};
/// use binscan_lookup::{MockLookup, MockReply};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bin = Bin::parse("450000").unwrap();
/// let mock = MockLookup::new(MockReply::NoData);
/// mock.script(&bin, [MockReply::RateLimited]);
///
/// assert!(mock.attempt(&bin).await.is_retryable());
/// assert!(matches!(mock.attempt(&bin).await, Attempt::Success(_)));
/// assert_eq!(mock.call_count(&bin), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockLookup {
    default_reply: MockReply,
    state: Arc<Mutex<MockState>>,
}

impl MockLookup {
    /// Create a mock answering `default_reply` for every unscripted call
    pub fn new(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue replies for a specific bin, consumed in order
    pub fn script(&self, bin: &Bin, replies: impl IntoIterator<Item = MockReply>) {
        self.lock()
            .scripts
            .entry(bin.clone())
            .or_default()
            .extend(replies);
    }

    /// Number of calls made for `bin`
    pub fn call_count(&self, bin: &Bin) -> usize {
        self.lock().calls.get(bin).map_or(0, Vec::len)
    }

    /// Number of calls made across all bins
    pub fn total_calls(&self) -> usize {
        self.lock().calls.values().map(Vec::len).sum()
    }

    /// Instants at which `bin` was looked up
    pub fn call_times(&self, bin: &Bin) -> Vec<Instant> {
        self.lock().calls.get(bin).cloned().unwrap_or_default()
    }

    /// Forget recorded calls, keeping scripts
    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the history from the others
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn next_reply(&self, bin: &Bin) -> MockReply {
        let mut state = self.lock();
        state.calls.entry(bin.clone()).or_default().push(Instant::now());
        state
            .scripts
            .get_mut(bin)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

impl Default for MockLookup {
    fn default() -> Self {
        Self::new(MockReply::NoData)
    }
}

impl BinLookup for MockLookup {
    type Error = LookupError;

    async fn attempt(&self, bin: &Bin) -> Attempt<LookupError> {
        self.next_reply(bin).into_attempt()
    }
}
