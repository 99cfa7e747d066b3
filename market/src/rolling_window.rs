use std::collections::VecDeque;

use corelib::PriceSample;

/// Default time bound for a window (5 minutes).
pub const DEFAULT_MAX_AGE_MS: u64 = 300_000;
/// Default count bound for a window.
pub const DEFAULT_MAX_POINTS: usize = 300;

/// A price tagged with the arrival sequence of the sample it came from.
#[derive(Clone, Copy, Debug)]
struct SeqValue {
    seq: u64,
    value: f64,
}

/// Time- and count-bounded price history for a single symbol.
///
/// Samples are kept in arrival order. Two monotonic deques track the
/// extrema so `min()` / `max()` are O(1) regardless of window length:
/// the front of `max_queue` is always the largest retained price and the
/// front of `min_queue` the smallest.
#[derive(Debug)]
pub struct SymbolWindow {
    /// All retained samples (ordered by arrival).
    samples: VecDeque<PriceSample>,

    /// Non-increasing prices; front is the current maximum.
    max_queue: VecDeque<SeqValue>,
    /// Non-decreasing prices; front is the current minimum.
    min_queue: VecDeque<SeqValue>,

    /// Sequence number of `samples.front()`.
    head_seq: u64,
    /// Sequence number the next pushed sample will get.
    next_seq: u64,

    /// Newest observation time seen; eviction cutoff is measured from here.
    newest_ts_ms: u64,

    max_age_ms: u64,
    max_points: usize,
}

impl SymbolWindow {
    pub fn new(max_age_ms: u64, max_points: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_points.min(1024)),
            max_queue: VecDeque::new(),
            min_queue: VecDeque::new(),
            head_seq: 0,
            next_seq: 0,
            newest_ts_ms: 0,
            max_age_ms,
            max_points: max_points.max(1),
        }
    }

    /// Appends a sample and evicts by age, then by count.
    ///
    /// Returns `false` (and leaves the window untouched) for a sample with a
    /// non-positive or non-finite price, or one that arrives already older
    /// than the window relative to the newest retained observation.
    pub fn push(&mut self, sample: PriceSample) -> bool {
        if !sample.is_well_formed() {
            return false;
        }
        if !self.samples.is_empty() && sample.observed_at_ms < self.cutoff_ms() {
            return false;
        }

        let entry = SeqValue {
            seq: self.next_seq,
            value: sample.price,
        };
        self.next_seq += 1;

        while let Some(back) = self.max_queue.back() {
            if back.value < entry.value {
                self.max_queue.pop_back();
            } else {
                break;
            }
        }
        self.max_queue.push_back(entry);

        while let Some(back) = self.min_queue.back() {
            if back.value > entry.value {
                self.min_queue.pop_back();
            } else {
                break;
            }
        }
        self.min_queue.push_back(entry);

        self.newest_ts_ms = self.newest_ts_ms.max(sample.observed_at_ms);
        self.samples.push_back(sample);

        self.evict_old();
        self.evict_overflow();

        true
    }

    /// Evict samples older than `max_age_ms` relative to the newest observation.
    fn evict_old(&mut self) {
        let cutoff = self.cutoff_ms();

        while let Some(front) = self.samples.front() {
            if front.observed_at_ms < cutoff {
                self.pop_front();
            } else {
                break;
            }
        }
    }

    fn cutoff_ms(&self) -> u64 {
        self.newest_ts_ms.saturating_sub(self.max_age_ms)
    }

    fn evict_overflow(&mut self) {
        while self.samples.len() > self.max_points {
            self.pop_front();
        }
    }

    fn pop_front(&mut self) {
        if self.samples.pop_front().is_none() {
            return;
        }

        let removed = self.head_seq;
        self.head_seq += 1;

        if self.max_queue.front().is_some_and(|v| v.seq == removed) {
            self.max_queue.pop_front();
        }
        if self.min_queue.front().is_some_and(|v| v.seq == removed) {
            self.min_queue.pop_front();
        }
    }

    pub fn max(&self) -> Option<f64> {
        self.max_queue.front().map(|v| v.value)
    }

    pub fn min(&self) -> Option<f64> {
        self.min_queue.front().map(|v| v.value)
    }

    /// Arithmetic mean of all retained prices.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.price).sum();
        Some(sum / self.samples.len() as f64)
    }

    pub fn latest(&self) -> Option<&PriceSample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&PriceSample> {
        self.samples.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceSample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<PriceSample> {
        self.samples.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl Default for SymbolWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE_MS, DEFAULT_MAX_POINTS)
    }
}
