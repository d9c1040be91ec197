//! Capacity-bounded slots indexed by a binary indexed tree.
//!
//! Slots are numbered from 1 to `len()` at the public API. Cell `i` of the
//! tree holds the sum of the values in `(i - lowbit(i), i]`.

use std::cmp;
use std::fmt;

use crate::bit::{ascend, descend, descent_len, highest_power_of_two_le};
use crate::error::StoreError;
use crate::trace::{NoTrace, TraceEvent, Tracer};

pub type Amount = i64;

/// Number of consecutive slots a single `store` may fill.
pub const DEFAULT_WINDOW: usize = 5;

/// Result of `store`. `stored + discarded` equals the requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOutcome {
    pub stored: Amount,
    pub discarded: Amount,
}

/// Result of `delete_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub index: usize,
    pub deleted: Amount,
}

/// How `range_sum` computes its answer. Both give the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeStrategy {
    /// Add up the slot values one by one.
    Direct,
    /// Subtract two prefix sums.
    Prefix,
}

impl RangeStrategy {
    /// Requires `1 <= left <= right`.
    pub(crate) fn pick(left: usize, right: usize) -> Self {
        if right - left + 1 < descent_len(right) + descent_len(left - 1) {
            RangeStrategy::Direct
        } else {
            RangeStrategy::Prefix
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndexedCapacityStore<T = NoTrace> {
    values: Vec<Amount>,
    tree: Vec<Amount>,
    capacity: Amount,
    window: usize,
    tracer: T,
}

#[cfg(test)]
impl IndexedCapacityStore<NoTrace> {
    pub fn new(values: Vec<Amount>, capacity: Amount) -> Result<Self, StoreError> {
        IndexedCapacityStore::with_tracer(values, capacity, NoTrace)
    }
}

impl<T: Tracer> IndexedCapacityStore<T> {
    /// Builds the store in O(N), reporting each step to `tracer`.
    ///
    /// Every initial value must lie in `0..=capacity`, and `capacity * N`
    /// must fit in an `Amount` so that no sum can overflow.
    pub fn with_tracer(
        values: Vec<Amount>,
        capacity: Amount,
        tracer: T,
    ) -> Result<Self, StoreError> {
        if capacity < 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }
        if capacity.checked_mul(values.len() as Amount).is_none() {
            return Err(StoreError::CapacityOverflow {
                capacity,
                len: values.len(),
            });
        }

        if let Some((i, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &value)| value < 0 || value > capacity)
        {
            return Err(StoreError::SlotOverCapacity {
                index: i + 1,
                value,
                capacity,
            });
        }

        let n = values.len();
        let mut tree = vec![0; n];
        for i in 1..=n {
            tree[i - 1] += values[i - 1];
            tracer.event(&TraceEvent::Build {
                index: i,
                cell: tree[i - 1],
            });

            let parent = ascend(i);
            if parent <= n {
                tree[parent - 1] += tree[i - 1];
                tracer.event(&TraceEvent::Propagate {
                    from: i,
                    to: parent,
                    cell: tree[parent - 1],
                });
            }
        }

        Ok(IndexedCapacityStore {
            values,
            tree,
            capacity,
            window: DEFAULT_WINDOW,
            tracer,
        })
    }

    /// Replaces the number of slots a single `store` may fill.
    pub fn with_window(mut self, window: usize) -> Result<Self, StoreError> {
        if window == 0 {
            return Err(StoreError::InvalidWindow);
        }
        self.window = window;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> Amount {
        self.capacity
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn values(&self) -> &[Amount] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<Amount> {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .cloned()
    }

    /// Sum of all slots.
    pub fn total(&self) -> Amount {
        self.prefix(self.len())
    }

    /// Adds `delta` to slot `index` and to every tree cell above it.
    ///
    /// Does nothing when `index` is not a slot.
    pub fn update(&mut self, index: usize, delta: Amount) {
        if index < 1 || index > self.len() {
            return;
        }

        self.tracer.event(&TraceEvent::Update { index, delta });
        self.values[index - 1] += delta;

        let mut j = index;
        while j <= self.len() {
            self.tree[j - 1] += delta;
            self.tracer.event(&TraceEvent::Ascend {
                index: j,
                cell: self.tree[j - 1],
            });
            j = ascend(j);
        }
    }

    /// Sum of slots `1..=index`. `prefix_sum(0)` is 0.
    pub fn prefix_sum(&self, index: usize) -> Result<Amount, StoreError> {
        if index > self.len() {
            return Err(StoreError::OutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(self.prefix(index))
    }

    fn prefix(&self, index: usize) -> Amount {
        let mut sum = 0;
        let mut j = index;
        while j > 0 {
            sum += self.tree[j - 1];
            j = descend(j);
        }
        sum
    }

    /// Sum of slots `left..=right`. An empty range (`left > right`) sums to 0.
    pub fn range_sum(&self, left: usize, right: usize) -> Result<Amount, StoreError> {
        if left == 0 {
            return Err(StoreError::InvalidRange);
        }
        if right > self.len() {
            return Err(StoreError::OutOfBounds {
                index: right,
                len: self.len(),
            });
        }
        if left > right {
            return Ok(0);
        }

        match RangeStrategy::pick(left, right) {
            RangeStrategy::Direct => Ok(self.range_sum_direct(left, right)),
            RangeStrategy::Prefix => self.range_sum_by_prefix(left, right),
        }
    }

    pub(crate) fn range_sum_direct(&self, left: usize, right: usize) -> Amount {
        self.values[left - 1..right].iter().sum()
    }

    pub(crate) fn range_sum_by_prefix(
        &self,
        left: usize,
        right: usize,
    ) -> Result<Amount, StoreError> {
        Ok(self.prefix_sum(right)? - self.prefix_sum(left - 1)?)
    }

    /// Fills slots from `start` on, at most `window()` of them, each up to capacity.
    ///
    /// Whatever does not fit in the window is not stored anywhere; it is
    /// returned as `discarded`.
    pub fn store(&mut self, size: Amount, start: usize) -> StoreOutcome {
        let size = cmp::max(size, 0);
        let mut remaining = size;

        if start >= 1 {
            let end = cmp::min(start.saturating_add(self.window), self.len() + 1);
            for i in start..end {
                if remaining <= 0 {
                    break;
                }
                let free = self.capacity - self.values[i - 1];
                if remaining > free {
                    self.update(i, free);
                    remaining -= free;
                } else {
                    self.update(i, remaining);
                    remaining = 0;
                }
            }
        }

        StoreOutcome {
            stored: size - remaining,
            discarded: remaining,
        }
    }

    /// Minimal slot index whose prefix sum reaches `threshold`, or `len() + 1`
    /// when no prefix does.
    pub fn find_slot(&self, threshold: Amount) -> usize {
        let n = self.len();

        // sum_before is always the sum of slots 1..idx.
        let mut idx = 1;
        let mut sum_before = 0;
        let mut mask = highest_power_of_two_le(n);
        while mask > 0 {
            let i = mask + idx - 1;
            // Cells past the end count as unbounded.
            if i <= n {
                let sum_at = self.tree[i - 1] + sum_before;
                if sum_at < threshold {
                    idx = i + 1;
                    sum_before = sum_at;
                }
            }
            mask >>= 1;
        }
        idx
    }

    /// Deletes up to `size` from the single slot located by `find_slot(threshold)`.
    pub fn delete_amount(
        &mut self,
        size: Amount,
        threshold: Amount,
    ) -> Result<DeleteOutcome, StoreError> {
        let index = self.find_slot(threshold);
        if index > self.len() {
            return Err(StoreError::ThresholdUnreachable {
                threshold,
                total: self.total(),
            });
        }

        let deleted = cmp::min(self.values[index - 1], cmp::max(size, 0));
        self.update(index, -deleted);
        Ok(DeleteOutcome { index, deleted })
    }
}

impl<T> fmt::Display for IndexedCapacityStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, cell) in self.tree.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", i + 1, cell)?;
        }
        Ok(())
    }
}
