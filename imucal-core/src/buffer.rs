//! Fixed-Capacity Ring Buffer for the Noise Window
//!
//! ## Overview
//!
//! The windowed noise estimator needs the most recent `window_size` triads so it
//! can remove the oldest one from its running statistics when a new one
//! arrives. This module provides that storage as a ring buffer whose capacity
//! is chosen at runtime (the window size is a configuration value) but never
//! changes while samples flow.
//!
//! ## Design Rationale
//!
//! ### Why a Ring Buffer?
//!
//! - O(1) insertion; when full the oldest triad is overwritten and handed
//!   back to the caller
//! - O(n) chronological iteration
//! - A single allocation, made when the capacity is set
//!
//! ### Why Not `heapless::Deque` or `VecDeque`?
//!
//! The capacity is a runtime value, which rules out const-generic storage, and
//! the estimator needs the evicted element on every push. Returning it from
//! `push` keeps the estimator's update a single call.
//!
//! ### Memory Layout
//!
//! ```text
//! TriadWindow with capacity 5, after 7 pushes (A..G):
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  F  │  G  │  C  │  D  │  E  │  ← storage
//! └─────┴─────┴─────┴─────┴─────┘
//!                ↑
//!                └── write_pos = 2 (oldest element, overwritten next)
//!
//! Each slot: Triad = 24 bytes
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use imucal_core::buffer::TriadWindow;
//! use imucal_core::Triad;
//!
//! let mut window = TriadWindow::with_capacity(3);
//!
//! assert_eq!(window.push(Triad::new(1.0, 0.0, 0.0)), None);
//! window.push(Triad::new(2.0, 0.0, 0.0));
//! window.push(Triad::new(3.0, 0.0, 0.0));
//!
//! // Full: the oldest triad is evicted and returned
//! let evicted = window.push(Triad::new(4.0, 0.0, 0.0));
//! assert_eq!(evicted, Some(Triad::new(1.0, 0.0, 0.0)));
//! ```

use alloc::vec::Vec;

use crate::triad::Triad;

/// FIFO window of the most recent triads
///
/// ## Internal Invariants
///
/// - `storage.len() <= capacity` (storage grows until full, then is reused)
/// - `write_pos < capacity` once the window is full
/// - Iteration yields triads from oldest to newest
///
/// ## Thread Safety
///
/// Not thread-safe; owned exclusively by its estimator.
#[derive(Debug, Clone)]
pub struct TriadWindow {
    /// Slot storage, filled in order until it reaches `capacity`
    storage: Vec<Triad>,

    /// Maximum number of triads held
    capacity: usize,

    /// Slot holding the oldest triad once the window is full
    write_pos: usize,
}

impl TriadWindow {
    /// Creates an empty window holding at most `capacity` triads
    ///
    /// A capacity of zero is raised to one; callers validate window sizes
    /// before they reach this point.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            storage: Vec::with_capacity(capacity),
            capacity,
            write_pos: 0,
        }
    }

    /// Adds a triad, returning the evicted one when the window was full
    pub fn push(&mut self, triad: Triad) -> Option<Triad> {
        if self.storage.len() < self.capacity {
            self.storage.push(triad);
            return None;
        }

        let evicted = core::mem::replace(&mut self.storage[self.write_pos], triad);
        self.write_pos = (self.write_pos + 1) % self.capacity;
        Some(evicted)
    }

    /// Number of triads currently held
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Check if window holds `capacity` triads
    pub fn is_full(&self) -> bool {
        self.storage.len() == self.capacity
    }

    /// Maximum number of triads held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed triad
    pub fn last(&self) -> Option<&Triad> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.is_full() {
            (self.write_pos + self.capacity - 1) % self.capacity
        } else {
            self.storage.len() - 1
        };

        self.storage.get(idx)
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Triad> + '_ {
        let (newer, older) = self.storage.split_at(self.write_pos);
        older.iter().chain(newer.iter())
    }

    /// Drop all triads, keeping the capacity
    pub fn clear(&mut self) {
        self.storage.clear();
        self.write_pos = 0;
    }

    /// Drop all triads and change the capacity
    pub fn reset_capacity(&mut self, capacity: usize) {
        *self = Self::with_capacity(capacity);
    }
}
