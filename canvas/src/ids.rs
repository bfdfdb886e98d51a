//! Injected sources of identifiers and random choices.
//!
//! The engine never calls a global RNG directly. Hosts hand it an `IdSource`
//! and a `Picker`; tests use the sequential and cycling variants so that ids
//! and colors are predictable.

#[cfg(test)]
#[path = "ids_test.rs"]
mod ids_test;

use uuid::Uuid;

use crate::doc::TileId;

/// Produces identifiers for new tiles.
pub trait IdSource: Send {
    fn next_id(&mut self) -> TileId;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> TileId {
        Uuid::new_v4()
    }
}

/// Monotonic counter rendered as UUIDs (`00000000-...-000000000001`, ...).
/// Wraps to the nil UUID after `u128::MAX`.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Continue after `last`: the first id handed out is `last + 1`.
    #[must_use]
    pub fn after(last: u128) -> Self {
        Self { next: last }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> TileId {
        self.next = self.next.wrapping_add(1);
        Uuid::from_u128(self.next)
    }
}

/// Chooses an index in `0..len`. Callers never pass `len == 0`.
pub trait Picker: Send {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform choice from the thread-local RNG.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPicker;

#[cfg(not(target_arch = "wasm32"))]
impl Picker for ThreadPicker {
    fn pick(&mut self, len: usize) -> usize {
        use rand::Rng;
        rand::rng().random_range(0..len.max(1))
    }
}

/// Walks `0, 1, 2, ...` modulo `len`.
#[derive(Debug, Clone, Default)]
pub struct CyclePicker {
    calls: usize,
}

impl Picker for CyclePicker {
    fn pick(&mut self, len: usize) -> usize {
        let index = self.calls % len.max(1);
        self.calls += 1;
        index
    }
}

/// Always returns the same index, clamped into range.
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl Picker for FixedPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.0.min(len.saturating_sub(1))
    }
}
