use std::cell::Cell;

use crate::coords::Vec2;

/// Single-slot mailbox for pointer positions.
///
/// Pushing overwrites whatever is waiting, so only the last position since
/// the previous frame survives. `Cell` keeps pushes O(1) and allocation-free
/// and makes the type `!Sync`, pinning it to the event-loop thread.
#[derive(Debug, Default)]
pub struct LatestPointer {
    slot: Cell<Option<Vec2>>,
}

impl LatestPointer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&self, pos: Vec2) {
        self.slot.set(Some(pos));
    }

    /// Empties the slot.
    #[inline]
    pub fn take(&self) -> Option<Vec2> {
        self.slot.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_push_wins() {
        let cell = LatestPointer::new();
        cell.push(Vec2::new(1.0, 2.0));
        cell.push(Vec2::new(3.0, 4.0));
        cell.push(Vec2::new(5.0, 6.0));
        assert_eq!(cell.take(), Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn take_drains() {
        let cell = LatestPointer::new();
        assert_eq!(cell.take(), None);
        cell.push(Vec2::zero());
        assert_eq!(cell.take(), Some(Vec2::zero()));
        assert_eq!(cell.take(), None);
    }
}
