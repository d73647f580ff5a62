use std::collections::hash_map::Entry as MapEntry;
use std::collections::{BinaryHeap, HashMap, HashSet};

use gridpath_core::Point;

use crate::cost::Cost;

/// A queued frontier entry, ordered by `(f, order)` for use in `BinaryHeap`.
///
/// `order` is the discovery sequence number of `pos`. Positions never take
/// part in the ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrontierEntry {
    pub f: Cost,
    pub order: u64,
    pub pos: Point,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and the
        // earliest discovery among equal f.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Discovered but not yet expanded cells.
///
/// Improving a queued cell pushes a second entry instead of re-prioritising
/// the first, so the heap may hold stale duplicates. Membership is tracked
/// separately and counts each cell once.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    members: HashSet<Point>,
    discovered: HashMap<Point, u64>,
    next_order: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `pos` with priority `f`.
    ///
    /// A cell seen for the first time gets the next discovery number; a cell
    /// pushed again keeps its original one. Returns `true` if `pos` was not a
    /// member before the call.
    pub fn push(&mut self, pos: Point, f: Cost) -> bool {
        let order = match self.discovered.entry(pos) {
            MapEntry::Occupied(e) => *e.get(),
            MapEntry::Vacant(e) => {
                let order = self.next_order;
                self.next_order += 1;
                *e.insert(order)
            }
        };
        self.heap.push(FrontierEntry { f, order, pos });
        self.members.insert(pos)
    }

    /// Remove and return the entry with the smallest `(f, order)`.
    ///
    /// The entry may be stale: its cell can already have been popped through
    /// a fresher entry. Callers decide what to do with those.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.heap.pop()?;
        self.members.remove(&entry.pos);
        Some(entry)
    }

    /// Whether `pos` is logically in the frontier, whatever its priority.
    #[inline]
    pub fn contains(&self, pos: Point) -> bool {
        self.members.contains(&pos)
    }

    /// Discovery number assigned to `pos`, if it was ever pushed.
    #[inline]
    pub fn discovery_order(&self, pos: Point) -> Option<u64> {
        self.discovered.get(&pos).copied()
    }

    /// Number of distinct member cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Number of queued heap entries, stale duplicates included.
    #[inline]
    pub fn queued(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entries remain, stale or not.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all entries and restart discovery numbering at 0.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.members.clear();
        self.discovered.clear();
        self.next_order = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_lowest_f_first() {
        let mut fr = Frontier::new();
        fr.push(Point::new(0, 0), 9);
        fr.push(Point::new(0, 1), 3);
        fr.push(Point::new(0, 2), 5);
        let fs: Vec<Cost> = std::iter::from_fn(|| fr.pop()).map(|e| e.f).collect();
        assert_eq!(fs, vec![3, 5, 9]);
    }

    #[test]
    fn ties_break_by_discovery_order() {
        let mut fr = Frontier::new();
        // Positions deliberately in "reverse" order: they must not matter.
        fr.push(Point::new(9, 9), 4);
        fr.push(Point::new(0, 0), 4);
        fr.push(Point::new(5, 5), 4);
        let order: Vec<Point> = std::iter::from_fn(|| fr.pop()).map(|e| e.pos).collect();
        assert_eq!(
            order,
            vec![Point::new(9, 9), Point::new(0, 0), Point::new(5, 5)]
        );
    }

    #[test]
    fn repush_keeps_membership_single() {
        let mut fr = Frontier::new();
        let p = Point::new(1, 1);
        assert!(fr.push(Point::new(0, 0), 6));
        assert!(fr.push(p, 8));
        assert!(!fr.push(p, 6));
        assert_eq!(fr.len(), 2);
        assert_eq!(fr.queued(), 3);
        assert_eq!(fr.discovery_order(p), Some(1));

        // The improved entry (f = 6, order 1) comes after (6, 0) and before
        // the stale (8, 1).
        assert_eq!(fr.pop().unwrap().pos, Point::new(0, 0));
        let e = fr.pop().unwrap();
        assert_eq!((e.pos, e.f, e.order), (p, 6, 1));
        assert!(!fr.contains(p));
        let stale = fr.pop().unwrap();
        assert_eq!((stale.pos, stale.f), (p, 8));
        assert!(fr.is_empty());
        assert_eq!(fr.len(), 0);
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut fr = Frontier::new();
        fr.push(Point::new(0, 0), 1);
        fr.push(Point::new(0, 1), 1);
        fr.clear();
        assert!(fr.is_empty());
        assert_eq!(fr.discovery_order(Point::new(0, 1)), None);
        fr.push(Point::new(3, 3), 1);
        assert_eq!(fr.discovery_order(Point::new(3, 3)), Some(0));
    }
}
