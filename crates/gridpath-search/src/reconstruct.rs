use std::collections::{HashMap, HashSet};

use gridpath_core::{CellState, Grid, Point};

use crate::engine::SearchError;

/// For each reached cell, the cell it was reached from on the best known
/// path. The start has no entry.
#[derive(Clone, Debug, Default)]
pub struct Predecessors {
    map: HashMap<Point, Point>,
}

impl Predecessors {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, p: Point) -> Option<Point> {
        self.map.get(&p).copied()
    }

    #[inline]
    pub fn set(&mut self, p: Point, from: Point) {
        self.map.insert(p, from);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Walk the predecessor chain back from `end` to `start` and return the path
/// in start-to-end order, both endpoints included.
///
/// Fails with [`SearchError::BrokenChain`] when the chain loops or stops at a
/// cell other than `start`.
pub fn reconstruct(
    preds: &Predecessors,
    start: Point,
    end: Point,
) -> Result<Vec<Point>, SearchError> {
    let mut path = vec![end];
    let mut seen = HashSet::from([end]);
    let mut cur = end;
    while cur != start {
        let Some(prev) = preds.get(cur) else {
            return Err(SearchError::BrokenChain { at: cur });
        };
        if !seen.insert(prev) {
            return Err(SearchError::BrokenChain { at: prev });
        }
        path.push(prev);
        cur = prev;
    }
    path.reverse();
    Ok(path)
}

/// Mark the interior of `path` as `OnPath`. The first and last cells keep
/// their endpoint states.
pub fn mark_path(grid: &mut Grid, path: &[Point]) {
    if path.len() < 3 {
        return;
    }
    for &p in &path[1..path.len() - 1] {
        if let Ok(cell) = grid.lookup_mut(p) {
            cell.set_state(CellState::OnPath);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(links: &[((i32, i32), (i32, i32))]) -> Predecessors {
        let mut preds = Predecessors::new();
        for &((r, c), (fr, fc)) in links {
            preds.set(Point::new(r, c), Point::new(fr, fc));
        }
        preds
    }

    #[test]
    fn walks_back_and_reverses() {
        let preds = chain(&[((0, 1), (0, 0)), ((0, 2), (0, 1)), ((1, 2), (0, 2))]);
        let path = reconstruct(&preds, Point::new(0, 0), Point::new(1, 2)).unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
            ]
        );
    }

    #[test]
    fn missing_link_is_broken() {
        let preds = chain(&[((0, 2), (0, 1))]);
        let err = reconstruct(&preds, Point::new(0, 0), Point::new(0, 2)).unwrap_err();
        assert_eq!(err, SearchError::BrokenChain { at: Point::new(0, 1) });
    }

    #[test]
    fn cycle_is_broken() {
        let preds = chain(&[((0, 2), (0, 1)), ((0, 1), (0, 2))]);
        let err = reconstruct(&preds, Point::new(0, 0), Point::new(0, 2)).unwrap_err();
        assert_eq!(err, SearchError::BrokenChain { at: Point::new(0, 2) });
    }

    #[test]
    fn mark_path_spares_endpoints() {
        let mut g = Grid::build(1, 4);
        g.set_state(Point::new(0, 0), CellState::Start).unwrap();
        g.set_state(Point::new(0, 3), CellState::End).unwrap();
        let path: Vec<Point> = (0..4).map(|c| Point::new(0, c)).collect();
        mark_path(&mut g, &path);
        assert_eq!(g.to_string(), "S**E");
    }
}
