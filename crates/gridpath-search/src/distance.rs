use gridpath_core::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible and consistent for a 4-connected grid with unit step cost.
/// Saturates at `u32::MAX` for points further apart than that.
#[inline]
pub fn manhattan(a: Point, b: Point) -> u32 {
    a.row.abs_diff(b.row).saturating_add(a.col.abs_diff(b.col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(0, 0);
        let b = Point::new(4, -3);
        assert_eq!(manhattan(a, b), 7);
        assert_eq!(manhattan(b, a), 7);
        assert_eq!(manhattan(a, a), 0);
    }

    #[test]
    fn manhattan_saturates_at_extremes() {
        let a = Point::new(i32::MIN, i32::MIN);
        let b = Point::new(i32::MAX, i32::MAX);
        assert_eq!(manhattan(a, b), u32::MAX);
        assert_eq!(manhattan(a, Point::new(i32::MAX, i32::MIN)), u32::MAX);
    }
}
