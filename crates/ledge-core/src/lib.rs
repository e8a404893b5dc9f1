pub mod body;
pub mod config;
pub mod grid;
pub mod level_gen;
pub mod levels;
pub mod merge;
pub mod rect;
pub mod tiles;

pub use grid::{Grid, GridError, PLATFORM};
pub use merge::{compute_hitboxes, compute_hitboxes_from_rows};
pub use rect::Rect;

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::collections::BTreeSet;

    use crate::grid::Grid;
    use crate::merge::{covered_cells, overlapping_pair};
    use crate::rect::Rect;

    /// Build a grid from literal rows, panicking on malformed input.
    pub fn grid<S: AsRef<str>>(rows: &[S]) -> Grid {
        Grid::from_rows(rows).expect("test grid must be rectangular and non-empty")
    }

    /// Assert `rects` cover exactly the `designator` cells of `grid`, with no overlap.
    pub fn assert_exact_cover(grid: &Grid, designator: char, rects: &[Rect]) {
        let expected: BTreeSet<_> = grid.positions(designator).collect();
        assert_eq!(
            covered_cells(rects),
            expected,
            "hitboxes must cover exactly the {designator:?} cells"
        );
        assert_eq!(
            overlapping_pair(rects),
            None,
            "hitboxes must not overlap"
        );
        for r in rects {
            assert!(
                r.cells().all(|(x, y)| grid.is(x, y, designator)),
                "hitbox {r:?} contains a non-{designator:?} cell"
            );
        }
    }
}
