//! Greedy rectangle merging of platform cells.
//!
//! The physics layer wants a handful of large static colliders rather than
//! one per tile. [`compute_hitboxes`] scans the grid row-major and, at each
//! uncovered designator cell, grows a rectangle first to the right and then
//! downward. The cover is exact and disjoint but not guaranteed minimal:
//! staggered shapes can split into more rectangles than strictly needed.

use std::collections::BTreeSet;

use crate::grid::{Grid, GridError};
use crate::rect::Rect;

/// Per-call record of which cells an emitted rectangle already covers.
struct VisitedMask {
    width: u32,
    covered: Vec<bool>,
}

impl VisitedMask {
    fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            covered: vec![false; grid.width() as usize * grid.height() as usize],
        }
    }

    fn is_covered(&self, x: u32, y: u32) -> bool {
        self.covered[y as usize * self.width as usize + x as usize]
    }

    fn cover(&mut self, rect: &Rect) {
        for (x, y) in rect.cells() {
            self.covered[y as usize * self.width as usize + x as usize] = true;
        }
    }
}

/// Cover every `designator` cell of `grid` with disjoint rectangles.
///
/// Rectangles come back in row-major order of their top-left corner. A
/// designator absent from the grid yields an empty list.
pub fn compute_hitboxes(grid: &Grid, designator: char) -> Vec<Rect> {
    let mut visited = VisitedMask::new(grid);
    let mut hitboxes = Vec::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if visited.is_covered(x, y) || !grid.is(x, y, designator) {
                continue;
            }
            let rect = expand_rect(grid, &visited, designator, x, y);
            visited.cover(&rect);
            hitboxes.push(rect);
        }
    }

    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        %designator,
        hitboxes = hitboxes.len(),
        "merged platform hitboxes"
    );
    hitboxes
}

/// Validate raw rows and merge them in one step.
pub fn compute_hitboxes_from_rows<S: AsRef<str>>(
    rows: &[S],
    designator: char,
) -> Result<Vec<Rect>, GridError> {
    let grid = Grid::from_rows(rows)?;
    Ok(compute_hitboxes(&grid, designator))
}

fn expand_rect(
    grid: &Grid,
    visited: &VisitedMask,
    designator: char,
    start_x: u32,
    start_y: u32,
) -> Rect {
    let open = |x: u32, y: u32| grid.is(x, y, designator) && !visited.is_covered(x, y);

    // First row fixes the width.
    let mut width = 0;
    while start_x + width < grid.width() && open(start_x + width, start_y) {
        width += 1;
    }

    // Lower rows must match across the whole span or growth stops.
    let mut height = 1;
    while start_y + height < grid.height()
        && (start_x..start_x + width).all(|x| open(x, start_y + height))
    {
        height += 1;
    }

    Rect::new(start_x, start_y, width, height)
}

/// Union of all cells covered by `rects`.
pub fn covered_cells(rects: &[Rect]) -> BTreeSet<(u32, u32)> {
    rects.iter().flat_map(Rect::cells).collect()
}

/// First pair of indices whose rectangles share a cell, if any.
pub fn overlapping_pair(rects: &[Rect]) -> Option<(usize, usize)> {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects(&rects[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Paint `rects` onto a fresh `width` x `height` grid of `blank` cells.
///
/// Cells outside the grid are clipped.
pub fn rasterize(
    rects: &[Rect],
    width: u32,
    height: u32,
    designator: char,
    blank: char,
) -> Result<Grid, GridError> {
    let mut rows = vec![vec![blank; width as usize]; height as usize];
    for r in rects {
        for y in r.y.min(height)..r.bottom().min(height) {
            for x in r.x.min(width)..r.right().min(width) {
                rows[y as usize][x as usize] = designator;
            }
        }
    }
    Grid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BLANK, PLATFORM};
    use crate::test_helpers::{assert_exact_cover, grid};

    #[test]
    fn full_block_is_one_rect() {
        let hitboxes = compute_hitboxes(&grid(&["==", "=="]), PLATFORM);
        assert_eq!(hitboxes, vec![Rect::new(0, 0, 2, 2)]);
    }

    #[test]
    fn single_row_run() {
        let hitboxes = compute_hitboxes(&grid(&["===", "   "]), PLATFORM);
        assert_eq!(hitboxes, vec![Rect::new(0, 0, 3, 1)]);
    }

    #[test]
    fn diagonal_cells_stay_separate() {
        let hitboxes = compute_hitboxes(&grid(&["= ", " ="]), PLATFORM);
        assert_eq!(hitboxes, vec![Rect::new(0, 0, 1, 1), Rect::new(1, 1, 1, 1)]);
    }

    #[test]
    fn narrower_row_caps_height() {
        let hitboxes = compute_hitboxes(&grid(&["===", "=  ", "=  "]), PLATFORM);
        assert_eq!(hitboxes, vec![Rect::new(0, 0, 3, 1), Rect::new(0, 1, 1, 2)]);
    }

    #[test]
    fn isolated_cell_is_unit_rect() {
        let hitboxes = compute_hitboxes(&grid(&["   ", " = ", "   "]), PLATFORM);
        assert_eq!(hitboxes, vec![Rect::new(1, 1, 1, 1)]);
    }

    #[test]
    fn absent_designator_yields_nothing() {
        let g = grid(&["$$^", "  @"]);
        assert!(compute_hitboxes(&g, PLATFORM).is_empty());
    }

    #[test]
    fn wider_row_below_is_not_minimal() {
        // Two rects would do (the top run, then the full bottom row), but
        // height growth claims the middle of row 1 first and splits the rest.
        let g = grid(&[" == ", "===="]);
        let hitboxes = compute_hitboxes(&g, PLATFORM);
        assert_eq!(
            hitboxes,
            vec![
                Rect::new(1, 0, 2, 2),
                Rect::new(0, 1, 1, 1),
                Rect::new(3, 1, 1, 1),
            ]
        );
        assert_exact_cover(&g, PLATFORM, &hitboxes);
    }

    #[test]
    fn staircase_splits_into_columns() {
        let g = grid(&["=  ", "== ", "==="]);
        let hitboxes = compute_hitboxes(&g, PLATFORM);
        assert_eq!(
            hitboxes,
            vec![
                Rect::new(0, 0, 1, 3),
                Rect::new(1, 1, 1, 2),
                Rect::new(2, 2, 1, 1),
            ]
        );
        assert_exact_cover(&g, PLATFORM, &hitboxes);
    }

    #[test]
    fn other_designators_merge_too() {
        let g = grid(&["^^ ^", "^^ ^"]);
        let hitboxes = compute_hitboxes(&g, '^');
        assert_eq!(hitboxes, vec![Rect::new(0, 0, 2, 2), Rect::new(3, 0, 1, 2)]);
    }

    #[test]
    fn grid_is_left_untouched() {
        let g = grid(&["==", " ="]);
        let before = g.clone();
        let _ = compute_hitboxes(&g, PLATFORM);
        assert_eq!(g, before);
    }

    #[test]
    fn repeated_calls_match() {
        let g = grid(&["= ==", "====", " = ="]);
        assert_eq!(compute_hitboxes(&g, PLATFORM), compute_hitboxes(&g, PLATFORM));
    }

    #[test]
    fn from_rows_reports_bad_input() {
        let err = compute_hitboxes_from_rows(&["==", "="], PLATFORM).unwrap_err();
        assert!(matches!(err, GridError::Ragged { row: 1, .. }));

        let rows: [&str; 0] = [];
        assert_eq!(
            compute_hitboxes_from_rows(&rows, PLATFORM),
            Err(GridError::Empty)
        );
    }

    #[test]
    fn overlapping_pair_finds_shared_cell() {
        let rects = [
            Rect::new(0, 0, 2, 1),
            Rect::new(3, 0, 1, 1),
            Rect::new(1, 0, 1, 2),
        ];
        assert_eq!(overlapping_pair(&rects), Some((0, 2)));
        assert_eq!(overlapping_pair(&rects[..2]), None);
    }

    #[test]
    fn rasterize_ignores_rects_past_the_edge() {
        let rects = [Rect::new(u32::MAX, 0, 2, 1), Rect::new(0, u32::MAX - 1, 1, 9)];
        let g = rasterize(&rects, 2, 1, PLATFORM, BLANK).unwrap();
        assert_eq!(g.count(PLATFORM), 0);
    }

    #[test]
    fn rasterize_clips_to_bounds() {
        let g = rasterize(&[Rect::new(1, 0, 5, 1)], 3, 2, PLATFORM, BLANK).unwrap();
        let rows: Vec<String> = g.rows().collect();
        assert_eq!(rows, vec![" ==", "   "]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn grid_strategy() -> impl Strategy<Value = Grid> {
            (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
                proptest::collection::vec(
                    proptest::collection::vec(prop_oneof![Just('='), Just(' '), Just('$')], w),
                    h,
                )
                .prop_map(|rows| Grid::new(rows).unwrap())
            })
        }

        proptest! {
            #[test]
            fn cover_is_exact_and_disjoint(g in grid_strategy()) {
                let hitboxes = compute_hitboxes(&g, PLATFORM);
                let expected: BTreeSet<_> = g.positions(PLATFORM).collect();
                prop_assert_eq!(covered_cells(&hitboxes), expected);
                prop_assert_eq!(overlapping_pair(&hitboxes), None);

                let area: u32 = hitboxes.iter().map(Rect::area).sum();
                prop_assert_eq!(area as usize, g.count(PLATFORM));
            }

            #[test]
            fn rects_start_in_scan_order(g in grid_strategy()) {
                let hitboxes = compute_hitboxes(&g, PLATFORM);
                for pair in hitboxes.windows(2) {
                    prop_assert!((pair[0].y, pair[0].x) < (pair[1].y, pair[1].x));
                }
            }

            #[test]
            fn rescan_covers_same_cells(g in grid_strategy()) {
                let hitboxes = compute_hitboxes(&g, PLATFORM);
                let synthetic = rasterize(&hitboxes, g.width(), g.height(), PLATFORM, BLANK)
                    .unwrap();
                let again = compute_hitboxes(&synthetic, PLATFORM);
                prop_assert_eq!(covered_cells(&again), covered_cells(&hitboxes));
            }

            #[test]
            fn every_rect_is_nonempty(g in grid_strategy()) {
                for r in compute_hitboxes(&g, PLATFORM) {
                    prop_assert!(r.width >= 1 && r.height >= 1);
                    prop_assert!(r.right() <= g.width() && r.bottom() <= g.height());
                }
            }
        }
    }
}
