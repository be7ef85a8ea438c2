//! Sweep order: descending height, then ascending `x`, then ascending `y`.
//!
//! The order is total over distinct positions, so it serves both as the time
//! axis of the sweep and as the rule for deciding which of two equally tall
//! peaks is "higher".
use std::cmp::Ordering;

use tracing::debug;

use crate::heightmap::{Cell, HeightSource};
use crate::params::OrderingStrategy;

/// Number of distinct 16-bit heights.
const HEIGHT_DOMAIN: usize = u16::MAX as usize + 1;

/// Compare two `(height, x, y)` keys in sweep order. `Less` means "visited first".
#[inline]
pub fn sweep_cmp(a: (u16, usize, usize), b: (u16, usize, usize)) -> Ordering {
    b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2))
}

#[inline]
fn cell_cmp(a: &Cell, b: &Cell) -> Ordering {
    sweep_cmp((a.height, a.x, a.y), (b.height, b.x, b.y))
}

/// Every cell of `source` exactly once, in sweep order.
pub fn order_cells<S: HeightSource>(source: &S, strategy: OrderingStrategy) -> Vec<Cell> {
    debug!(cells = source.len(), %strategy, "ordering cells");
    match strategy {
        OrderingStrategy::Counting => counting_order(source),
        OrderingStrategy::Comparison => comparison_order(source),
    }
}

/// Counting sort keyed on height.
///
/// Cells are scattered column-major (`x` outer, `y` inner), so each bucket is
/// filled in tie-break order and no per-bucket sort is needed.
fn counting_order<S: HeightSource>(source: &S) -> Vec<Cell> {
    let (width, height) = (source.width(), source.height());
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut counts = vec![0usize; HEIGHT_DOMAIN];
    for x in 0..width {
        for y in 0..height {
            counts[source.sample(x, y) as usize] += 1;
        }
    }

    // Bucket start offsets, tallest bucket first.
    let mut offsets = vec![0usize; HEIGHT_DOMAIN];
    let mut running = 0usize;
    for h in (0..HEIGHT_DOMAIN).rev() {
        offsets[h] = running;
        running += counts[h];
    }

    let filler = Cell { x: 0, y: 0, height: 0 };
    let mut ordered = vec![filler; running];
    for x in 0..width {
        for y in 0..height {
            let h = source.sample(x, y);
            let slot = &mut offsets[h as usize];
            ordered[*slot] = Cell { x, y, height: h };
            *slot += 1;
        }
    }
    ordered
}

fn comparison_order<S: HeightSource>(source: &S) -> Vec<Cell> {
    let mut cells: Vec<Cell> = source.cells().collect();
    sort_cells(&mut cells);
    cells
}

/// Sort an arbitrary cell list into sweep order.
pub fn sort_cells(cells: &mut [Cell]) {
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        cells.par_sort_unstable_by(cell_cmp);
    }
    #[cfg(not(feature = "threading"))]
    cells.sort_unstable_by(cell_cmp);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heightmap::HeightMap;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn cell(x: usize, y: usize, height: u16) -> Cell {
        Cell { x, y, height }
    }

    #[test]
    fn sorts_descending_with_position_tie_break() {
        let mut cells = vec![
            cell(0, 1, 1),
            cell(0, 0, 0),
            cell(0, 10, 0),
            cell(0, 1, 2),
            cell(1, 3, 6),
        ];
        sort_cells(&mut cells);
        assert_eq!(
            cells,
            vec![cell(1, 3, 6), cell(0, 1, 2), cell(0, 1, 1), cell(0, 0, 0), cell(0, 10, 0)]
        );
    }

    #[test]
    fn x_breaks_ties_before_y() {
        let mut cells = vec![cell(1, 0, 5), cell(0, 9, 5), cell(0, 2, 5)];
        sort_cells(&mut cells);
        assert_eq!(cells, vec![cell(0, 2, 5), cell(0, 9, 5), cell(1, 0, 5)]);
    }

    #[test]
    fn strategies_agree_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(0xC0FF_EE00);
        for &(w, h, max) in &[(1, 1, 3u16), (7, 3, 4), (16, 16, 1000), (33, 9, u16::MAX)] {
            let data: Vec<u16> = (0..w * h).map(|_| rng.gen_range(0..=max)).collect();
            let hm = HeightMap::from_samples(w, h, data).unwrap();
            let counting = order_cells(&hm, OrderingStrategy::Counting);
            let comparison = order_cells(&hm, OrderingStrategy::Comparison);
            assert_eq!(counting, comparison, "strategies disagree on {w}x{h} grid");
            assert_eq!(counting.len(), w * h);
            assert!(
                counting.windows(2).all(|p| cell_cmp(&p[0], &p[1]) == Ordering::Less),
                "ordering is not strictly increasing in sweep order"
            );
        }
    }

    #[test]
    fn empty_grid_orders_to_nothing() {
        let hm = HeightMap::new(0, 0, 0);
        assert!(order_cells(&hm, OrderingStrategy::Counting).is_empty());
        assert!(order_cells(&hm, OrderingStrategy::Comparison).is_empty());
    }
}
