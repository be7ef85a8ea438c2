//! The descending sweep.
//!
//! Each cell, in sweep order, looks at its already visited 4-neighbours and
//! either starts a new island (a peak), joins the single island it touches, or
//! joins several islands (a saddle). At a saddle every island except the one
//! with the highest peak is absorbed, and the absorbed peaks get their final
//! prominence: their height above the saddle.
use std::ops::ControlFlow;

use tracing::debug;

use super::feature::{Feature, FeatureKind, Prominence};
use super::islands::{FeatureId, IslandForest, IslandId};
use super::ordering::sweep_cmp;
use crate::error::{ProminenceError, Result};
use crate::heightmap::{Cell, Location};

pub struct ProminenceEngine {
    width: usize,
    height: usize,
    /// Owning island of every visited cell, row-major. `None` = not yet swept.
    owners: Vec<Option<IslandId>>,
    forest: IslandForest,
    features: Vec<Feature>,
    /// Distinct neighbour roots of the cell being visited.
    roots: Vec<IslandId>,
    last: Option<Cell>,
    processed: usize,
}

impl ProminenceEngine {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            owners: vec![None; width * height],
            forest: IslandForest::new(),
            features: Vec::new(),
            roots: Vec::with_capacity(4),
            last: None,
            processed: 0,
        }
    }

    /// Features found so far, in discovery order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Number of cells visited so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Number of islands created so far, merged ones included.
    pub fn islands(&self) -> usize {
        self.forest.len()
    }

    /// Advance the sweep by one cell.
    ///
    /// Cells must arrive in sweep order (see [`super::ordering`]); every cell
    /// must be inside the grid and visited at most once.
    pub fn visit(&mut self, cell: Cell) {
        self.visit_with(cell, |_| {});
    }

    /// [`Self::visit`], letting `reorder` permute the in-bounds neighbours
    /// before they are resolved to islands.
    fn visit_with(&mut self, cell: Cell, reorder: impl FnOnce(&mut [Location])) {
        debug_assert!(cell.x < self.width && cell.y < self.height, "cell {cell:?} outside grid");
        debug_assert!(
            self.last.map_or(true, |l| sweep_cmp((l.height, l.x, l.y), (cell.height, cell.x, cell.y)).is_lt()),
            "cell {cell:?} arrived out of sweep order"
        );

        let mut around = [cell.location(); 4];
        let mut count = 0;
        for n in cell.location().neighbors(self.width, self.height) {
            around[count] = n;
            count += 1;
        }
        reorder(&mut around[..count]);

        self.roots.clear();
        for n in &around[..count] {
            if let Some(island) = self.owners[n.y * self.width + n.x] {
                let root = self.forest.find(island);
                if !self.roots.contains(&root) {
                    self.roots.push(root);
                }
            }
        }

        let owner = match self.roots.len() {
            0 => {
                let peak = self.push(Feature::peak(cell.x, cell.y, cell.height));
                self.forest.new_island(peak)
            }
            1 => self.roots[0],
            _ => self.merge_at(cell),
        };

        self.owners[cell.y * self.width + cell.x] = Some(owner);
        self.last = Some(cell);
        self.processed += 1;
    }

    /// Sweep every cell of `cells` and return all features found.
    pub fn sweep(mut self, cells: &[Cell]) -> Vec<Feature> {
        for &cell in cells {
            self.visit(cell);
        }
        self.finish()
    }

    /// Like [`Self::sweep`], but consults `checkpoint` with the number of
    /// processed cells before each one. `Break` stops the sweep with
    /// [`ProminenceError::Cancelled`].
    pub fn sweep_until<F>(mut self, cells: &[Cell], mut checkpoint: F) -> Result<Vec<Feature>>
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        for &cell in cells {
            if checkpoint(self.processed).is_break() {
                return Err(ProminenceError::Cancelled { processed: self.processed, total: cells.len() });
            }
            self.visit(cell);
        }
        Ok(self.finish())
    }

    /// Consume the engine, returning all features found.
    pub fn finish(self) -> Vec<Feature> {
        let peaks = self.features.iter().filter(|f| f.kind == FeatureKind::Peak).count();
        debug!(
            cells = self.processed,
            islands = self.forest.len(),
            peaks,
            saddles = self.features.len() - peaks,
            "sweep finished"
        );
        self.features
    }

    fn push(&mut self, feature: Feature) -> FeatureId {
        self.features.push(feature);
        self.features.len() - 1
    }

    /// `cell` joins two or more distinct islands (in `self.roots`).
    fn merge_at(&mut self, cell: Cell) -> IslandId {
        let mut candidates: Vec<(IslandId, FeatureId)> = Vec::with_capacity(self.roots.len());
        for &root in &self.roots {
            candidates.push((root, self.forest.highest_peak(root)));
        }

        let mut winner = candidates[0];
        for &c in &candidates[1..] {
            if self.features[c.1].outranks(&self.features[winner.1]) {
                winner = c;
            }
        }

        // Tallest peak among all the other islands.
        let mut second: Option<FeatureId> = None;
        for &(_, peak) in candidates.iter().filter(|c| c.0 != winner.0) {
            if second.map_or(true, |s| self.features[peak].outranks(&self.features[s])) {
                second = Some(peak);
            }
        }
        let Some(second) = second else {
            // Only reached with two or more distinct roots.
            return winner.0;
        };

        let saddle_prominence = self.drop_to(second, cell.height);
        self.push(Feature::saddle(cell.x, cell.y, cell.height, saddle_prominence));

        let mut root = winner.0;
        for &(island, peak) in candidates.iter().filter(|c| c.0 != winner.0) {
            let prominence = self.drop_to(peak, cell.height);
            self.finalize(peak, prominence);
            root = self.forest.union(root, island, &self.features);
        }
        debug_assert_eq!(root, winner.0, "winning island lost its root");
        root
    }

    /// Height of `peak` above `level`.
    fn drop_to(&self, peak: FeatureId, level: u16) -> u16 {
        let height = self.features[peak].height;
        debug_assert!(height >= level, "peak at {height} below sweep level {level}");
        height - level
    }

    fn finalize(&mut self, peak: FeatureId, prominence: u16) {
        let feature = &mut self.features[peak];
        debug_assert!(
            feature.prominence.is_unbounded(),
            "peak at ({}, {}) finalized twice",
            feature.x,
            feature.y
        );
        feature.prominence = Prominence::Finite(prominence);
    }
}
