//! Union-find over islands: connected components of already swept cells.
//!
//! Nodes live in an arena and refer to each other and to their peak by index.
//! Only roots carry a meaningful `highest_peak`. Unions are "highest-wins":
//! the root with the shorter peak is always re-pointed at the root with the
//! taller one, so the survivor's peak needs no update. There is no rank or
//! size balancing; path compression alone keeps the trees shallow in practice.
use super::feature::Feature;

/// Handle to a node in an [`IslandForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IslandId(u32);

/// Index of a feature in the sweep's append-only feature list.
pub type FeatureId = usize;

#[derive(Debug, Clone, Copy)]
struct Island {
    parent: IslandId,
    highest_peak: FeatureId,
}

#[derive(Debug, Default)]
pub struct IslandForest {
    nodes: Vec<Island>,
}

impl IslandForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of islands ever created, merged ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a singleton island whose highest peak is `peak`.
    pub fn new_island(&mut self, peak: FeatureId) -> IslandId {
        let id = IslandId(self.nodes.len() as u32);
        self.nodes.push(Island { parent: id, highest_peak: peak });
        id
    }

    /// Root of `island`'s tree. Every node on the path is re-pointed at the root.
    pub fn find(&mut self, island: IslandId) -> IslandId {
        let mut root = island;
        while self.node(root).parent != root {
            root = self.node(root).parent;
        }

        let mut cur = island;
        while cur != root {
            let next = self.node(cur).parent;
            self.node_mut(cur).parent = root;
            cur = next;
        }
        root
    }

    /// Highest unfinalized peak of the component containing `island`.
    pub fn highest_peak(&mut self, island: IslandId) -> FeatureId {
        let root = self.find(island);
        self.node(root).highest_peak
    }

    /// Merge the components of `a` and `b`; returns the surviving root.
    ///
    /// The survivor is the root whose peak outranks the other's in sweep order.
    pub fn union(&mut self, a: IslandId, b: IslandId, features: &[Feature]) -> IslandId {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return ra;
        }
        let peak_a = &features[self.node(ra).highest_peak];
        let peak_b = &features[self.node(rb).highest_peak];
        let (winner, loser) = if peak_a.outranks(peak_b) { (ra, rb) } else { (rb, ra) };
        self.node_mut(loser).parent = winner;
        winner
    }

    #[inline]
    fn node(&self, id: IslandId) -> &Island {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    fn node_mut(&mut self, id: IslandId) -> &mut Island {
        &mut self.nodes[id.0 as usize]
    }
}
