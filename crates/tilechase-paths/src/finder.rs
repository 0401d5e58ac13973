use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tilechase_core::Point;

use crate::traits::WeightedPather;

// ---------------------------------------------------------------------------
// Search bookkeeping
// ---------------------------------------------------------------------------

/// Best known cost of a visited cell and where it was reached from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchNode {
    cost: i32,
    /// `None` only for the search source.
    parent: Option<Point>,
}

/// Frontier entry, ordered by `cost` for use in `BinaryHeap`.
///
/// Entries are never updated in place; a cell may be queued several times
/// and stale entries are skipped when popped.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    pos: Point,
    cost: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest cost first, then
        // the row-major smallest cell.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl std::fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.pos, self.cost)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// ShortestPathFinder
// ---------------------------------------------------------------------------

/// Single-source shortest-path search over a [`WeightedPather`].
///
/// The finder owns its distance map, frontier heap and neighbor buffer so
/// that repeated searches reuse their allocations. Every search resets them;
/// nothing carries over from one call to the next.
///
/// Cells are recorded lazily on first visit: a cell absent from the map has
/// infinite distance and no predecessor. Only cells the pather reports as
/// passable are ever recorded or queued.
#[derive(Debug, Default)]
pub struct ShortestPathFinder {
    nodes: FxHashMap<Point, SearchNode>,
    open: BinaryHeap<NodeRef>,
    nbuf: Vec<Point>,
}

impl ShortestPathFinder {
    /// Create a finder with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the shortest path from `from` to `to`.
    ///
    /// Returns the full path including both endpoints, or an empty vector if
    /// `to` cannot be reached (blocked, outside the grid, or disconnected).
    /// When `from == to` and the cell is passable the path is `[from]`.
    ///
    /// The search always runs to exhaustion, so after this call
    /// [`distance_at`](Self::distance_at) answers for every cell reachable
    /// from `from`.
    pub fn find_path<P: WeightedPather + ?Sized>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Vec<Point> {
        self.search(pather, from);
        let path = self.path_to(to);
        if path.is_empty() {
            log::trace!("no path from {from} to {to}");
        }
        path
    }

    /// Run a full single-source search from `from`.
    ///
    /// Returns the number of cells reached, including `from` itself. A
    /// source that is not passable reaches nothing.
    pub fn search<P: WeightedPather + ?Sized>(&mut self, pather: &P, from: Point) -> usize {
        self.nodes.clear();
        self.open.clear();

        if !pather.passable(from) {
            return 0;
        }

        self.nodes.insert(
            from,
            SearchNode {
                cost: 0,
                parent: None,
            },
        );
        self.open.push(NodeRef { pos: from, cost: 0 });

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = self.open.pop() {
            let cp = current.pos;
            let current_cost = match self.nodes.get(&cp) {
                Some(n) if n.cost == current.cost => n.cost,
                // Stale entry: a cheaper route was found after it was queued.
                _ => continue,
            };

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if !pather.passable(np) {
                    continue;
                }
                let alt = current_cost.saturating_add(pather.cost(cp, np));
                if let Some(n) = self.nodes.get(&np) {
                    if alt >= n.cost {
                        continue;
                    }
                }
                self.nodes.insert(
                    np,
                    SearchNode {
                        cost: alt,
                        parent: Some(cp),
                    },
                );
                self.open.push(NodeRef { pos: np, cost: alt });
            }
        }

        self.nbuf = nbuf;
        log::trace!("search from {from} reached {} cells", self.nodes.len());
        self.nodes.len()
    }

    /// Rebuild the path to `to` from the last search.
    ///
    /// Empty if `to` was not reached.
    pub fn path_to(&self, to: Point) -> Vec<Point> {
        let mut path = Vec::new();
        let mut cur = Some(to);
        while let Some(p) = cur {
            let Some(node) = self.nodes.get(&p) else {
                // Only `to` itself can be missing; every recorded parent is
                // recorded too.
                return Vec::new();
            };
            path.push(p);
            cur = node.parent;
        }
        path.reverse();
        path
    }

    /// Cost from the last search source to `p`, or `None` if not reached.
    pub fn distance_at(&self, p: Point) -> Option<i32> {
        self.nodes.get(&p).map(|n| n.cost)
    }

    /// Predecessor of `p` on its shortest path.
    ///
    /// `None` both for the source and for cells that were not reached; use
    /// [`reached`](Self::reached) to tell the two apart.
    pub fn predecessor_of(&self, p: Point) -> Option<Point> {
        self.nodes.get(&p).and_then(|n| n.parent)
    }

    /// Whether the last search reached `p`.
    pub fn reached(&self, p: Point) -> bool {
        self.nodes.contains_key(&p)
    }

    /// Number of cells recorded by the last search.
    pub fn visited_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::manhattan;
    use crate::graph::GridGraph;
    use crate::traits::Pather;
    use rand::{Rng, SeedableRng};
    use tilechase_core::{Range, Tile, TileMap};

    fn open_map(w: i32, h: i32) -> TileMap {
        TileMap::filled(w, h, Tile::FLOOR)
    }

    fn assert_connected(path: &[Point]) {
        for w in path.windows(2) {
            let (a, b) = (w[0], w[1]);
            assert_eq!(manhattan(a, b), 1, "gap between {a} and {b}");
        }
    }

    #[test]
    fn open_5x5_corner_to_corner() {
        let m = open_map(5, 5);
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&g, Point::new(0, 0), Point::new(4, 4));
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(4, 4)));
        assert_connected(&path);
    }

    #[test]
    fn start_equals_goal() {
        let m = open_map(3, 3);
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&g, Point::new(1, 1), Point::new(1, 1));
        assert_eq!(path, vec![Point::new(1, 1)]);
    }

    #[test]
    fn walled_off_goal_yields_empty_path() {
        let mut m = open_map(7, 7);
        // Ring of walls around (5, 5).
        for p in Range::new(4, 4, 7, 7) {
            m.set(p, None);
        }
        m.set(Point::new(5, 5), Some(Tile::FLOOR));
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&g, Point::new(0, 0), Point::new(5, 5));
        assert!(path.is_empty());
        assert!(!f.reached(Point::new(5, 5)));
        assert_eq!(f.predecessor_of(Point::new(5, 5)), None);
        assert_eq!(f.distance_at(Point::new(5, 5)), None);
    }

    #[test]
    fn origin_cell_is_not_a_terminator() {
        // Path passes through (0, 0) on its way from (2, 0) to (0, 2).
        let mut m = open_map(3, 3);
        m.set(Point::new(1, 1), None);
        m.set(Point::new(1, 2), None);
        m.set(Point::new(2, 1), None);
        m.set(Point::new(2, 2), None);
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&g, Point::new(2, 0), Point::new(0, 2));
        assert_eq!(
            path,
            vec![
                Point::new(2, 0),
                Point::new(1, 0),
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
            ]
        );
    }

    #[test]
    fn blocked_or_outside_endpoints() {
        let mut m = open_map(4, 4);
        m.set(Point::new(3, 3), None);
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let (origin, wall) = (Point::new(0, 0), Point::new(3, 3));
        assert!(f.find_path(&g, origin, wall).is_empty());
        assert!(f.find_path(&g, origin, Point::new(9, 9)).is_empty());
        assert!(f.find_path(&g, Point::new(-1, 0), origin).is_empty());
        assert_eq!(f.visited_count(), 0);
        assert!(f.find_path(&g, wall, origin).is_empty());
        assert_eq!(f.visited_count(), 0);
    }

    #[test]
    fn search_runs_to_exhaustion() {
        let mut m = open_map(6, 4);
        m.set(Point::new(5, 3), None);
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&g, Point::new(0, 0), Point::new(1, 0));
        assert_eq!(path.len(), 2);
        // Every walkable cell is known, not just those on the way to the goal.
        assert_eq!(f.visited_count(), g.walkable_cells().count());
        assert_eq!(f.distance_at(Point::new(5, 2)), Some(7));
        assert_eq!(f.distance_at(Point::new(0, 0)), Some(0));
        assert_eq!(f.predecessor_of(Point::new(0, 0)), None);
        assert!(f.reached(Point::new(0, 0)));
    }

    #[test]
    fn detours_around_wall() {
        let m = TileMap::from_ascii(
            "\
.......
...#...
...#...
...#...
.......",
        )
        .unwrap()
        .map;
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&g, Point::new(1, 2), Point::new(5, 2));
        // 4 across plus 2 up and 2 back down around the wall.
        assert_eq!(path.len(), 9);
        assert_connected(&path);
        assert!(path.iter().all(|&p| g.is_walkable(p)));
    }

    #[test]
    fn open_grid_paths_are_manhattan_optimal() {
        let m = open_map(12, 9);
        let g = GridGraph::new(&m);
        let mut f = ShortestPathFinder::new();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let a = Point::new(rng.random_range(0..12), rng.random_range(0..9));
            let b = Point::new(rng.random_range(0..12), rng.random_range(0..9));
            let path = f.find_path(&g, a, b);
            assert_eq!(path.len() as i32 - 1, manhattan(a, b), "{a} -> {b}");
            assert_connected(&path);
        }
    }

    #[test]
    fn random_maps_keep_invariants() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut f = ShortestPathFinder::new();
        for _ in 0..20 {
            let mut m = open_map(10, 10);
            for p in Range::new(0, 0, 10, 10) {
                if rng.random_range(0..4) == 0 {
                    m.set(p, None);
                }
            }
            let g = GridGraph::new(&m);
            let a = Point::new(rng.random_range(0..10), rng.random_range(0..10));
            let b = Point::new(rng.random_range(0..10), rng.random_range(0..10));

            let first = f.find_path(&g, a, b);
            let visited = f.visited_count();
            assert!(first.iter().all(|&p| g.is_walkable(p)));
            assert_connected(&first);
            if let Some(&last) = first.last() {
                assert_eq!(last, b);
                assert_eq!(first[0], a);
                assert_eq!(f.distance_at(b), Some(first.len() as i32 - 1));
            } else {
                assert!(!f.reached(b));
            }
            // Only walkable cells are ever recorded.
            for p in Range::new(0, 0, 10, 10) {
                if f.reached(p) {
                    assert!(g.is_walkable(p));
                }
            }

            let second = f.find_path(&g, a, b);
            assert_eq!(first.len(), second.len());
            assert_eq!(visited, f.visited_count());
        }
    }

    /// Uniform grid where entering a marked column costs extra.
    struct Swamp<'a> {
        graph: GridGraph<'a, TileMap>,
        column: i32,
    }

    impl Pather for Swamp<'_> {
        fn passable(&self, p: Point) -> bool {
            self.graph.passable(p)
        }

        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            Pather::neighbors(&self.graph, p, buf);
        }
    }

    impl WeightedPather for Swamp<'_> {
        fn cost(&self, _from: Point, to: Point) -> i32 {
            if to.x == self.column && to.y != 0 {
                10
            } else {
                1
            }
        }
    }

    #[test]
    fn weighted_costs_are_respected() {
        let m = open_map(5, 5);
        let swamp = Swamp {
            graph: GridGraph::new(&m),
            column: 2,
        };
        let mut f = ShortestPathFinder::new();
        let path = f.find_path(&swamp, Point::new(0, 4), Point::new(4, 4));
        // Crossing at row 0 is cheaper than wading through the column.
        assert!(path.contains(&Point::new(2, 0)));
        assert_eq!(f.distance_at(Point::new(4, 4)), Some(12));
        assert_connected(&path);
    }

    #[test]
    fn heap_pops_cheapest_first() {
        let node = |x, cost| NodeRef {
            pos: Point::new(x, 0),
            cost,
        };
        let mut open = BinaryHeap::new();
        open.extend([node(0, 5), node(3, 1), node(1, 1)]);
        assert_eq!(open.pop().map(|n| n.pos), Some(Point::new(1, 0)));
        assert_eq!(open.pop().map(|n| n.pos), Some(Point::new(3, 0)));
        assert_eq!(open.pop().map(|n| n.cost), Some(5));
    }
}
