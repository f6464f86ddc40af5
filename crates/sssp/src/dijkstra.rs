use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Error;
use crate::error::Result;
use crate::error::render;
use crate::graph::VertexId;
use crate::graph::WeightedGraph;
use crate::heap::BinaryMinHeap;

/// Tentative or final distance of a vertex from the source.
///
/// `Unreachable` orders after every finite distance and never takes part in
/// arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Distance {
    Finite(f64),
    Unreachable,
}

impl Distance {
    #[inline]
    pub fn is_reachable(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Finite(d) => Some(d),
            Self::Unreachable => None,
        }
    }
}

/// Distances indexed by [`VertexId`].
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceTable {
    dist: Vec<Distance>,
}

impl DistanceTable {
    #[inline]
    pub fn get(&self, id: VertexId) -> Option<Distance> {
        self.dist.get(id).copied()
    }

    pub fn as_slice(&self) -> &[Distance] {
        &self.dist
    }

    pub fn len(&self) -> usize {
        self.dist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }
}

/// Predecessor links indexed by [`VertexId`]; `None` for the source and for
/// unreached vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct PredecessorMap {
    source: VertexId,
    pred: Vec<Option<VertexId>>,
}

impl PredecessorMap {
    #[inline]
    pub fn source(&self) -> VertexId {
        self.source
    }

    #[inline]
    pub fn get(&self, id: VertexId) -> Option<VertexId> {
        self.pred.get(id).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<VertexId>] {
        &self.pred
    }
}

/// Walks predecessor links from `target` back to the source and returns the
/// ids from source to target inclusive.
pub fn reconstruct_path(predecessors: &PredecessorMap, target: VertexId) -> Result<Vec<VertexId>> {
    let n = predecessors.pred.len();
    if target >= n {
        return Err(Error::VertexNotFound {
            vertex: render(&target),
        });
    }

    let mut path = vec![target];
    let mut cur = target;
    while let Some(prev) = predecessors.pred[cur] {
        if path.len() > n {
            break;
        }
        path.push(prev);
        cur = prev;
    }

    if cur != predecessors.source {
        return Err(Error::UnreachableVertex {
            vertex: render(&target),
        });
    }

    path.reverse();
    Ok(path)
}

/// Output of one [`dijkstra`] run. Borrows the graph for vertex labels and
/// is never modified after construction.
#[derive(Clone, Debug)]
pub struct ShortestPaths<'g, V> {
    graph: &'g WeightedGraph<V>,
    distances: DistanceTable,
    predecessors: PredecessorMap,
    settled: Vec<(VertexId, f64)>,
}

impl<'g, V: Clone + Eq + Hash + Debug> ShortestPaths<'g, V> {
    pub fn source(&self) -> &'g V {
        self.graph.vertex(self.predecessors.source)
    }

    pub fn distance(&self, vertex: &V) -> Result<Distance> {
        let id = self.graph.require(vertex)?;
        Ok(self.distances.dist[id])
    }

    pub fn predecessor(&self, vertex: &V) -> Result<Option<&'g V>> {
        let id = self.graph.require(vertex)?;
        Ok(self.predecessors.get(id).map(|p| self.graph.vertex(p)))
    }

    /// Source-to-`vertex` path, both ends inclusive.
    pub fn path_to(&self, vertex: &V) -> Result<Vec<&'g V>> {
        let id = self.graph.require(vertex)?;
        let path = reconstruct_path(&self.predecessors, id).map_err(|_| Error::UnreachableVertex {
            vertex: render(vertex),
        })?;
        Ok(path.into_iter().map(|v| self.graph.vertex(v)).collect())
    }

    /// Every vertex with its distance, in insertion order.
    pub fn distances(&self) -> impl Iterator<Item = (&'g V, Distance)> + '_ {
        let graph = self.graph;
        self.distances
            .dist
            .iter()
            .enumerate()
            .map(move |(id, &d)| (graph.vertex(id), d))
    }

    pub fn predecessors(&self) -> impl Iterator<Item = (&'g V, Option<&'g V>)> + '_ {
        let graph = self.graph;
        self.predecessors
            .pred
            .iter()
            .enumerate()
            .map(move |(id, p)| (graph.vertex(id), p.map(|p| graph.vertex(p))))
    }

    /// Vertices in the order they were finalized, each with the distance it
    /// held at that moment.
    pub fn settled(&self) -> impl Iterator<Item = (&'g V, f64)> + '_ {
        let graph = self.graph;
        self.settled.iter().map(move |&(id, d)| (graph.vertex(id), d))
    }

    pub fn reachable_count(&self) -> usize {
        self.settled.len()
    }

    pub fn distance_table(&self) -> &DistanceTable {
        &self.distances
    }

    pub fn predecessor_map(&self) -> &PredecessorMap {
        &self.predecessors
    }
}

/// Single-source shortest paths with a lazy-deletion binary heap.
///
/// Stale heap entries (for vertices already finalized) are discarded on pop
/// in place of a decrease-key. Edge weights are trusted to be non-negative,
/// which [`WeightedGraph::add_edge`] guarantees. Fails with
/// [`Error::DistanceOverflow`] when some vertex is reachable only through
/// path sums beyond the `f64` range.
pub fn dijkstra<'g, V>(graph: &'g WeightedGraph<V>, source: &V) -> Result<ShortestPaths<'g, V>>
where
    V: Clone + Eq + Hash + Debug,
{
    let src = graph.require(source)?;
    let n = graph.vertex_count();
    tracing::debug!(
        source = ?source,
        vertices = n,
        edges = graph.edge_count(),
        "dijkstra start"
    );

    let mut dist = vec![Distance::Unreachable; n];
    let mut pred: Vec<Option<VertexId>> = vec![None; n];
    let mut finalized = vec![false; n];
    let mut overflowed = vec![false; n];
    let mut settled = Vec::new();

    let mut heap = BinaryMinHeap::new();
    let mut pushes = 1_usize;
    let mut stale = 0_usize;
    dist[src] = Distance::Finite(0.0);
    heap.push(0.0, src);

    while !heap.is_empty() {
        let entry = heap.pop_min()?;
        let u = entry.payload;
        if finalized[u] {
            stale += 1;
            continue;
        }
        finalized[u] = true;

        let Distance::Finite(du) = dist[u] else {
            continue;
        };
        settled.push((u, du));

        for edge in graph.out_edges(u) {
            let v = edge.to;
            let cand = du + edge.weight;
            if !cand.is_finite() {
                overflowed[v] = true;
                continue;
            }
            if Distance::Finite(cand) < dist[v] {
                tracing::trace!(from = u, to = v, distance = cand, "relax");
                dist[v] = Distance::Finite(cand);
                pred[v] = Some(u);
                heap.push(cand, v);
                pushes += 1;
            }
        }
    }

    // Only a vertex reached by nothing but overflowing sums is an error.
    if let Some(v) = (0..n).find(|&v| overflowed[v] && !dist[v].is_reachable()) {
        return Err(Error::DistanceOverflow {
            vertex: render(graph.vertex(v)),
        });
    }

    tracing::debug!(
        settled = settled.len(),
        pushes,
        stale,
        "dijkstra done"
    );

    Ok(ShortestPaths {
        graph,
        distances: DistanceTable { dist },
        predecessors: PredecessorMap { source: src, pred },
        settled,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Distance;
    use super::dijkstra;
    use super::reconstruct_path;
    use crate::Error;
    use crate::graph::WeightedGraph;

    fn triangle() -> WeightedGraph<&'static str> {
        WeightedGraph::from_edges(true, &[("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0)])
            .unwrap()
    }

    /// Minimum weight over all simple paths from `src`, by exhaustive DFS.
    fn brute_force(graph: &WeightedGraph<usize>, src: usize) -> Vec<Option<f64>> {
        fn dfs(
            graph: &WeightedGraph<usize>,
            u: usize,
            acc: f64,
            on_path: &mut Vec<bool>,
            best: &mut Vec<Option<f64>>,
        ) {
            if best[u].is_none_or(|b| acc < b) {
                best[u] = Some(acc);
            }
            for edge in graph.out_edges(u) {
                if !on_path[edge.to] {
                    on_path[edge.to] = true;
                    dfs(graph, edge.to, acc + edge.weight, on_path, best);
                    on_path[edge.to] = false;
                }
            }
        }

        let n = graph.vertex_count();
        let mut best = vec![None; n];
        let mut on_path = vec![false; n];
        on_path[src] = true;
        dfs(graph, src, 0.0, &mut on_path, &mut best);
        best
    }

    fn random_graph(n: usize, m: usize, undirected: bool, seed: u64) -> WeightedGraph<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut g = if undirected {
            WeightedGraph::new_undirected()
        } else {
            WeightedGraph::new_directed()
        };
        for v in 0..n {
            g.add_vertex(v);
        }
        for _ in 0..m {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            let w = rng.random_range(0..=20_u32) as f64;
            g.add_edge(u, v, w).unwrap();
        }
        g
    }

    #[test]
    fn triangle_prefers_two_hop_path() {
        let g = triangle();
        let sp = dijkstra(&g, &"A").unwrap();
        assert_eq!(sp.distance(&"A").unwrap(), Distance::Finite(0.0));
        assert_eq!(sp.distance(&"B").unwrap(), Distance::Finite(1.0));
        assert_eq!(sp.distance(&"C").unwrap(), Distance::Finite(3.0));
        assert_eq!(sp.predecessor(&"C").unwrap(), Some(&"B"));
        assert_eq!(sp.predecessor(&"A").unwrap(), None);
        assert_eq!(sp.path_to(&"C").unwrap(), vec![&"A", &"B", &"C"]);
        assert_eq!(sp.source(), &"A");
    }

    #[test]
    fn disconnected_vertex_is_unreachable() {
        let mut g = WeightedGraph::new_undirected();
        g.add_vertex("A");
        g.add_vertex("B");
        let sp = dijkstra(&g, &"A").unwrap();
        assert_eq!(sp.distance(&"A").unwrap(), Distance::Finite(0.0));
        assert_eq!(sp.distance(&"B").unwrap(), Distance::Unreachable);
        assert_eq!(sp.predecessor(&"B").unwrap(), None);
        assert!(matches!(
            sp.path_to(&"B"),
            Err(Error::UnreachableVertex { vertex }) if vertex == "\"B\""
        ));
        assert_eq!(sp.reachable_count(), 1);
    }

    #[test]
    fn single_vertex() {
        let mut g = WeightedGraph::new_directed();
        g.add_vertex("A");
        let sp = dijkstra(&g, &"A").unwrap();
        assert_eq!(sp.distances().collect::<Vec<_>>(), vec![(&"A", Distance::Finite(0.0))]);
        assert_eq!(sp.path_to(&"A").unwrap(), vec![&"A"]);
        assert_eq!(sp.settled().count(), 1);
    }

    #[test]
    fn unknown_source_fails() {
        let g = triangle();
        assert!(matches!(
            dijkstra(&g, &"X"),
            Err(Error::VertexNotFound { vertex }) if vertex == "\"X\""
        ));
    }

    #[test]
    fn directed_edges_do_not_flow_backwards() {
        let g = WeightedGraph::from_edges(false, &[(0, 1, 2.0), (1, 2, 2.0)]).unwrap();
        let sp = dijkstra(&g, &2).unwrap();
        assert_eq!(sp.distance(&0).unwrap(), Distance::Unreachable);
        let sp = dijkstra(&g, &0).unwrap();
        assert_eq!(sp.distance(&2).unwrap(), Distance::Finite(4.0));
    }

    #[test]
    fn self_loops_and_parallel_edges() {
        let g = WeightedGraph::from_edges(
            false,
            &[("A", "A", 0.0), ("A", "B", 9.0), ("A", "B", 2.0), ("B", "B", 1.0)],
        )
        .unwrap();
        let sp = dijkstra(&g, &"A").unwrap();
        assert_eq!(sp.distance(&"A").unwrap(), Distance::Finite(0.0));
        assert_eq!(sp.distance(&"B").unwrap(), Distance::Finite(2.0));
        assert_eq!(sp.predecessor(&"A").unwrap(), None);
        assert_eq!(sp.predecessor(&"B").unwrap(), Some(&"A"));
    }

    #[test]
    fn zero_weight_chain() {
        let g = WeightedGraph::from_edges(false, &[(0, 1, 0.0), (1, 2, 0.0), (2, 3, 0.0), (4, 5, 7.0)])
            .unwrap();
        let sp = dijkstra(&g, &0).unwrap();
        for v in 0..4 {
            assert_eq!(sp.distance(&v).unwrap(), Distance::Finite(0.0));
        }
        assert_eq!(sp.distance(&4).unwrap(), Distance::Unreachable);
        assert_eq!(sp.distance(&5).unwrap(), Distance::Unreachable);
        assert_eq!(sp.path_to(&3).unwrap(), vec![&0, &1, &2, &3]);
    }

    #[test]
    fn overflowing_path_sum_is_an_error() {
        let g = WeightedGraph::from_edges(false, &[("A", "B", f64::MAX), ("B", "C", f64::MAX)])
            .unwrap();
        assert!(matches!(
            dijkstra(&g, &"A"),
            Err(Error::DistanceOverflow { vertex }) if vertex == "\"C\""
        ));

        // A single huge edge is still representable.
        let sp = dijkstra(&g, &"B").unwrap();
        assert_eq!(sp.distance(&"C").unwrap(), Distance::Finite(f64::MAX));
    }

    #[test]
    fn overflowing_route_superseded_by_finite_one() {
        // B settles first and its edge to C overflows; D later reaches C
        // with a representable sum.
        let big = f64::MAX;
        let g = WeightedGraph::from_edges(
            false,
            &[
                ("A", "B", big * 0.75),
                ("B", "C", big * 0.75),
                ("A", "D", big * 0.8),
                ("D", "C", big * 0.1),
            ],
        )
        .unwrap();
        let sp = dijkstra(&g, &"A").unwrap();
        let c = sp.distance(&"C").unwrap().value().unwrap();
        assert!(c.is_finite());
        assert_eq!(c, big * 0.8 + big * 0.1);
        assert_eq!(sp.predecessor(&"C").unwrap(), Some(&"D"));
        for (_, d) in sp.distances() {
            assert!(d.value().is_some_and(f64::is_finite));
        }
    }

    #[test]
    fn equal_cost_ties_resolve_deterministically() {
        // Two shortest routes to D; B is inserted first and settles first.
        let g = WeightedGraph::from_edges(
            false,
            &[("A", "B", 1.0), ("A", "C", 1.0), ("B", "D", 1.0), ("C", "D", 1.0)],
        )
        .unwrap();
        for _ in 0..5 {
            let sp = dijkstra(&g, &"A").unwrap();
            assert_eq!(sp.predecessor(&"D").unwrap(), Some(&"B"));
        }
    }

    #[test]
    fn matches_brute_force_on_small_graphs() {
        for seed in 0..40_u64 {
            let n = 7;
            let g = random_graph(n, 14, seed % 2 == 0, 0xB7F0_0000 + seed);
            let src = (seed as usize) % n;
            let sp = dijkstra(&g, &src).unwrap();
            let expected = brute_force(&g, src);
            for v in 0..n {
                assert_eq!(sp.distance(&v).unwrap().value(), expected[v], "seed={seed} v={v}");
            }
        }
    }

    #[test]
    fn predecessor_consistency_and_non_negativity() {
        for seed in 0..20_u64 {
            let n = 60;
            let g = random_graph(n, 240, seed % 3 == 0, 0x9E3D_0000 + seed);
            let src = (seed as usize) % n;
            let sp = dijkstra(&g, &src).unwrap();

            for (v, d) in sp.distances() {
                let Distance::Finite(dv) = d else {
                    assert_eq!(sp.predecessor(v).unwrap(), None);
                    continue;
                };
                assert!(dv >= 0.0);
                let Some(p) = sp.predecessor(v).unwrap() else {
                    assert_eq!(*v, src, "seed={seed}");
                    continue;
                };
                let dp = sp.distance(p).unwrap().value().unwrap();
                let best_edge = g
                    .neighbors_of(p)
                    .unwrap()
                    .filter(|&(to, _)| to == v)
                    .map(|(_, w)| w)
                    .fold(f64::INFINITY, f64::min);
                assert_eq!(dv, dp + best_edge, "seed={seed} v={v}");
            }
        }
    }

    #[test]
    fn undirected_distances_are_symmetric() {
        for seed in 0..10_u64 {
            let n = 30;
            let g = random_graph(n, 80, true, 0x5F3A_0000 + seed);
            let runs: Vec<_> = (0..n).map(|s| dijkstra(&g, &s).unwrap()).collect();
            for a in 0..n {
                for d in 0..n {
                    assert_eq!(
                        runs[a].distance(&d).unwrap(),
                        runs[d].distance(&a).unwrap(),
                        "seed={seed} a={a} d={d}"
                    );
                }
            }
        }
    }

    #[test]
    fn finalized_distances_never_change() {
        for seed in 0..20_u64 {
            let g = random_graph(50, 200, false, 0xF1A1_0000 + seed);
            let sp = dijkstra(&g, &0).unwrap();
            let mut last = 0.0;
            for (v, at_settle) in sp.settled() {
                assert_eq!(sp.distance(v).unwrap(), Distance::Finite(at_settle));
                assert!(at_settle >= last, "seed={seed}");
                last = at_settle;
            }
            let reachable = sp.distances().filter(|(_, d)| d.is_reachable()).count();
            assert_eq!(sp.reachable_count(), reachable);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let g = random_graph(80, 400, true, 0x1DE9_0001);
        let a = dijkstra(&g, &3).unwrap();
        let b = dijkstra(&g, &3).unwrap();
        assert_eq!(a.distance_table(), b.distance_table());
        assert_eq!(a.predecessor_map(), b.predecessor_map());
    }

    #[test]
    fn concurrent_sources_share_graph() {
        let g = random_graph(100, 500, true, 0xC0C0_0000);
        let sequential: HashMap<usize, Vec<Distance>> = (0..8)
            .map(|s| (s, dijkstra(&g, &s).unwrap().distance_table().as_slice().to_vec()))
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|s| {
                    let g = &g;
                    scope.spawn(move || {
                        let sp = dijkstra(g, &s).unwrap();
                        (s, sp.distance_table().as_slice().to_vec())
                    })
                })
                .collect();
            for handle in handles {
                let (s, dist) = handle.join().unwrap();
                assert_eq!(dist, sequential[&s]);
            }
        });
    }

    #[test]
    fn reconstruct_path_on_ids() {
        let g = triangle();
        let sp = dijkstra(&g, &"A").unwrap();
        let preds = sp.predecessor_map();
        let c = g.id_of(&"C").unwrap();
        let ids = reconstruct_path(preds, c).unwrap();
        let labels: Vec<_> = ids.into_iter().map(|id| *g.vertex(id)).collect();
        assert_eq!(labels, vec!["A", "B", "C"]);
        assert!(matches!(
            reconstruct_path(preds, 99),
            Err(Error::VertexNotFound { .. })
        ));
    }
}
