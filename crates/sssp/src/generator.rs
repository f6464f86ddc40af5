use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::WeightedGraph;

const C_MAX: u64 = 1_000_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GraphCase {
    SparseRandom,
    UndirectedRandom,
    DenseZero,
    AlmostLine,
    GridRandom,
    WrongDijkstraKiller,
}

pub const ALL_CASES: [GraphCase; 6] = [
    GraphCase::SparseRandom,
    GraphCase::UndirectedRandom,
    GraphCase::DenseZero,
    GraphCase::AlmostLine,
    GraphCase::GridRandom,
    GraphCase::WrongDijkstraKiller,
];

impl GraphCase {
    pub fn label(self) -> &'static str {
        match self {
            Self::SparseRandom => "sparse_random",
            Self::UndirectedRandom => "undirected_random",
            Self::DenseZero => "dense_zero",
            Self::AlmostLine => "almost_line",
            Self::GridRandom => "grid_random",
            Self::WrongDijkstraKiller => "wrong_dijkstra_killer",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GeneratedGraph {
    pub graph: WeightedGraph<usize>,
    pub source: usize,
    pub target: usize,
}

/// Weights are integral, so path sums stay exact in `f64`.
pub fn generate_case(case: GraphCase, size: usize, seed: u64) -> GeneratedGraph {
    match case {
        GraphCase::SparseRandom => sparse_random_case(size.max(32), seed, 4, false),
        GraphCase::UndirectedRandom => sparse_random_case(size.max(32), seed ^ 0x5A5A, 3, true),
        GraphCase::DenseZero => dense_zero_case(size.max(256), seed),
        GraphCase::AlmostLine => almost_line_case(size.max(64), seed),
        GraphCase::GridRandom => grid_random_case(size.max(256), seed),
        GraphCase::WrongDijkstraKiller => wrong_dijkstra_killer_case(size.max(512), seed),
    }
}

fn sparse_random_case(size: usize, seed: u64, edge_factor: usize, undirected: bool) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = size.max(2);
    let m_target = (n.saturating_mul(edge_factor)).min(complete_edges(n));
    let mut edges = Vec::with_capacity(m_target);
    let mut used = HashSet::with_capacity(m_target * 2 + 1);

    while edges.len() < m_target {
        let u = rng.random_range(0..n);
        let v = rng.random_range(0..n);
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let (source, target) = endpoints(&mut rng, n);
    GeneratedGraph {
        graph: build(n, undirected, &edges),
        source,
        target,
    }
}

fn dense_zero_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = floor_sqrt(size).max(8);
    let mut edges = Vec::with_capacity(complete_edges(n));

    for u in 0..n {
        for v in 0..n {
            if u != v {
                edges.push((u, v, 0));
            }
        }
    }

    let (source, target) = endpoints(&mut rng, n);
    GeneratedGraph {
        graph: build(n, false, &edges),
        source,
        target,
    }
}

fn almost_line_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = size.max(8);
    let mut edges = Vec::with_capacity(n * 2);
    let mut used = HashSet::with_capacity(n * 4);

    for i in 0..(n - 1) {
        push_unique_edge(&mut edges, &mut used, i, i + 1, rng.random_range(0..=C_MAX));
    }

    let m_target = (n.saturating_mul(2)).min(complete_edges(n));
    while edges.len() < m_target {
        let a = rng.random_range(0..(n - 2));
        let b = (a + rng.random_range(2..=3)).min(n - 1);
        let (u, v) = if rng.random_bool(0.5) { (b, a) } else { (a, b) };
        push_unique_edge(&mut edges, &mut used, u, v, rng.random_range(0..=C_MAX));
    }

    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut rng);
    for edge in &mut edges {
        edge.0 = perm[edge.0];
        edge.1 = perm[edge.1];
    }
    edges.shuffle(&mut rng);

    GeneratedGraph {
        graph: build(n, false, &edges),
        source: perm[0],
        target: perm[n - 1],
    }
}

fn grid_random_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = floor_sqrt((size / 4).max(16)).max(4);
    let n = len * len;
    let mut edges = Vec::with_capacity(n * 2);

    let index = |i: usize, j: usize| -> usize { i * len + j };
    for i in 0..len {
        for j in 0..len {
            if j + 1 < len {
                edges.push((index(i, j), index(i, j + 1), rng.random_range(0..=C_MAX)));
            }
            if i + 1 < len {
                edges.push((index(i, j), index(i + 1, j), rng.random_range(0..=C_MAX)));
            }
        }
    }

    edges.shuffle(&mut rng);
    let (source, target) = endpoints(&mut rng, n);
    GeneratedGraph {
        graph: build(n, true, &edges),
        source,
        target,
    }
}

/// Two fans joined at a hub: settling order differs sharply from insertion
/// order, so an engine that finalizes too early gets the far side wrong.
fn wrong_dijkstra_killer_case(size: usize, seed: u64) -> GeneratedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let one = (size / 4).max(8);
    let n = one * 2 + 3;
    let mut edges = Vec::with_capacity(one * 4);

    for i in 0..one {
        edges.push((0, i + 1, i as u64));
        edges.push((i + 1, one + 1, ((one - i - 1) * 2) as u64));
        edges.push((one + 1, one + 2 + i, (2 * i) as u64));
        edges.push((one + 2 + i, n - 1, (one - i - 1) as u64));
    }
    edges.shuffle(&mut rng);

    GeneratedGraph {
        graph: build(n, false, &edges),
        source: 0,
        target: n - 1,
    }
}

fn build(n: usize, undirected: bool, edges: &[(usize, usize, u64)]) -> WeightedGraph<usize> {
    let mut graph = if undirected {
        WeightedGraph::new_undirected()
    } else {
        WeightedGraph::new_directed()
    };
    for v in 0..n {
        graph.add_vertex(v);
    }
    for &(u, v, w) in edges {
        if let Err(err) = graph.add_edge(u, v, w as f64) {
            panic!("generated edge {u} -> {v} rejected: {err}");
        }
    }
    graph
}

fn endpoints(rng: &mut StdRng, n: usize) -> (usize, usize) {
    let source = rng.random_range(0..n);
    let mut target = rng.random_range(0..n);
    if source == target {
        target = (target + 1) % n;
    }
    (source, target)
}

#[inline]
fn complete_edges(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1))
}

#[inline]
fn floor_sqrt(value: usize) -> usize {
    (value as f64).sqrt().floor() as usize
}

#[inline]
fn push_unique_edge(
    edges: &mut Vec<(usize, usize, u64)>,
    used: &mut HashSet<(usize, usize)>,
    u: usize,
    v: usize,
    weight: u64,
) -> bool {
    if u == v {
        return false;
    }
    if used.insert((u, v)) {
        edges.push((u, v, weight));
        true
    } else {
        false
    }
}
