use std::collections::VecDeque;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use prereq_graph_core::{Edge, Graph, NodeId, TraversalMode};

/// Time every engine query against synthetic prerequisite graphs.
#[derive(Parser, Debug)]
#[command(name = "prereq-graph-bench")]
struct Args {
    /// Topology to generate
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Target vertex count
    #[arg(default_value_t = 50_000)]
    node_count: u64,

    /// Run the all-pairs postman pairing only below this vertex count
    #[arg(long, default_value_t = 2_000)]
    postman_limit: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all generators and benchmark each
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense cliques connected by a thin bridge
    Barbell,
    /// Diffusion-limited aggregation (organic branching)
    Dla,
}

type Generator = fn(u64) -> Vec<Edge>;

fn main() {
    let args = Args::parse();

    println!("prereq-graph-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (clique-bridge-clique)", gen_barbell)],
        Mode::Dla => vec![("DLA (organic branching)", gen_dla)],
        Mode::All => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (clique-bridge-clique)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, args.node_count, args.postman_limit);
    }
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn run_benchmark(name: &str, generator: Generator, node_count: u64, postman_limit: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let edges = generator(node_count);
    let gen_time = ms(t);

    let t = Instant::now();
    let graph = Graph::from_edges(edges);
    println!(
        "Generated in {:.1}ms, indexed in {:.1}ms: {} nodes, {} edges, ~{:.1}MB",
        gen_time,
        ms(t),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Vertex 0 is the root/hub in every generator; the last id is far from it
    let far_node: NodeId = node_count.saturating_sub(1);

    println!();
    println!("{:>14} {:>12} {:>10}", "traverse", "found", "time");
    println!("{:->14} {:->12} {:->10}", "", "", "");
    for mode in TraversalMode::ALL {
        let t = Instant::now();
        let found = prereq_graph_core::traverse(&graph, 0, mode).len();
        println!("{:>14} {:>12} {:>8.1}ms", mode.to_string(), found, ms(t));
    }

    println!();
    println!("{:>8} {:>12} {:>12} {:>10}", "depth", "found", "visited", "time");
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");
    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = prereq_graph_core::bfs_neighborhood(&graph, 0, depth);
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            depth,
            result.visits.len(),
            result.nodes_visited,
            ms(t)
        );
        if result.nodes_visited >= graph.node_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    let t = Instant::now();
    let path = prereq_graph_core::shortest_path(&graph, 0, far_node);
    report_path("directed", far_node, &path, ms(t));

    let view = graph.undirected();
    let t = Instant::now();
    let path = prereq_graph_core::shortest_path(&view, 0, far_node);
    report_path("undirected", far_node, &path, ms(t));

    let t = Instant::now();
    let cyclic = prereq_graph_core::has_cycle(&graph);
    println!("has_cycle: {} in {:.1}ms", cyclic, ms(t));

    if node_count <= postman_limit {
        let t = Instant::now();
        let routes = prereq_graph_core::postman(&graph);
        let tour = prereq_graph_core::postman_tour(&graph);
        println!(
            "postman: {} routes, tour of {} vertices in {:.1}ms",
            routes.len(),
            tour.len(),
            ms(t)
        );
    } else {
        println!("postman: skipped (node_count > {})", postman_limit);
    }
    println!();
}

fn report_path(kind: &str, far_node: NodeId, path: &[NodeId], elapsed_ms: f64) {
    if path.is_empty() {
        println!(
            "Shortest {} path 0 → {}: no path ({:.1}ms)",
            kind, far_node, elapsed_ms
        );
    } else {
        println!(
            "Shortest {} path 0 → {}: {} hops in {:.1}ms",
            kind,
            far_node,
            path.len() - 1,
            elapsed_ms
        );
    }
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// L-system fractal tree: every course unlocks three follow-ups.
fn gen_lsystem(node_count: u64) -> Vec<Edge> {
    let branching = 3u64;
    let mut edges = Vec::with_capacity(node_count as usize);
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                edges.push(Edge::new(parent, next_id));
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    edges
}

/// Scale-free via edge-list sampling: a few foundation courses are
/// prerequisites for most of the catalogue.
fn gen_scale_free(node_count: u64) -> Vec<Edge> {
    let edges_per_node = 4u64;
    let mut rng = FastRng::new(12345);
    let mut edges = Vec::with_capacity((node_count * edges_per_node) as usize);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            edges.push(Edge::new(i, j));
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        let attach = edges_per_node.min(new_node);
        for _ in 0..attach {
            if endpoints.is_empty() {
                break;
            }
            let source = endpoints[rng.next(endpoints.len() as u64) as usize];
            if source != new_node {
                edges.push(Edge::new(source, new_node));
                endpoints.push(source);
                endpoints.push(new_node);
            }
        }
    }

    edges
}

/// Small-world (Watts-Strogatz): ring lattice with random rewiring.
fn gen_small_world(node_count: u64) -> Vec<Edge> {
    let k = 4u64;
    let p = 0.05f64;
    let mut rng = FastRng::new(67890);
    let mut edges = Vec::with_capacity((node_count * k) as usize);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                let target = if rewired != i { rewired } else { neighbor };
                edges.push(Edge::new(i, target));
            } else {
                edges.push(Edge::new(i, neighbor));
            }
        }
    }

    edges
}

/// Erdos-Renyi: uniform random edges, ~4 per vertex.
fn gen_random(node_count: u64) -> Vec<Edge> {
    let target_edges = node_count * 4;
    let mut rng = FastRng::new(54321);
    let mut edges = Vec::with_capacity(target_edges as usize);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push(Edge::new(from, to));
        }
    }

    edges
}

/// Barbell: two dense cliques joined by a chain of ~10 bridge vertices.
fn gen_barbell(node_count: u64) -> Vec<Edge> {
    let bridge_len = 10u64.min(node_count);
    let clique_size = (node_count - bridge_len) / 2;
    let mut rng = FastRng::new(99999);
    let mut edges = Vec::with_capacity((clique_size * 10 * 2 + bridge_len) as usize);

    let fanout = 10u64.min(clique_size.saturating_sub(1));
    for i in 0..clique_size {
        for _ in 0..fanout {
            let target = rng.next(clique_size);
            if target != i {
                edges.push(Edge::new(i, target));
            }
        }
    }

    let bridge_start = clique_size;
    for i in 0..bridge_len {
        let id = bridge_start + i;
        let from = if i == 0 { clique_size.saturating_sub(1) } else { id - 1 };
        edges.push(Edge::new(from, id));
    }

    let b_start = bridge_start + bridge_len;
    if clique_size > 0 {
        edges.push(Edge::new(b_start - 1, b_start));
    }
    for i in 0..clique_size {
        for _ in 0..fanout {
            let target = rng.next(clique_size);
            if target != i {
                edges.push(Edge::new(b_start + i, b_start + target));
            }
        }
    }

    edges
}

/// DLA (diffusion-limited aggregation): each new vertex attaches to a
/// recent "surface" vertex, with occasional long-range shortcuts.
fn gen_dla(node_count: u64) -> Vec<Edge> {
    let mut rng = FastRng::new(77777);
    let mut edges = Vec::with_capacity((node_count * 2) as usize);

    let surface_max = 10_000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        edges.push(Edge::new(attach_to, new_node));

        // 10% chance of a second prerequisite (creates diamonds)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                edges.push(Edge::new(other, new_node));
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    edges
}
