//! Graph → distance matrix → hyperbolicity, side by side for every algorithm.
//!
//! Trees are 0-hyperbolic, cycles are not, and disconnected graphs are measured per
//! component. Run with `RUST_LOG=debug` and a subscriber of your choice to see the stages;
//! this demo prints results only.

use gromov::four_point::four_point_delta;
use gromov::{compute_hyperbolicity, Algorithm, Graph, Result};

fn main() -> Result<()> {
    let mut disconnected = make_cycle_graph("a", 6)?;
    for (u, v) in [("b0", "b1"), ("b1", "b2")] {
        disconnected.add_edge(u, v, 1.0)?;
    }

    let cases = [
        ("path n=8", make_path_graph(8)?),
        ("cycle n=4", make_cycle_graph("c", 4)?),
        ("cycle n=8", make_cycle_graph("c", 8)?),
        ("cycle n=6 + path n=3", disconnected),
    ];

    for (label, graph) in &cases {
        println!("{label} ({} nodes, {} edges)", graph.len(), graph.edge_count());
        let reports = Algorithm::ALL
            .into_iter()
            .map(|algorithm| compute_hyperbolicity(graph, algorithm))
            .collect::<Result<Vec<_>>>()?;
        for report in &reports {
            print!("  {:<24} δ = {}", report.algorithm.to_string(), report.hyperbolicity);
            if report.tree_complete() == Some(false) {
                print!("  (tree incomplete)");
            }
            println!();
        }
        let reference = four_point_delta(&reports[0].distance_matrix);
        println!("  {:<24} δ = {reference}", "Four-point (brute force)");
        println!();
    }
    Ok(())
}

fn make_path_graph(n: usize) -> Result<Graph> {
    Graph::from_edges((1..n).map(|i| (format!("p{}", i - 1), format!("p{i}"), 1.0)))
}

fn make_cycle_graph(prefix: &str, n: usize) -> Result<Graph> {
    Graph::from_edges((0..n).map(|i| {
        (
            format!("{prefix}{i}"),
            format!("{prefix}{}", (i + 1) % n),
            1.0,
        )
    }))
}
