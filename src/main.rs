use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use velo_route::geo::{bounds, Point};
use velo_route::graph::Graph;
use velo_route::routing::{elevation_profile, CityBikeCost, RouteComputer, UniformCost};

#[derive(Parser)]
#[command(name = "velo-route")]
#[command(version)]
#[command(about = "Bicycle routing over a binary road graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics of a graph directory
    Info {
        /// Directory holding the graph's .bin files
        graph: PathBuf,
    },
    /// Find the best bike route between two points
    Route {
        /// Directory holding the graph's .bin files
        graph: PathBuf,
        /// Start point (east,north in CH1903+ meters)
        #[arg(long)]
        from: String,
        /// End point (east,north in CH1903+ meters)
        #[arg(long)]
        to: String,
        /// How far to look for a road node around each point, in meters
        #[arg(long, default_value_t = 1000.0)]
        search_distance: f64,
        /// Ignore road attributes and take the shortest path
        #[arg(long)]
        shortest: bool,
    },
}

fn parse_point(s: &str) -> Result<Point> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        anyhow::bail!("point must be in format 'east,north'");
    }
    let e = parts[0].trim().parse::<f64>()?;
    let n = parts[1].trim().parse::<f64>()?;
    if !bounds::contains_en(e, n) {
        anyhow::bail!("point ({e}, {n}) is outside the Swiss bounds");
    }
    Ok(Point::new(e, n))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { graph } => {
            let start = Instant::now();
            let graph = Graph::load_from(&graph).context("loading graph")?;
            println!("Graph loaded in {:.3}s", start.elapsed().as_secs_f64());
            println!("Nodes:          {}", graph.node_count());
            println!("Edges:          {}", graph.edge_count());
            println!("Attribute sets: {}", graph.attribute_set_count());
        }
        Commands::Route {
            graph,
            from,
            to,
            search_distance,
            shortest,
        } => {
            let from_point = parse_point(&from)?;
            let to_point = parse_point(&to)?;

            println!("Loading graph from {}...", graph.display());
            let graph = Graph::load_from(&graph).context("loading graph")?;

            let start_node = graph
                .node_closest_to(from_point, search_distance)
                .with_context(|| format!("no road node within {search_distance} m of {from}"))?;
            let end_node = graph
                .node_closest_to(to_point, search_distance)
                .with_context(|| format!("no road node within {search_distance} m of {to}"))?;
            if start_node == end_node {
                anyhow::bail!("both points snap to the same road node");
            }

            println!("Routing from node {} to node {}...", start_node, end_node);
            let search_start = Instant::now();
            let route = if shortest {
                RouteComputer::new(&graph, UniformCost).best_route_between(start_node, end_node)
            } else {
                RouteComputer::new(&graph, CityBikeCost::new(&graph))
                    .best_route_between(start_node, end_node)
            };
            let route = route.context("no route between the two points")?;
            let profile = elevation_profile(&route, 5.0);

            println!("Route found in {:.3}s", search_start.elapsed().as_secs_f64());
            println!(
                "Distance: {:.0}m ({:.1} km)",
                route.length(),
                route.length() / 1000.0
            );
            println!("Edges:    {}", route.edges().len());
            println!("Ascent:   {:.0}m", profile.total_ascent());
            println!("Descent:  {:.0}m", profile.total_descent());
            println!(
                "Elevation: {:.0}m to {:.0}m",
                profile.min_elevation(),
                profile.max_elevation()
            );
        }
    }

    Ok(())
}
