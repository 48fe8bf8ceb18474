//! Bicycle route planning over a memory-mapped road graph.
//!
//! The graph is a directory of flat binary files produced offline; loading
//! it is one `mmap` per file, and every query decodes straight out of the
//! mapped bytes. On top of it sit cost functions, an A* route search and
//! elevation profiles.
//!
//! ```no_run
//! use std::path::Path;
//! use velo_route::graph::Graph;
//! use velo_route::routing::{elevation_profile, CityBikeCost, RouteComputer};
//!
//! # fn main() -> Result<(), velo_route::error::GraphError> {
//! let graph = Graph::load_from(Path::new("graph"))?;
//! let computer = RouteComputer::new(&graph, CityBikeCost::new(&graph));
//! if let Some(route) = computer.best_route_between(159_049, 117_669) {
//!     let profile = elevation_profile(&route, 5.0);
//!     println!("{:.1} m, {:.0} m up", route.length(), profile.total_ascent());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bits;
pub mod error;
pub mod functions;
pub mod geo;
pub mod graph;
pub mod math;
pub mod q28_4;
pub mod routing;

pub use error::GraphError;
pub use geo::Point;
pub use graph::Graph;
pub use routing::{Route, RouteComputer};
