//! Route planning on top of the graph: cost functions, the best-route
//! search, the route representation and elevation profiles.

pub mod computer;
pub mod cost;
pub mod edge;
pub mod elevation;
pub mod route;

pub use computer::RouteComputer;
pub use cost::{CityBikeCost, CostFunction, UniformCost};
pub use edge::Edge;
pub use elevation::{elevation_profile, ElevationProfile};
pub use route::{MultiRoute, Route, RoutePoint, SingleRoute};
