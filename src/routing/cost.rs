//! Cost functions for the route search.

use crate::graph::attributes::Attribute;
use crate::graph::Graph;

/// A route preference: multiplies each edge's physical length by a factor.
///
/// The factor must be `>= 1.0`; `f64::INFINITY` forbids the edge entirely.
pub trait CostFunction {
    fn cost_factor(&self, node_id: u32, edge_id: u32) -> f64;
}

impl<F: Fn(u32, u32) -> f64> CostFunction for F {
    fn cost_factor(&self, node_id: u32, edge_id: u32) -> f64 {
        self(node_id, edge_id)
    }
}

/// Pure shortest path: every edge costs its length.
pub struct UniformCost;

impl CostFunction for UniformCost {
    fn cost_factor(&self, _node_id: u32, _edge_id: u32) -> f64 {
        1.0
    }
}

/// City-bike preference over the edge attribute sets: forbids roads bikes
/// may not use, penalises big roads and loose surfaces, favours cycleways.
pub struct CityBikeCost<'a> {
    graph: &'a Graph,
}

impl<'a> CityBikeCost<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }
}

impl CostFunction for CityBikeCost<'_> {
    fn cost_factor(&self, _node_id: u32, edge_id: u32) -> f64 {
        let attributes = self.graph.edge_attributes(edge_id);

        let forbidden = attributes.contains(Attribute::HighwayMotorway)
            || attributes.contains(Attribute::HighwayTrunk)
            || attributes.contains(Attribute::AccessNo)
            || attributes.contains(Attribute::AccessPrivate)
            || attributes.contains(Attribute::VehicleNo)
            || attributes.contains(Attribute::BicycleNo)
            || attributes.contains(Attribute::BicycleUseSidepath);
        if forbidden {
            return f64::INFINITY;
        }

        let mut factor = 1.0;
        if attributes.contains(Attribute::HighwayPrimary) {
            factor *= 2.0;
        } else if attributes.contains(Attribute::HighwaySecondary) {
            factor *= 1.5;
        }
        if attributes.contains(Attribute::HighwaySteps) {
            factor *= 4.0;
        }
        if attributes.contains(Attribute::SurfaceGravel)
            || attributes.contains(Attribute::SurfaceGrass)
            || attributes.contains(Attribute::SurfaceSand)
            || attributes.contains(Attribute::SurfaceDirt)
            || attributes.contains(Attribute::TracktypeGrade4)
            || attributes.contains(Attribute::TracktypeGrade5)
        {
            factor *= 2.0;
        }
        if attributes.contains(Attribute::BicycleDismount) {
            factor *= 3.0;
        }
        // Dedicated infrastructure keeps the baseline; everything else on a
        // shared road pays a small premium so cycleways win ties.
        if !(attributes.contains(Attribute::HighwayCycleway)
            || attributes.contains(Attribute::BicycleDesignated))
        {
            factor *= 1.1;
        }
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_cost_is_one() {
        assert_eq!(UniformCost.cost_factor(3, 17), 1.0);
    }

    #[test]
    fn closures_are_cost_functions() {
        let forbid_edge_2 = |_node: u32, edge: u32| {
            if edge == 2 {
                f64::INFINITY
            } else {
                1.0
            }
        };
        assert_eq!(forbid_edge_2.cost_factor(0, 1), 1.0);
        assert_eq!(forbid_edge_2.cost_factor(0, 2), f64::INFINITY);
    }
}
