//! Objective scoring strategy
//!
//! The allocator variants in the wild differ mostly in how they rank
//! resources; the trait below isolates that choice so a deployment can
//! swap the formula without forking the allocator.

use ordered_float::OrderedFloat;

use crate::core::types::Role;
use crate::snapshot::Resource;

/// Ranks a candidate resource for one agent; higher wins
pub trait ObjectiveScorer {
    fn resource_score(
        &self,
        role: Role,
        capacity: u32,
        resource: &Resource,
        distance: u32,
    ) -> OrderedFloat<f64>;
}

/// Greedy default: retrievable value over distance
///
/// An agent standing on the resource outranks everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyValueScorer;

impl ObjectiveScorer for GreedyValueScorer {
    fn resource_score(
        &self,
        _role: Role,
        capacity: u32,
        resource: &Resource,
        distance: u32,
    ) -> OrderedFloat<f64> {
        if distance == 0 {
            return OrderedFloat(f64::INFINITY);
        }
        let retrievable = capacity.min(resource.amount) * resource.resource_kind().unit_value();
        OrderedFloat(f64::from(retrievable) / f64::from(distance))
    }
}
