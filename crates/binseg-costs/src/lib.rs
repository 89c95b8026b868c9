// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Distribution cost models for binary segmentation.
//!
//! Each model turns [`binseg_core::SummaryStatistics`] range queries into an
//! O(1) segment cost and fits the per-segment parameters reported alongside
//! every split.

pub mod exponential;
pub mod model;
pub mod negbin;
pub mod normal;
pub mod poisson;
pub mod validation;

pub use exponential::CostExponentialRate;
pub use model::CostModel;
pub use negbin::CostNegBinomial;
pub use normal::{CostNormalMean, CostNormalMeanVar, CostNormalVar};
pub use poisson::CostPoissonRate;

use binseg_core::Registry;

/// Registry of cost models keyed by name.
pub type DistributionRegistry = Registry<dyn CostModel>;

/// Registry kind label used in lookup errors.
pub const DISTRIBUTION_KIND: &str = "distribution";

fn boxed<M: CostModel + Default + 'static>() -> Box<dyn CostModel> {
    Box::new(M::default())
}

fn register<M: CostModel + Default + 'static>(registry: &mut DistributionRegistry) -> bool {
    let model = M::default();
    registry.register(model.name(), model.description(), boxed::<M>)
}

/// Registers the six built-in distributions; names already present are kept.
///
/// Returns how many entries were newly added.
pub fn register_builtin_distributions(registry: &mut DistributionRegistry) -> usize {
    [
        register::<CostNormalMean>(registry),
        register::<CostNormalVar>(registry),
        register::<CostNormalMeanVar>(registry),
        register::<CostPoissonRate>(registry),
        register::<CostNegBinomial>(registry),
        register::<CostExponentialRate>(registry),
    ]
    .into_iter()
    .filter(|added| *added)
    .count()
}

/// Fresh registry holding the built-in distributions.
pub fn builtin_distributions() -> DistributionRegistry {
    let mut registry = DistributionRegistry::new(DISTRIBUTION_KIND);
    register_builtin_distributions(&mut registry);
    registry
}
