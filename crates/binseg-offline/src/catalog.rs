// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::binseg::BinSeg;
use binseg_core::{ExecutionContext, Registry, Result, ResultTable, SegmentationParams};
use binseg_costs::{CostModel, DistributionRegistry, builtin_distributions};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// A segmentation strategy driven by a [`CostModel`].
///
/// Implementations keep no state between calls, so one instance may serve
/// concurrent callers.
pub trait SegmentationAlgorithm: fmt::Debug + Send + Sync {
    /// Registry name, e.g. `BS`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Leading result-table columns written before the distribution's parameters.
    fn field_names(&self) -> &'static [&'static str];

    fn segment(
        &self,
        values: &[f64],
        model: &dyn CostModel,
        params: &SegmentationParams,
        ctx: &ExecutionContext<'_>,
    ) -> Result<ResultTable>;
}

/// Registry of segmentation algorithms keyed by name.
pub type AlgorithmRegistry = Registry<dyn SegmentationAlgorithm>;

/// Registry kind label used in lookup errors.
pub const ALGORITHM_KIND: &str = "algorithm";

fn binseg() -> Box<dyn SegmentationAlgorithm> {
    Box::new(BinSeg::new())
}

/// Registers the built-in algorithms; names already present are kept.
///
/// Returns how many entries were newly added.
pub fn register_builtin_algorithms(registry: &mut AlgorithmRegistry) -> usize {
    let algorithm = binseg();
    usize::from(registry.register(algorithm.name(), algorithm.description(), binseg))
}

/// The algorithm and distribution registries a segmentation call resolves
/// names against.
#[derive(Clone, Debug)]
pub struct Catalog {
    algorithms: AlgorithmRegistry,
    distributions: DistributionRegistry,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Catalog with no registered entries.
    pub fn empty() -> Self {
        Self {
            algorithms: AlgorithmRegistry::new(ALGORITHM_KIND),
            distributions: DistributionRegistry::new(binseg_costs::DISTRIBUTION_KIND),
        }
    }

    /// Catalog holding every built-in algorithm and distribution.
    pub fn builtin() -> Self {
        let mut algorithms = AlgorithmRegistry::new(ALGORITHM_KIND);
        register_builtin_algorithms(&mut algorithms);
        let catalog = Self {
            algorithms,
            distributions: builtin_distributions(),
        };
        debug!(
            algorithms = catalog.algorithms.len(),
            distributions = catalog.distributions.len(),
            "built-in catalog initialised"
        );
        catalog
    }

    /// Process-wide built-in catalog, initialised on first use.
    pub fn global() -> &'static Catalog {
        static GLOBAL: OnceLock<Catalog> = OnceLock::new();
        GLOBAL.get_or_init(Catalog::builtin)
    }

    pub fn algorithms(&self) -> &AlgorithmRegistry {
        &self.algorithms
    }

    pub fn algorithms_mut(&mut self) -> &mut AlgorithmRegistry {
        &mut self.algorithms
    }

    pub fn distributions(&self) -> &DistributionRegistry {
        &self.distributions
    }

    pub fn distributions_mut(&mut self) -> &mut DistributionRegistry {
        &mut self.distributions
    }

    /// Runs `algorithm` with `distribution` on `values`.
    pub fn segment(
        &self,
        values: &[f64],
        algorithm: &str,
        distribution: &str,
        num_changepoints: usize,
        min_segment_len: usize,
    ) -> Result<ResultTable> {
        self.segment_with_context(
            values,
            algorithm,
            distribution,
            &SegmentationParams::new(num_changepoints, min_segment_len),
            &ExecutionContext::new(),
        )
    }

    /// Like [`Catalog::segment`] with explicit parameters and execution context.
    pub fn segment_with_context(
        &self,
        values: &[f64],
        algorithm: &str,
        distribution: &str,
        params: &SegmentationParams,
        ctx: &ExecutionContext<'_>,
    ) -> Result<ResultTable> {
        let algorithm = self.algorithms.create(algorithm)?;
        let model = self.distributions.create(distribution)?;
        algorithm.segment(values, model.as_ref(), params, ctx)
    }

    /// Name to description of every registered distribution.
    pub fn list_distributions(&self) -> BTreeMap<String, String> {
        self.distributions.list_registered()
    }

    /// Name to description of every registered algorithm.
    pub fn list_algorithms(&self) -> BTreeMap<String, String> {
        self.algorithms.list_registered()
    }
}

/// Segments `values` against the global built-in catalog.
pub fn segment(
    values: &[f64],
    algorithm: &str,
    distribution: &str,
    num_changepoints: usize,
    min_segment_len: usize,
) -> Result<ResultTable> {
    Catalog::global().segment(
        values,
        algorithm,
        distribution,
        num_changepoints,
        min_segment_len,
    )
}

pub fn list_distributions() -> BTreeMap<String, String> {
    Catalog::global().list_distributions()
}

pub fn list_algorithms() -> BTreeMap<String, String> {
    Catalog::global().list_algorithms()
}
