// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::catalog::Catalog;
use binseg_core::{
    BinSegError, ExecutionContext, ReproMode, Result, ResultTable, SegmentationParams,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current request schema version.
pub const REQUEST_SCHEMA_VERSION: u32 = 1;

pub type UnknownFields = Map<String, Value>;

/// Wire format for versioned segmentation requests.
///
/// Fields this version does not know are kept in `unknown_fields` and
/// round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentationRequest {
    pub schema_version: u32,
    pub algorithm: String,
    pub distribution: String,
    pub num_changepoints: usize,
    #[serde(default = "default_min_segment_len")]
    pub min_segment_len: usize,
    #[serde(default)]
    pub repro_mode: ReproMode,
    #[serde(default, flatten)]
    pub unknown_fields: UnknownFields,
}

fn default_min_segment_len() -> usize {
    SegmentationParams::default().min_segment_len
}

impl SegmentationRequest {
    pub fn new(
        algorithm: impl Into<String>,
        distribution: impl Into<String>,
        params: SegmentationParams,
    ) -> Self {
        Self {
            schema_version: REQUEST_SCHEMA_VERSION,
            algorithm: algorithm.into(),
            distribution: distribution.into(),
            num_changepoints: params.num_changepoints,
            min_segment_len: params.min_segment_len,
            repro_mode: ReproMode::default(),
            unknown_fields: UnknownFields::new(),
        }
    }

    /// Parses and schema-checks a JSON request.
    pub fn from_json(raw: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(raw).map_err(|err| {
            BinSegError::configuration(format!("malformed segmentation request: {err}"))
        })?;
        request.validate_schema()?;
        Ok(request)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| {
            BinSegError::configuration(format!("segmentation request is not serializable: {err}"))
        })
    }

    pub fn validate_schema(&self) -> Result<()> {
        if (1..=REQUEST_SCHEMA_VERSION).contains(&self.schema_version) {
            return Ok(());
        }
        Err(BinSegError::configuration(format!(
            "unsupported SegmentationRequest schema_version={}; this build reads versions 1..={REQUEST_SCHEMA_VERSION}",
            self.schema_version
        )))
    }

    pub fn params(&self) -> SegmentationParams {
        SegmentationParams::new(self.num_changepoints, self.min_segment_len)
    }
}

impl Catalog {
    /// Executes a wire request against this catalog.
    pub fn run_request(&self, values: &[f64], request: &SegmentationRequest) -> Result<ResultTable> {
        request.validate_schema()?;
        let ctx = ExecutionContext::new().with_repro_mode(request.repro_mode);
        self.segment_with_context(
            values,
            &request.algorithm,
            &request.distribution,
            &request.params(),
            &ctx,
        )
    }
}
