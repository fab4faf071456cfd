//! Summary of a finished run.

use std::path::PathBuf;

use crate::convert::LayerOutcome;
use crate::tools::ToolFailure;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Layers in processing order.
    pub layers: Vec<LayerOutcome>,
    pub merge_failure: Option<ToolFailure>,
    pub output: PathBuf,
}

impl RunReport {
    /// Every recorded utility failure, layers first, then the merge.
    pub fn failures(&self) -> impl Iterator<Item = &ToolFailure> {
        self.layers
            .iter()
            .flat_map(|l| l.failures.iter())
            .chain(self.merge_failure.iter())
    }

    /// True when every utility exited successfully.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}
