pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod logging;
pub mod merge;
pub mod pipeline;
pub mod source;
pub mod tools;

pub use config::{ConfigError, LayerKind, LayerSpec, MapConfig};
pub use context::{FailurePolicy, RunContext};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunReport};
