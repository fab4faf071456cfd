//! External utilities: `ogr2ogr` for format conversion and clipping,
//! `topojson` for topology encoding.
//!
//! Commands are built as argv lists and run without a shell, so filter
//! expressions and paths reach the utility exactly as configured.

mod args;
mod process;

pub use args::{clip_extent, merge, ogr2ogr, topojson};
pub use process::ProcessRunner;

use std::ffi::OsString;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Ogr2ogr,
    Topojson,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Ogr2ogr => "ogr2ogr",
            Tool::Topojson => "topojson",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One fully built command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    /// Executable name or path.
    pub program: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Arguments as UTF-8 (lossy), for logging and assertions.
    pub fn arg_strings(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.arg_strings() {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// What a finished utility reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// Exit code; `None` if killed by a signal.
    pub code: Option<i32>,
    pub stderr: String,
}

/// A utility that exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolFailure {
    pub tool: Tool,
    /// Layer being processed; `None` for the merge pass.
    pub layer: Option<String>,
    pub code: Option<i32>,
    pub stderr: String,
}

impl fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.tool)?;
        match &self.layer {
            Some(layer) => write!(f, " for layer `{}`", layer)?,
            None => write!(f, " while merging")?,
        }
        match self.code {
            Some(code) => write!(f, " (exit {})", code)?,
            None => write!(f, " (terminated by signal)")?,
        }
        if let Some(line) = self.stderr.lines().find(|l| !l.trim().is_empty()) {
            write!(f, ": {}", line.trim())?;
        }
        Ok(())
    }
}

/// Runs external utilities. Blocks until the utility exits.
pub trait ToolRunner {
    /// `Err` only when the program could not be started.
    fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutput>;
}
