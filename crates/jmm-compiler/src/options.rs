//! Code generation options

use serde::{Deserialize, Serialize};

/// How `.limit stack` and `.limit locals` are produced for each method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Limits {
    /// Emit the same bounds for every method
    Fixed { stack: u16, locals: u16 },
    /// Derive the bounds from the emitted code and the variable table
    Computed,
}

impl Default for Limits {
    fn default() -> Self {
        Limits::Fixed {
            stack: 99,
            locals: 99,
        }
    }
}

/// Options controlling the generated assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    /// Operand-stack and locals limits
    pub limits: Limits,
    /// One indentation level inside method bodies
    pub indent: String,
    /// Superclass used when a class declares none
    pub default_super: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            indent: "    ".to_string(),
            default_super: "java/lang/Object".to_string(),
        }
    }
}

impl CodegenOptions {
    /// Default options with computed limits
    pub fn computed_limits() -> Self {
        Self {
            limits: Limits::Computed,
            ..Self::default()
        }
    }
}
