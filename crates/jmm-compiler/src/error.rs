//! Compilation errors

use jmm_types::{Type, TypeError};
use thiserror::Error;

use crate::ir::BinaryOp;

pub type CompileResult<T> = Result<T, CompileError>;

/// Failure classes of the backend.
///
/// Every kind is fatal for the class unit being translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A type reached a mapping site that has no encoding for it
    UnsupportedType,
    /// An IR node has a shape the generator has no handler for
    UnsupportedInstructionShape,
    /// A variable is missing from the method's variable table
    UnresolvedBinding,
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    UnsupportedType(#[from] TypeError),

    #[error("Unsupported instruction shape: {shape}")]
    UnsupportedInstructionShape { shape: String },

    #[error("Unsupported assignment target type: {ty}")]
    UnsupportedAssignTarget { ty: Type },

    #[error("Unsupported operand type: {ty}")]
    UnsupportedOperandType { ty: Type },

    #[error("Unsupported operator: {op}")]
    UnsupportedOperator { op: BinaryOp },

    #[error("Unresolved binding: {name}")]
    UnresolvedBinding { name: String },

    #[error("Expression produces no value: {context}")]
    MissingValue { context: String },

    #[error("{class}.{method}, instruction {index}: {source}")]
    InMethod {
        class: String,
        method: String,
        index: usize,
        #[source]
        source: Box<CompileError>,
    },

    #[error("{class}.{member}: {source}")]
    InClass {
        class: String,
        member: String,
        #[source]
        source: Box<CompileError>,
    },
}

impl CompileError {
    pub(crate) fn shape(shape: impl Into<String>) -> Self {
        CompileError::UnsupportedInstructionShape {
            shape: shape.into(),
        }
    }

    /// Classify the error, looking through location wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::UnsupportedType(_)
            | CompileError::UnsupportedAssignTarget { .. }
            | CompileError::UnsupportedOperandType { .. } => ErrorKind::UnsupportedType,
            CompileError::UnsupportedInstructionShape { .. }
            | CompileError::UnsupportedOperator { .. }
            | CompileError::MissingValue { .. } => ErrorKind::UnsupportedInstructionShape,
            CompileError::UnresolvedBinding { .. } => ErrorKind::UnresolvedBinding,
            CompileError::InMethod { source, .. } | CompileError::InClass { source, .. } => {
                source.kind()
            }
        }
    }

    /// The innermost error, without location wrappers
    pub fn root(&self) -> &CompileError {
        match self {
            CompileError::InMethod { source, .. } | CompileError::InClass { source, .. } => {
                source.root()
            }
            other => other,
        }
    }
}
