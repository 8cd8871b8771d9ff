//! Java-- Type System
//!
//! Semantic types as produced by the type checker, and their two textual
//! encodings: the IR type suffix and the JVM descriptor.

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod ty;

pub use descriptor::{
    call_descriptor, descriptor, internal_name, ir_suffix, method_descriptor, Position,
};
pub use error::TypeError;
pub use ty::Type;
