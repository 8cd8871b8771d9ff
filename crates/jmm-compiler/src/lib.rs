//! Java-- Compiler Backend
//!
//! Lowers the typed source tree into three-address IR and generates Jasmin
//! assembly from IR class units.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod lower;
pub mod options;
pub mod symbols;

pub use codegen::{compile_classes, JasminGenerator};
pub use error::{CompileError, CompileResult, ErrorKind};
pub use lower::{ExprResult, Lowerer, TempGenerator};
pub use options::{CodegenOptions, Limits};
pub use symbols::{MethodSignature, SymbolTable};

pub use jmm_types::{Position, Type, TypeError};

use ir::IrClass;

/// Generate the Jasmin text of one class unit
pub fn compile(class: &IrClass, options: &CodegenOptions) -> CompileResult<String> {
    JasminGenerator::new(options.clone()).generate(class)
}
