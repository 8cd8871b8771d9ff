//! Intermediate Representation (IR)
//!
//! A linear, typed three-address IR. Classes own fields and methods, methods
//! own a flat instruction sequence; instructions only nest through the
//! right-hand side of an assignment.

pub mod class;
pub mod instr;
pub mod pretty;
pub mod value;
pub mod var_table;

pub use class::{AccessModifier, IrClass, IrField, IrMethod, Param};
pub use instr::{BinaryOp, CallKind, IrInstr};
pub use pretty::PrettyPrint;
pub use value::Operand;
pub use var_table::{VarEntry, VarTable};
