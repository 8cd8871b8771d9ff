//! IR Instructions
//!
//! Three-address code instructions for the IR.

use jmm_types::Type;

use super::value::Operand;

/// IR instruction (Three-Address Code)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrInstr {
    /// Assignment: dest := rhs
    Assign { dest: Operand, rhs: Box<IrInstr> },

    /// A single operand, evaluated on its own
    SingleOp(Operand),

    /// Binary operation: left op right
    BinaryOp {
        op: BinaryOp,
        left: Operand,
        right: Operand,
        ty: Type,
    },

    /// Return from the method, with a value unless `ty` is void
    Return { ty: Type, value: Option<Operand> },

    /// Object allocation or method invocation
    Call {
        kind: CallKind,
        target: Operand,
        method: Option<String>,
        args: Vec<Operand>,
        ret: Type,
    },

    /// Field store: object.field := value
    PutField {
        object: Operand,
        field: String,
        field_ty: Type,
        value: Operand,
    },

    /// Field load: object.field
    GetField {
        object: Operand,
        field: String,
        field_ty: Type,
    },
}

impl IrInstr {
    /// Assignment of `rhs` to `dest`
    pub fn assign(dest: Operand, rhs: IrInstr) -> Self {
        IrInstr::Assign {
            dest,
            rhs: Box::new(rhs),
        }
    }

    /// `ret.V`
    pub fn ret_void() -> Self {
        IrInstr::Return {
            ty: Type::Void,
            value: None,
        }
    }

    /// Return `value` with its own type
    pub fn ret(value: Operand) -> Self {
        IrInstr::Return {
            ty: value.ty(),
            value: Some(value),
        }
    }

    /// Type of the value this instruction leaves behind, if any
    pub fn result_type(&self) -> Option<Type> {
        match self {
            IrInstr::SingleOp(operand) => Some(operand.ty()),
            IrInstr::BinaryOp { ty, .. } => Some(ty.clone()),
            IrInstr::GetField { field_ty, .. } => Some(field_ty.clone()),
            IrInstr::Call { kind, target, ret, .. } => match kind {
                CallKind::New => Some(target.ty()),
                _ if ret.is_void() => None,
                _ => Some(ret.clone()),
            },
            IrInstr::Assign { .. } | IrInstr::Return { .. } | IrInstr::PutField { .. } => None,
        }
    }

    /// Short name of the instruction variant, used in diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            IrInstr::Assign { .. } => "assign",
            IrInstr::SingleOp(_) => "single-op",
            IrInstr::BinaryOp { .. } => "binary-op",
            IrInstr::Return { .. } => "return",
            IrInstr::Call { .. } => "call",
            IrInstr::PutField { .. } => "putfield",
            IrInstr::GetField { .. } => "getfield",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Less,
    And,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Less => "<",
            BinaryOp::And => "&&",
        };
        write!(f, "{}", s)
    }
}

/// Call dispatch classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Object allocation
    New,
    /// Constructor invocation
    InvokeSpecial,
    /// Instance method invocation
    InvokeVirtual,
    /// Class-level method invocation
    InvokeStatic,
}

impl std::fmt::Display for CallKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CallKind::New => "new",
            CallKind::InvokeSpecial => "invokespecial",
            CallKind::InvokeVirtual => "invokevirtual",
            CallKind::InvokeStatic => "invokestatic",
        };
        write!(f, "{}", s)
    }
}
