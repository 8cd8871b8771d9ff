//! IR Operands
//!
//! Value-producing leaves of IR instructions. Every operand carries its own
//! type: load/store selection in the generator is driven by it.

use jmm_types::Type;

/// IR operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Constant with its textual value
    Literal { ty: Type, value: String },
    /// Named binding, resolved to a slot through the method's variable table
    Variable { name: String, ty: Type },
    /// Receiver of an instance method
    This,
}

impl Operand {
    /// Create a literal operand
    pub fn literal(ty: Type, value: impl Into<String>) -> Self {
        Operand::Literal {
            ty,
            value: value.into(),
        }
    }

    /// Integer literal
    pub fn int(value: i32) -> Self {
        Operand::literal(Type::Int32, value.to_string())
    }

    /// Boolean literal, encoded as `1`/`0`
    pub fn boolean(value: bool) -> Self {
        Operand::literal(Type::Boolean, if value { "1" } else { "0" })
    }

    /// Create a variable operand
    pub fn variable(name: impl Into<String>, ty: Type) -> Self {
        Operand::Variable {
            name: name.into(),
            ty,
        }
    }

    /// Declared type of the operand
    pub fn ty(&self) -> Type {
        match self {
            Operand::Literal { ty, .. } | Operand::Variable { ty, .. } => ty.clone(),
            Operand::This => Type::This,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_helpers() {
        assert_eq!(Operand::int(42), Operand::literal(Type::Int32, "42"));
        assert_eq!(Operand::boolean(true), Operand::literal(Type::Boolean, "1"));
        assert_eq!(Operand::boolean(false), Operand::literal(Type::Boolean, "0"));
    }

    #[test]
    fn test_operand_types() {
        assert_eq!(Operand::int(1).ty(), Type::Int32);
        assert_eq!(Operand::variable("s", Type::String).ty(), Type::String);
        assert_eq!(Operand::This.ty(), Type::This);
    }
}
