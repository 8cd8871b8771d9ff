//! Typed source tree
//!
//! The tree handed over by the type checker. Every expression node already
//! carries its resolved type; lowering never re-infers one.

use jmm_types::Type;

use crate::ir::BinaryOp;

/// Binary operators of the source language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    LessThan,
    And,
}

impl BinaryOperator {
    /// The IR operator this lowers to
    pub fn to_ir(self) -> BinaryOp {
        match self {
            BinaryOperator::Add => BinaryOp::Add,
            BinaryOperator::Subtract => BinaryOp::Sub,
            BinaryOperator::Multiply => BinaryOp::Mul,
            BinaryOperator::Divide => BinaryOp::Div,
            BinaryOperator::LessThan => BinaryOp::Less,
            BinaryOperator::And => BinaryOp::And,
        }
    }
}

/// A typed expression or statement node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Integer literal
    IntLiteral { value: i32 },

    /// `true` / `false`
    BoolLiteral { value: bool },

    /// Reference to a named binding, typed by the checker
    VarRef { name: String, ty: Type },

    /// The receiver of the enclosing instance method
    This,

    /// `left op right`, `ty` is the type of the whole expression
    Binary {
        op: BinaryOperator,
        left: Box<Node>,
        right: Box<Node>,
        ty: Type,
    },

    /// `receiver.method(args...)`
    MethodCall {
        receiver: Box<Node>,
        method: String,
        args: Vec<Node>,
    },

    /// `name = value;`
    Assign {
        name: String,
        ty: Type,
        value: Box<Node>,
    },

    /// `return value;` with the enclosing method's return type
    Return { value: Option<Box<Node>>, ty: Type },

    /// Statement block and other purely structural nodes
    Block { children: Vec<Node> },
}

impl Node {
    pub fn int(value: i32) -> Self {
        Node::IntLiteral { value }
    }

    pub fn boolean(value: bool) -> Self {
        Node::BoolLiteral { value }
    }

    pub fn var(name: impl Into<String>, ty: Type) -> Self {
        Node::VarRef {
            name: name.into(),
            ty,
        }
    }

    pub fn binary(op: BinaryOperator, left: Node, right: Node, ty: Type) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty,
        }
    }

    pub fn call(receiver: Node, method: impl Into<String>, args: Vec<Node>) -> Self {
        Node::MethodCall {
            receiver: Box::new(receiver),
            method: method.into(),
            args,
        }
    }

    pub fn assign(name: impl Into<String>, ty: Type, value: Node) -> Self {
        Node::Assign {
            name: name.into(),
            ty,
            value: Box::new(value),
        }
    }

    pub fn ret(value: Option<Node>, ty: Type) -> Self {
        Node::Return {
            value: value.map(Box::new),
            ty,
        }
    }

    pub fn block(children: Vec<Node>) -> Self {
        Node::Block { children }
    }
}
