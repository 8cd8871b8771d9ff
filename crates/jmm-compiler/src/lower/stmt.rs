//! Statement lowering

use super::{ExprResult, Lowerer, TempGenerator};
use crate::ast::Node;
use crate::error::{CompileError, CompileResult};
use crate::ir::{IrInstr, Operand};

impl<'a> Lowerer<'a> {
    pub(super) fn lower_stmt(&mut self, node: &Node) -> CompileResult<ExprResult> {
        let mut instrs = Vec::new();
        match node {
            Node::Assign { name, ty, value } => {
                let context = format!("assignment to `{}`", name);
                let value = self.lower_operand(value, &context, &mut instrs)?;
                instrs.push(IrInstr::assign(
                    Operand::variable(name.clone(), ty.clone()),
                    IrInstr::SingleOp(value),
                ));
            }
            Node::Return { value, ty } => {
                let value = match value {
                    // Evaluated for its effect only
                    Some(value) if ty.is_void() => {
                        instrs.extend(self.lower(value)?.instrs);
                        None
                    }
                    Some(value) => Some(self.lower_operand(value, "return value", &mut instrs)?),
                    None => None,
                };
                instrs.push(IrInstr::Return {
                    ty: ty.clone(),
                    value,
                });
            }
            Node::Block { children } => {
                for child in children {
                    instrs.extend(self.lower(child)?.instrs);
                }
            }
            _ => return Err(CompileError::shape(format!("{:?} in statement position", node))),
        }
        Ok(ExprResult::effect(instrs))
    }

    /// Lower a method body into its flat instruction sequence.
    ///
    /// Every variable name used in the body is reserved first, so no
    /// temporary shadows a source variable.
    pub fn lower_body(&mut self, body: &[Node]) -> CompileResult<Vec<IrInstr>> {
        for node in body {
            reserve_names(&mut self.temps, node);
        }

        let mut instrs = Vec::new();
        for node in body {
            instrs.extend(self.lower(node)?.instrs);
        }
        Ok(instrs)
    }
}

fn reserve_names(temps: &mut TempGenerator, node: &Node) {
    match node {
        Node::VarRef { name, .. } => temps.reserve(name),
        Node::Assign { name, value, .. } => {
            temps.reserve(name);
            reserve_names(temps, value);
        }
        Node::Binary { left, right, .. } => {
            reserve_names(temps, left);
            reserve_names(temps, right);
        }
        Node::MethodCall { receiver, args, .. } => {
            reserve_names(temps, receiver);
            for arg in args {
                reserve_names(temps, arg);
            }
        }
        Node::Return { value, .. } => {
            if let Some(value) = value {
                reserve_names(temps, value);
            }
        }
        Node::Block { children } => {
            for child in children {
                reserve_names(temps, child);
            }
        }
        Node::IntLiteral { .. } | Node::BoolLiteral { .. } | Node::This => {}
    }
}
