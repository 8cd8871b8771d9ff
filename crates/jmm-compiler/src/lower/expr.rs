//! Expression lowering

use jmm_types::Type;

use super::{ExprResult, Lowerer};
use crate::ast::{BinaryOperator, Node};
use crate::error::{CompileError, CompileResult};
use crate::ir::{CallKind, IrInstr, Operand};

impl<'a> Lowerer<'a> {
    pub(super) fn lower_expr(&mut self, node: &Node) -> CompileResult<ExprResult> {
        match node {
            Node::IntLiteral { value } => Ok(ExprResult::value(Operand::int(*value))),
            Node::BoolLiteral { value } => Ok(ExprResult::value(Operand::boolean(*value))),
            Node::VarRef { name, ty } => {
                Ok(ExprResult::value(Operand::variable(name.clone(), ty.clone())))
            }
            Node::This => Ok(ExprResult::value(Operand::This)),
            Node::Binary {
                op,
                left,
                right,
                ty,
            } => self.lower_binary(*op, left, right, ty),
            Node::MethodCall {
                receiver,
                method,
                args,
            } => self.lower_call(receiver, method, args),
            _ => Err(CompileError::shape(format!("{:?} in expression position", node))),
        }
    }

    fn lower_binary(
        &mut self,
        op: BinaryOperator,
        left: &Node,
        right: &Node,
        ty: &Type,
    ) -> CompileResult<ExprResult> {
        let mut instrs = Vec::new();
        let left = self.lower_operand(left, "left operand", &mut instrs)?;
        let right = self.lower_operand(right, "right operand", &mut instrs)?;

        let dest = Operand::variable(self.temps.fresh(), ty.clone());
        instrs.push(IrInstr::assign(
            dest.clone(),
            IrInstr::BinaryOp {
                op: op.to_ir(),
                left,
                right,
                ty: ty.clone(),
            },
        ));

        Ok(ExprResult {
            value: Some(dest),
            instrs,
        })
    }

    fn lower_call(
        &mut self,
        receiver: &Node,
        method: &str,
        args: &[Node],
    ) -> CompileResult<ExprResult> {
        let mut instrs = Vec::new();

        let (kind, target) = match self.static_receiver(receiver) {
            Some(path) => {
                let ty = Type::class(path.clone());
                (CallKind::InvokeStatic, Operand::variable(path, ty))
            }
            None => {
                let target = self.lower_operand(receiver, "call receiver", &mut instrs)?;
                (CallKind::InvokeVirtual, target)
            }
        };

        let mut operands = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            let context = format!("argument {} of `{}`", i, method);
            operands.push(self.lower_operand(arg, &context, &mut instrs)?);
        }

        let ret = match self.symbols.return_type(method) {
            Some(ty) => ty.clone(),
            None => {
                log::warn!("unknown callee `{}`, assuming void return", method);
                Type::Void
            }
        };

        let call = IrInstr::Call {
            kind,
            target,
            method: Some(method.to_string()),
            args: operands,
            ret: ret.clone(),
        };

        if ret.is_void() {
            instrs.push(call);
            return Ok(ExprResult::effect(instrs));
        }

        let dest = Operand::variable(self.temps.fresh(), ret);
        instrs.push(IrInstr::assign(dest.clone(), call));
        Ok(ExprResult {
            value: Some(dest),
            instrs,
        })
    }

    /// Import path when the receiver names an imported class
    fn static_receiver(&self, receiver: &Node) -> Option<String> {
        match receiver {
            Node::VarRef { name, .. } => self.symbols.resolve_import(name).map(str::to_string),
            _ => None,
        }
    }
}
