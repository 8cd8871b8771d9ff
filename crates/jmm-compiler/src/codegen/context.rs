//! Per-method generation state

use crate::ir::{IrMethod, VarTable};

use super::emit::Insn;

/// State for generating one method body.
///
/// Passed explicitly through every emit call and dropped when the method is
/// done, so nothing leaks from one method into the next.
pub(crate) struct MethodContext<'m> {
    /// Enclosing class, used to resolve `this`
    pub class_name: &'m str,
    pub var_table: &'m VarTable,
    code: Vec<Insn>,
    depth: i32,
    max_depth: i32,
}

impl<'m> MethodContext<'m> {
    pub fn new(class_name: &'m str, method: &'m IrMethod) -> Self {
        Self {
            class_name,
            var_table: &method.var_table,
            code: Vec::new(),
            depth: 0,
            max_depth: 0,
        }
    }

    /// Append an instruction and track the stack depth
    pub fn emit(&mut self, insn: Insn) {
        self.depth += insn.stack_effect();
        self.max_depth = self.max_depth.max(self.depth);
        self.code.push(insn);
    }

    /// Deepest operand stack seen so far
    pub fn max_stack(&self) -> u16 {
        u16::try_from(self.max_depth).unwrap_or(u16::MAX)
    }

    pub fn code(&self) -> &[Insn] {
        &self.code
    }
}
