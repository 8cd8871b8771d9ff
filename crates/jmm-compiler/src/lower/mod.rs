//! Typed Tree to IR Lowering
//!
//! Converts typed expression and statement nodes into three-address IR.
//! Each node yields an [`ExprResult`]: the instructions that must run first
//! and the operand holding the value, if the node produces one.

mod expr;
mod stmt;

use rustc_hash::FxHashSet;

use crate::ast::Node;
use crate::error::{CompileError, CompileResult};
use crate::ir::{IrInstr, Operand, PrettyPrint};
use crate::symbols::SymbolTable;

/// Prefix of compiler-generated temporaries
const TEMP_PREFIX: &str = "tmp";

/// Source of fresh temporary names (`tmp0`, `tmp1`, ...)
///
/// Names are never reused within one generator. Names registered as reserved
/// (declared variables of the method) are skipped.
#[derive(Debug, Default)]
pub struct TempGenerator {
    next: u32,
    reserved: FxHashSet<String>,
}

impl TempGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that never yields any of `reserved`
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            next: 0,
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    /// Never yield `name`
    pub fn reserve(&mut self, name: &str) {
        if !self.reserved.contains(name) {
            self.reserved.insert(name.to_string());
        }
    }

    /// Draw the next unused name
    pub fn fresh(&mut self) -> String {
        loop {
            let name = format!("{}{}", TEMP_PREFIX, self.next);
            self.next += 1;
            if !self.reserved.contains(&name) {
                log::debug!("allocated temporary {}", name);
                return name;
            }
        }
    }
}

/// Result of lowering one node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExprResult {
    /// Operand holding the node's value, `None` for statements and void calls
    pub value: Option<Operand>,
    /// Instructions to run before `value` may be used, in order
    pub instrs: Vec<IrInstr>,
}

impl ExprResult {
    /// A value that needs no preceding computation
    pub fn value(value: Operand) -> Self {
        Self {
            value: Some(value),
            instrs: Vec::new(),
        }
    }

    /// Instructions with no resulting value
    pub fn effect(instrs: Vec<IrInstr>) -> Self {
        Self {
            value: None,
            instrs,
        }
    }

    /// Textual form of the result operand, empty when there is none
    pub fn code(&self) -> CompileResult<String> {
        match &self.value {
            Some(value) => Ok(value.pretty_print()?),
            None => Ok(String::new()),
        }
    }

    /// Textual form of the computation, one statement per line
    pub fn computation(&self) -> CompileResult<String> {
        let mut out = String::new();
        for instr in &self.instrs {
            out.push_str(&instr.pretty_print()?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Lowers typed nodes of one method body
pub struct Lowerer<'a> {
    symbols: &'a SymbolTable,
    temps: TempGenerator,
}

impl<'a> Lowerer<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self::with_temps(symbols, TempGenerator::new())
    }

    /// Lowerer drawing temporaries from a pre-seeded generator
    pub fn with_temps(symbols: &'a SymbolTable, temps: TempGenerator) -> Self {
        Self { symbols, temps }
    }

    /// Lower a single node.
    ///
    /// Only names reserved in the generator are avoided; use
    /// [`Lowerer::lower_body`] to reserve the node's own variables.
    pub fn lower(&mut self, node: &Node) -> CompileResult<ExprResult> {
        match node {
            Node::IntLiteral { .. }
            | Node::BoolLiteral { .. }
            | Node::VarRef { .. }
            | Node::This
            | Node::Binary { .. }
            | Node::MethodCall { .. } => self.lower_expr(node),
            Node::Assign { .. } | Node::Return { .. } | Node::Block { .. } => {
                self.lower_stmt(node)
            }
        }
    }

    /// Lower `node`, append its computation to `instrs` and return its value
    fn lower_operand(
        &mut self,
        node: &Node,
        context: &str,
        instrs: &mut Vec<IrInstr>,
    ) -> CompileResult<Operand> {
        let result = self.lower(node)?;
        instrs.extend(result.instrs);
        result.value.ok_or_else(|| CompileError::MissingValue {
            context: context.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jmm_types::Type;

    #[test]
    fn test_temps_are_sequential() {
        let mut temps = TempGenerator::new();
        assert_eq!(temps.fresh(), "tmp0");
        assert_eq!(temps.fresh(), "tmp1");
        assert_eq!(temps.fresh(), "tmp2");
    }

    #[test]
    fn test_temps_skip_reserved_names() {
        let mut temps = TempGenerator::with_reserved(["tmp0", "tmp2"]);
        assert_eq!(temps.fresh(), "tmp1");
        assert_eq!(temps.fresh(), "tmp3");
    }

    #[test]
    fn test_reserve_after_creation() {
        let mut temps = TempGenerator::new();
        temps.reserve("tmp0");
        temps.reserve("tmp0");
        assert_eq!(temps.fresh(), "tmp1");
    }

    #[test]
    fn test_literal_has_no_computation() {
        let symbols = SymbolTable::new("Foo");
        let mut lowerer = Lowerer::new(&symbols);

        let result = lowerer.lower(&Node::int(7)).unwrap();
        assert_eq!(result.code().unwrap(), "7.i32");
        assert_eq!(result.computation().unwrap(), "");

        let result = lowerer.lower(&Node::boolean(false)).unwrap();
        assert_eq!(result.value, Some(Operand::literal(Type::Boolean, "0")));
    }

    #[test]
    fn test_this_lowers_to_receiver() {
        let symbols = SymbolTable::new("Foo");
        let result = Lowerer::new(&symbols).lower(&Node::This).unwrap();
        assert_eq!(result.value, Some(Operand::This));
        assert!(result.instrs.is_empty());
    }
}
