//! Jasmin Code Generation
//!
//! Translates IR class units into Jasmin assembly text. Each instruction is
//! dispatched on its variant; per-method state lives in a [`MethodContext`]
//! that is created for the method and dropped with it.

mod context;
mod emit;

pub use emit::Insn;

use std::fmt::Write;

use jmm_types::{call_descriptor, descriptor, internal_name, method_descriptor, Position, Type};

use crate::error::{CompileError, CompileResult};
use crate::ir::pretty::modifiers;
use crate::ir::{BinaryOp, CallKind, IrClass, IrField, IrInstr, IrMethod, Operand};
use crate::options::{CodegenOptions, Limits};
use context::MethodContext;

/// Generates Jasmin assembly for class units
#[derive(Debug, Clone, Default)]
pub struct JasminGenerator {
    options: CodegenOptions,
}

impl JasminGenerator {
    pub fn new(options: CodegenOptions) -> Self {
        Self { options }
    }

    /// Generate the assembly of one class.
    ///
    /// The first failing field or method aborts the whole class; no partial
    /// text is returned.
    pub fn generate(&self, class: &IrClass) -> CompileResult<String> {
        log::debug!(
            "generating class {} ({} fields, {} methods)",
            class.name,
            class.fields.len(),
            class.methods.len()
        );

        let mut out = String::from(".class ");
        if let Some(access) = class.access.keyword() {
            write!(out, "{} ", access).unwrap();
        }
        writeln!(out, "{}", class.name.replace('.', "/")).unwrap();

        let super_class = self.super_name(class);
        writeln!(out, ".super {}", super_class).unwrap();
        writeln!(out).unwrap();

        for field in &class.fields {
            let line = field_line(field).map_err(|e| in_class(class, &field.name, e))?;
            writeln!(out, "{}", line).unwrap();
        }
        if !class.fields.is_empty() {
            writeln!(out).unwrap();
        }

        self.default_constructor(&mut out, &super_class);

        for method in class.generated_methods() {
            writeln!(out).unwrap();
            out.push_str(&self.method(class, method)?);
        }

        Ok(out)
    }

    fn super_name(&self, class: &IrClass) -> String {
        match &class.super_class {
            Some(name) => name.replace('.', "/"),
            None => self.options.default_super.clone(),
        }
    }

    fn default_constructor(&self, out: &mut String, super_class: &str) {
        let indent = &self.options.indent;
        writeln!(out, "; default constructor").unwrap();
        writeln!(out, ".method public <init>()V").unwrap();
        writeln!(out, "{}aload_0", indent).unwrap();
        writeln!(out, "{}invokespecial {}/<init>()V", indent, super_class).unwrap();
        writeln!(out, "{}return", indent).unwrap();
        writeln!(out, ".end method").unwrap();
    }

    fn method(&self, class: &IrClass, method: &IrMethod) -> CompileResult<String> {
        log::debug!(
            "generating method {}.{} ({} instructions)",
            class.name,
            method.name,
            method.instructions.len()
        );

        let header = method_header(class, method).map_err(|e| in_class(class, &method.name, e))?;

        let mut ctx = MethodContext::new(&class.name, method);
        for (index, instr) in method.instructions.iter().enumerate() {
            emit_statement(&mut ctx, instr).map_err(|source| CompileError::InMethod {
                class: class.name.clone(),
                method: method.name.clone(),
                index,
                source: Box::new(source),
            })?;
        }
        // Void bodies may end without an explicit `ret.V`
        let ends_in_return = matches!(method.instructions.last(), Some(IrInstr::Return { .. }));
        if method.return_ty.is_void() && !ends_in_return {
            ctx.emit(Insn::Return);
        }

        let (stack, locals) = match self.options.limits {
            Limits::Fixed { stack, locals } => (stack, locals),
            Limits::Computed => (ctx.max_stack(), locals_count(method)),
        };

        let indent = &self.options.indent;
        let mut out = String::new();
        writeln!(out, "{}", header).unwrap();
        writeln!(out, "{}.limit stack {}", indent, stack).unwrap();
        writeln!(out, "{}.limit locals {}", indent, locals).unwrap();
        for insn in ctx.code() {
            writeln!(out, "{}{}", indent, insn).unwrap();
        }
        writeln!(out, ".end method").unwrap();
        Ok(out)
    }
}

/// Generate several independent classes, stopping at the first failure
pub fn compile_classes(
    classes: &[IrClass],
    options: &CodegenOptions,
) -> CompileResult<Vec<String>> {
    let generator = JasminGenerator::new(options.clone());
    classes.iter().map(|class| generator.generate(class)).collect()
}

fn in_class(class: &IrClass, member: &str, source: CompileError) -> CompileError {
    CompileError::InClass {
        class: class.name.clone(),
        member: member.to_string(),
        source: Box::new(source),
    }
}

fn field_line(field: &IrField) -> CompileResult<String> {
    let mut out = String::from(".field ");
    modifiers(&mut out, field.access.keyword(), field.is_static, field.is_final);
    write!(out, "{} {}", field.name, descriptor(&field.ty, Position::Field)?).unwrap();
    Ok(out)
}

fn method_header(class: &IrClass, method: &IrMethod) -> CompileResult<String> {
    let params: Vec<Type> = method
        .params
        .iter()
        .map(|param| param.ty.resolve_this(&class.name))
        .collect();
    let ret = method.return_ty.resolve_this(&class.name);

    let mut out = String::from(".method ");
    modifiers(&mut out, method.access.keyword(), method.is_static, method.is_final);
    write!(out, "{}{}", method.name, method_descriptor(&params, &ret)?).unwrap();
    Ok(out)
}

/// Local slots the method needs: every table slot, and never fewer than the
/// parameter frame
fn locals_count(method: &IrMethod) -> u16 {
    let table = method.var_table.max_slot().map_or(0, |slot| slot + 1);
    table.max(method.param_frame_size())
}

/// Emit an instruction in statement position
fn emit_statement(ctx: &mut MethodContext<'_>, instr: &IrInstr) -> CompileResult<()> {
    match instr {
        IrInstr::Assign { dest, rhs } => emit_assign(ctx, dest, rhs),
        IrInstr::SingleOp(operand) => emit_load(ctx, operand),
        IrInstr::Return { ty, value } => emit_return(ctx, ty, value.as_ref()),
        IrInstr::Call {
            kind: CallKind::New,
            ..
        } => Err(CompileError::shape("allocation whose result is discarded")),
        IrInstr::Call {
            kind,
            target,
            method,
            args,
            ret,
        } => {
            emit_call(ctx, *kind, target, method.as_deref(), args, ret)?;
            if !ret.is_void() {
                ctx.emit(Insn::Pop);
            }
            Ok(())
        }
        IrInstr::PutField {
            object,
            field,
            field_ty,
            value,
        } => emit_put_field(ctx, object, field, field_ty, value),
        IrInstr::BinaryOp { .. } | IrInstr::GetField { .. } => Err(CompileError::shape(
            format!("{} outside of an assignment", instr.shape()),
        )),
    }
}

/// Emit an instruction that leaves exactly one value on the stack
fn emit_value(ctx: &mut MethodContext<'_>, instr: &IrInstr) -> CompileResult<()> {
    match instr {
        IrInstr::SingleOp(operand) => emit_load(ctx, operand),
        IrInstr::BinaryOp {
            op,
            left,
            right,
            ..
        } => emit_binary(ctx, *op, left, right),
        IrInstr::Call {
            kind,
            target,
            method,
            args,
            ret,
        } => {
            if instr.result_type().is_none() {
                return Err(CompileError::shape("void call used as a value"));
            }
            emit_call(ctx, *kind, target, method.as_deref(), args, ret)
        }
        IrInstr::GetField {
            object,
            field,
            field_ty,
        } => {
            emit_load(ctx, object)?;
            let owner = owner_of(ctx, object)?;
            ctx.emit(Insn::GetField {
                owner,
                name: field.clone(),
                descriptor: descriptor(field_ty, Position::Field)?,
            });
            Ok(())
        }
        IrInstr::Assign { .. } | IrInstr::Return { .. } | IrInstr::PutField { .. } => Err(
            CompileError::shape(format!("{} as an assigned value", instr.shape())),
        ),
    }
}

fn emit_assign(ctx: &mut MethodContext<'_>, dest: &Operand, rhs: &IrInstr) -> CompileResult<()> {
    let (name, ty) = match dest {
        Operand::Variable { name, ty } => (name, ty),
        _ => return Err(CompileError::shape("assignment to a non-variable target")),
    };

    emit_value(ctx, rhs)?;

    let slot = slot_of(ctx, name)?;
    let store = match ty {
        Type::Int32 | Type::Boolean => Insn::IStore(slot),
        Type::String | Type::ClassRef(_) | Type::ArrayOf(_) => Insn::AStore(slot),
        Type::Void | Type::This => {
            return Err(CompileError::UnsupportedAssignTarget { ty: ty.clone() })
        }
    };
    ctx.emit(store);
    Ok(())
}

fn emit_load(ctx: &mut MethodContext<'_>, operand: &Operand) -> CompileResult<()> {
    match operand {
        Operand::Literal { ty, value } => {
            if ty.is_void() {
                return Err(CompileError::UnsupportedOperandType { ty: ty.clone() });
            }
            ctx.emit(Insn::Ldc(value.clone()));
        }
        Operand::This
        | Operand::Variable {
            ty: Type::This, ..
        } => ctx.emit(Insn::ALoad(0)),
        Operand::Variable { name, ty } => {
            let slot = slot_of(ctx, name)?;
            let load = if ty.is_integer_like() {
                Insn::ILoad(slot)
            } else if ty.is_reference() {
                Insn::ALoad(slot)
            } else {
                return Err(CompileError::UnsupportedOperandType { ty: ty.clone() });
            };
            ctx.emit(load);
        }
    }
    Ok(())
}

fn emit_binary(
    ctx: &mut MethodContext<'_>,
    op: BinaryOp,
    left: &Operand,
    right: &Operand,
) -> CompileResult<()> {
    let insn = match op {
        BinaryOp::Add => Insn::IAdd,
        BinaryOp::Sub => Insn::ISub,
        BinaryOp::Mul => Insn::IMul,
        BinaryOp::Div => Insn::IDiv,
        BinaryOp::And => Insn::IAnd,
        BinaryOp::Less => return Err(CompileError::UnsupportedOperator { op }),
    };
    emit_load(ctx, left)?;
    emit_load(ctx, right)?;
    ctx.emit(insn);
    Ok(())
}

fn emit_return(
    ctx: &mut MethodContext<'_>,
    ty: &Type,
    value: Option<&Operand>,
) -> CompileResult<()> {
    if ty.is_void() {
        ctx.emit(Insn::Return);
        return Ok(());
    }

    let value = value.ok_or_else(|| CompileError::MissingValue {
        context: format!("return of {}", ty),
    })?;
    emit_load(ctx, value)?;

    if ty.is_integer_like() {
        ctx.emit(Insn::IReturn);
    } else {
        ctx.emit(Insn::AReturn);
    }
    Ok(())
}

fn emit_call(
    ctx: &mut MethodContext<'_>,
    kind: CallKind,
    target: &Operand,
    method: Option<&str>,
    args: &[Operand],
    ret: &Type,
) -> CompileResult<()> {
    let owner = owner_of(ctx, target)?;

    let (name, has_receiver) = match kind {
        CallKind::New => {
            ctx.emit(Insn::New(owner));
            ctx.emit(Insn::Dup);
            return Ok(());
        }
        // Consumes the copy left by `dup` after the allocation
        CallKind::InvokeSpecial => ("<init>".to_string(), true),
        CallKind::InvokeVirtual => {
            let name = method_name(kind, method)?;
            emit_load(ctx, target)?;
            (name, true)
        }
        CallKind::InvokeStatic => (method_name(kind, method)?, false),
    };

    let arg_types: Vec<Type> = args
        .iter()
        .map(|arg| arg.ty().resolve_this(ctx.class_name))
        .collect();
    let descriptor = call_descriptor(&arg_types, &ret.resolve_this(ctx.class_name))?;

    for arg in args {
        emit_load(ctx, arg)?;
    }

    ctx.emit(Insn::Invoke {
        kind,
        owner,
        name,
        descriptor,
        arg_count: args.len(),
        has_receiver,
        returns_value: !ret.is_void(),
    });
    Ok(())
}

fn method_name(kind: CallKind, method: Option<&str>) -> CompileResult<String> {
    method
        .map(str::to_string)
        .ok_or_else(|| CompileError::shape(format!("{} without a method name", kind)))
}

fn emit_put_field(
    ctx: &mut MethodContext<'_>,
    object: &Operand,
    field: &str,
    field_ty: &Type,
    value: &Operand,
) -> CompileResult<()> {
    let owner = owner_of(ctx, object)?;
    let descriptor = descriptor(field_ty, Position::Field)?;
    emit_load(ctx, object)?;
    emit_load(ctx, value)?;
    ctx.emit(Insn::PutField {
        owner,
        name: field.to_string(),
        descriptor,
    });
    Ok(())
}

/// Class that owns members accessed through `operand`, from its declared type
fn owner_of(ctx: &MethodContext<'_>, operand: &Operand) -> CompileResult<String> {
    let ty = operand.ty().resolve_this(ctx.class_name);
    Ok(internal_name(&ty, Position::Operand)?)
}

fn slot_of(ctx: &MethodContext<'_>, name: &str) -> CompileResult<u16> {
    ctx.var_table
        .get(name)
        .map(|entry| entry.slot)
        .ok_or_else(|| CompileError::UnresolvedBinding {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ir::{AccessModifier, Param, VarTable};

    fn body(instrs: Vec<IrInstr>) -> IrMethod {
        let mut method = IrMethod::new("run", vec![Param::new("a", Type::Int32)], Type::Void)
            .with_access(AccessModifier::Public);
        method.extend_instrs(instrs);
        method
    }

    fn code_of(method: &IrMethod) -> CompileResult<Vec<String>> {
        let mut ctx = MethodContext::new("Foo", method);
        for instr in &method.instructions {
            emit_statement(&mut ctx, instr)?;
        }
        Ok(ctx.code().iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_assign_binary() {
        let method = body(vec![IrInstr::assign(
            Operand::variable("a", Type::Int32),
            IrInstr::BinaryOp {
                op: BinaryOp::Add,
                left: Operand::variable("a", Type::Int32),
                right: Operand::int(1),
                ty: Type::Int32,
            },
        )]);
        assert_eq!(
            code_of(&method).unwrap(),
            vec!["iload_1", "ldc 1", "iadd", "istore_1"]
        );
    }

    #[test]
    fn test_allocation_idiom() {
        let foo = Type::class("Foo");
        let table = VarTable::for_method(false, &[], [("o", foo.clone())]);
        let method = body(vec![
            IrInstr::assign(
                Operand::variable("o", foo.clone()),
                IrInstr::Call {
                    kind: CallKind::New,
                    target: Operand::variable("Foo", foo.clone()),
                    method: None,
                    args: vec![],
                    ret: foo.clone(),
                },
            ),
            IrInstr::Call {
                kind: CallKind::InvokeSpecial,
                target: Operand::variable("o", foo),
                method: None,
                args: vec![],
                ret: Type::Void,
            },
        ])
        .with_var_table(table);

        assert_eq!(
            code_of(&method).unwrap(),
            vec!["new Foo", "dup", "astore_1", "invokespecial Foo/<init>()V"]
        );
    }

    #[test]
    fn test_discarded_result_is_popped() {
        let method = body(vec![IrInstr::Call {
            kind: CallKind::InvokeVirtual,
            target: Operand::This,
            method: Some("bar".to_string()),
            args: vec![Operand::variable("a", Type::Int32)],
            ret: Type::Int32,
        }]);
        assert_eq!(
            code_of(&method).unwrap(),
            vec!["aload_0", "iload_1", "invokevirtual Foo/bar(I)I", "pop"]
        );
    }

    #[test]
    fn test_field_access() {
        let method = body(vec![
            IrInstr::PutField {
                object: Operand::This,
                field: "x".to_string(),
                field_ty: Type::Int32,
                value: Operand::int(3),
            },
            IrInstr::assign(
                Operand::variable("a", Type::Int32),
                IrInstr::GetField {
                    object: Operand::This,
                    field: "x".to_string(),
                    field_ty: Type::Int32,
                },
            ),
        ]);
        assert_eq!(
            code_of(&method).unwrap(),
            vec![
                "aload_0",
                "ldc 3",
                "putfield Foo/x I",
                "aload_0",
                "getfield Foo/x I",
                "istore_1"
            ]
        );
    }

    #[test]
    fn test_reference_return() {
        let mut method = IrMethod::new("name", vec![Param::new("s", Type::String)], Type::String);
        method.add_instr(IrInstr::ret(Operand::variable("s", Type::String)));
        assert_eq!(code_of(&method).unwrap(), vec!["aload_1", "areturn"]);
    }

    #[test]
    fn test_less_is_unsupported() {
        let method = body(vec![IrInstr::assign(
            Operand::variable("a", Type::Int32),
            IrInstr::BinaryOp {
                op: BinaryOp::Less,
                left: Operand::int(1),
                right: Operand::int(2),
                ty: Type::Boolean,
            },
        )]);
        let err = code_of(&method).unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedOperator { op: BinaryOp::Less }));
        assert_eq!(err.kind(), ErrorKind::UnsupportedInstructionShape);
    }

    #[test]
    fn test_bare_binary_is_rejected() {
        let method = body(vec![IrInstr::BinaryOp {
            op: BinaryOp::Add,
            left: Operand::int(1),
            right: Operand::int(2),
            ty: Type::Int32,
        }]);
        assert_eq!(
            code_of(&method).unwrap_err().kind(),
            ErrorKind::UnsupportedInstructionShape
        );
    }

    #[test]
    fn test_void_assign_target() {
        let table = VarTable::for_method(false, &[], [("v", Type::Void)]);
        let method = body(vec![IrInstr::assign(
            Operand::variable("v", Type::Void),
            IrInstr::SingleOp(Operand::int(1)),
        )])
        .with_var_table(table);
        assert!(matches!(
            code_of(&method).unwrap_err(),
            CompileError::UnsupportedAssignTarget { ty: Type::Void }
        ));
    }

    #[test]
    fn test_void_literal_load() {
        let method = body(vec![IrInstr::SingleOp(Operand::literal(Type::Void, "0"))]);
        let err = code_of(&method).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnsupportedOperandType { ty: Type::Void }
        ));
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_void_variable_load() {
        let table = VarTable::for_method(false, &[], [("v", Type::Void)]);
        let method = body(vec![IrInstr::SingleOp(Operand::variable("v", Type::Void))])
            .with_var_table(table);
        assert!(matches!(
            code_of(&method).unwrap_err(),
            CompileError::UnsupportedOperandType { ty: Type::Void }
        ));
    }

    #[test]
    fn test_locals_count_covers_params() {
        let method = IrMethod::new(
            "f",
            vec![Param::new("a", Type::Int32), Param::new("b", Type::Int32)],
            Type::Void,
        )
        .with_var_table(VarTable::new());
        assert_eq!(locals_count(&method), 3);
    }
}
