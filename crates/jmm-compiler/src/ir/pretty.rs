//! Textual IR
//!
//! Renders IR in its textual form, where every operand carries a type
//! suffix (`a.i32`, `1.i32`, `tmp0.i32 :=.i32 a.i32 +.i32 b.i32;`).
//! Suffixes come from [`jmm_types::ir_suffix`], so rendering fails on a type
//! that has no suffix instead of printing a bare name.

use std::fmt::Write;

use jmm_types::{ir_suffix, TypeError};

use super::class::{IrClass, IrField, IrMethod};
use super::instr::{CallKind, IrInstr};
use super::value::Operand;

/// Trait for rendering IR constructs as text
pub trait PrettyPrint {
    fn pretty_print(&self) -> Result<String, TypeError>;
}

impl PrettyPrint for Operand {
    fn pretty_print(&self) -> Result<String, TypeError> {
        match self {
            Operand::Literal { ty, value } => Ok(format!("{}{}", value, ir_suffix(ty)?)),
            Operand::Variable { name, ty } => Ok(format!("{}{}", name, ir_suffix(ty)?)),
            Operand::This => Ok("this".to_string()),
        }
    }
}

impl PrettyPrint for IrInstr {
    /// Statement form, terminated by `;`
    fn pretty_print(&self) -> Result<String, TypeError> {
        Ok(format!("{};", format_instr(self)?))
    }
}

fn format_instr(instr: &IrInstr) -> Result<String, TypeError> {
    match instr {
        IrInstr::Assign { dest, rhs } => Ok(format!(
            "{} :={} {}",
            dest.pretty_print()?,
            ir_suffix(&dest.ty())?,
            format_instr(rhs)?
        )),
        IrInstr::SingleOp(operand) => operand.pretty_print(),
        IrInstr::BinaryOp {
            op,
            left,
            right,
            ty,
        } => Ok(format!(
            "{} {}{} {}",
            left.pretty_print()?,
            op,
            ir_suffix(ty)?,
            right.pretty_print()?
        )),
        IrInstr::Return { ty, value } => match value {
            Some(value) if !ty.is_void() => {
                Ok(format!("ret{} {}", ir_suffix(ty)?, value.pretty_print()?))
            }
            _ => Ok(format!("ret{}", ir_suffix(ty)?)),
        },
        IrInstr::Call {
            kind,
            target,
            method,
            args,
            ret,
        } => {
            let mut out = format!("{}(", kind);
            match (kind, target) {
                // Class-named targets are written without a suffix
                (CallKind::New | CallKind::InvokeStatic, Operand::Variable { name, .. }) => {
                    out.push_str(name)
                }
                _ => out.push_str(&target.pretty_print()?),
            }
            if let Some(method) = method {
                write!(out, ", \"{}\"", method).unwrap();
            }
            for arg in args {
                write!(out, ", {}", arg.pretty_print()?).unwrap();
            }
            write!(out, "){}", ir_suffix(ret)?).unwrap();
            Ok(out)
        }
        IrInstr::PutField {
            object,
            field,
            field_ty,
            value,
        } => Ok(format!(
            "putfield({}, {}{}, {}).V",
            object.pretty_print()?,
            field,
            ir_suffix(field_ty)?,
            value.pretty_print()?
        )),
        IrInstr::GetField {
            object,
            field,
            field_ty,
        } => {
            let suffix = ir_suffix(field_ty)?;
            Ok(format!(
                "getfield({}, {}{}){}",
                object.pretty_print()?,
                field,
                suffix,
                suffix
            ))
        }
    }
}

/// Write `access static final ` for the flags that are set
pub(crate) fn modifiers(out: &mut String, access: Option<&str>, is_static: bool, is_final: bool) {
    if let Some(access) = access {
        write!(out, "{} ", access).unwrap();
    }
    if is_static {
        out.push_str("static ");
    }
    if is_final {
        out.push_str("final ");
    }
}

impl PrettyPrint for IrField {
    fn pretty_print(&self) -> Result<String, TypeError> {
        let mut out = String::from(".field ");
        modifiers(&mut out, self.access.keyword(), self.is_static, self.is_final);
        write!(out, "{}{};", self.name, ir_suffix(&self.ty)?).unwrap();
        Ok(out)
    }
}

impl PrettyPrint for IrMethod {
    fn pretty_print(&self) -> Result<String, TypeError> {
        let mut output = String::new();

        let keyword = if self.is_constructor { ".construct " } else { ".method " };
        output.push_str(keyword);
        modifiers(&mut output, self.access.keyword(), self.is_static, self.is_final);

        let mut params = Vec::with_capacity(self.params.len());
        for param in &self.params {
            params.push(format!("{}{}", param.name, ir_suffix(&param.ty)?));
        }
        writeln!(
            output,
            "{}({}){} {{",
            self.name,
            params.join(", "),
            ir_suffix(&self.return_ty)?
        )
        .unwrap();

        for instr in &self.instructions {
            writeln!(output, "    {}", instr.pretty_print()?).unwrap();
        }

        writeln!(output, "}}").unwrap();
        Ok(output)
    }
}

impl PrettyPrint for IrClass {
    fn pretty_print(&self) -> Result<String, TypeError> {
        let mut output = String::new();

        let header = match &self.super_class {
            Some(super_class) => format!("{} extends {}", self.name, super_class),
            None => self.name.clone(),
        };
        writeln!(output, "{} {{", header).unwrap();

        for field in &self.fields {
            writeln!(output, "{}", field.pretty_print()?).unwrap();
        }
        writeln!(output).unwrap();

        for method in &self.methods {
            output.push_str(&method.pretty_print()?);
            writeln!(output).unwrap();
        }

        writeln!(output, "}}").unwrap();
        Ok(output)
    }
}
