//! Assembly instructions
//!
//! The subset of the JVM instruction set the generator emits, with its
//! Jasmin text form and operand-stack effect.

use std::fmt;

use crate::ir::CallKind;

/// One emitted instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insn {
    /// Push a constant, written as its literal text
    Ldc(String),
    ILoad(u16),
    ALoad(u16),
    IStore(u16),
    AStore(u16),
    IAdd,
    ISub,
    IMul,
    IDiv,
    IAnd,
    /// Allocate an uninitialized instance of a class
    New(String),
    Dup,
    Pop,
    Invoke {
        kind: CallKind,
        owner: String,
        name: String,
        descriptor: String,
        arg_count: usize,
        has_receiver: bool,
        returns_value: bool,
    },
    GetField {
        owner: String,
        name: String,
        descriptor: String,
    },
    PutField {
        owner: String,
        name: String,
        descriptor: String,
    },
    Return,
    IReturn,
    AReturn,
}

impl Insn {
    /// Net change of the operand stack depth
    pub fn stack_effect(&self) -> i32 {
        match self {
            Insn::Ldc(_) | Insn::ILoad(_) | Insn::ALoad(_) | Insn::New(_) | Insn::Dup => 1,
            Insn::IStore(_) | Insn::AStore(_) | Insn::Pop => -1,
            Insn::IAdd | Insn::ISub | Insn::IMul | Insn::IDiv | Insn::IAnd => -1,
            Insn::Invoke {
                arg_count,
                has_receiver,
                returns_value,
                ..
            } => {
                let popped = *arg_count as i32 + i32::from(*has_receiver);
                i32::from(*returns_value) - popped
            }
            Insn::GetField { .. } => 0,
            Insn::PutField { .. } => -2,
            Insn::Return => 0,
            Insn::IReturn | Insn::AReturn => -1,
        }
    }
}

/// `iload_1` for the short slots, `iload 4` beyond them
fn slot_op(f: &mut fmt::Formatter<'_>, op: &str, slot: u16) -> fmt::Result {
    if slot <= 3 {
        write!(f, "{}_{}", op, slot)
    } else {
        write!(f, "{} {}", op, slot)
    }
}

impl fmt::Display for Insn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insn::Ldc(value) => write!(f, "ldc {}", value),
            Insn::ILoad(slot) => slot_op(f, "iload", *slot),
            Insn::ALoad(slot) => slot_op(f, "aload", *slot),
            Insn::IStore(slot) => slot_op(f, "istore", *slot),
            Insn::AStore(slot) => slot_op(f, "astore", *slot),
            Insn::IAdd => write!(f, "iadd"),
            Insn::ISub => write!(f, "isub"),
            Insn::IMul => write!(f, "imul"),
            Insn::IDiv => write!(f, "idiv"),
            Insn::IAnd => write!(f, "iand"),
            Insn::New(owner) => write!(f, "new {}", owner),
            Insn::Dup => write!(f, "dup"),
            Insn::Pop => write!(f, "pop"),
            Insn::Invoke {
                kind,
                owner,
                name,
                descriptor,
                ..
            } => write!(f, "{} {}/{}{}", kind, owner, name, descriptor),
            Insn::GetField {
                owner,
                name,
                descriptor,
            } => write!(f, "getfield {}/{} {}", owner, name, descriptor),
            Insn::PutField {
                owner,
                name,
                descriptor,
            } => write!(f, "putfield {}/{} {}", owner, name, descriptor),
            Insn::Return => write!(f, "return"),
            Insn::IReturn => write!(f, "ireturn"),
            Insn::AReturn => write!(f, "areturn"),
        }
    }
}
