//! Type encodings
//!
//! The single source of truth for how a [`Type`] is written down, both in
//! the IR (`.i32`, `.bool`, `.String`, ...) and in JVM descriptors (`I`, `Z`,
//! `Ljava/lang/String;`, ...). Both the expression lowering and the bytecode
//! generator go through these functions, so the two stages cannot disagree.
//!
//! Every function is total over [`Type`]: a type with no encoding at a given
//! site is reported as [`TypeError::UnsupportedType`], never mapped to an
//! empty string.

use std::fmt;

use crate::error::TypeError;
use crate::ty::Type;

/// Internal name of the platform string class
const STRING_CLASS: &str = "java/lang/String";

/// The site at which a type is being encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Field declaration or field access
    Field,
    /// Method parameter in a declaration
    Parameter,
    /// Method return type
    Return,
    /// Instruction operand
    Operand,
    /// Argument at a call site
    Argument,
    /// Element type of an array
    ArrayElement,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::Field => "field",
            Position::Parameter => "parameter",
            Position::Return => "return",
            Position::Operand => "operand",
            Position::Argument => "argument",
            Position::ArrayElement => "array element",
        };
        write!(f, "{}", s)
    }
}

/// IR type suffix, including the leading dot (`.i32`, `.array.String`).
pub fn ir_suffix(ty: &Type) -> Result<String, TypeError> {
    match ty {
        Type::Int32 => Ok(".i32".to_string()),
        Type::Boolean => Ok(".bool".to_string()),
        Type::Void => Ok(".V".to_string()),
        Type::String => Ok(".String".to_string()),
        Type::ArrayOf(elem) => match elem.as_ref() {
            Type::Void | Type::This => Err(TypeError::unsupported(ty, Position::ArrayElement)),
            elem => Ok(format!(".array{}", ir_suffix(elem)?)),
        },
        Type::ClassRef(name) => Ok(format!(".{}", name)),
        Type::This => Ok(".this".to_string()),
    }
}

/// JVM type descriptor of `ty` at `position`.
///
/// `Void` is only encodable as a return type, and `This` must be resolved
/// with [`Type::resolve_this`] first.
pub fn descriptor(ty: &Type, position: Position) -> Result<String, TypeError> {
    match ty {
        Type::Int32 => Ok("I".to_string()),
        Type::Boolean => Ok("Z".to_string()),
        Type::Void if position == Position::Return => Ok("V".to_string()),
        Type::String => Ok(format!("L{};", STRING_CLASS)),
        Type::ArrayOf(elem) => Ok(format!("[{}", descriptor(elem, Position::ArrayElement)?)),
        Type::ClassRef(name) => Ok(format!("L{};", class_path(name))),
        Type::Void | Type::This => Err(TypeError::unsupported(ty, position)),
    }
}

/// Internal name used to address a class as the owner of a member
/// (`java/lang/String`, `Foo`). Array owners use their descriptor.
pub fn internal_name(ty: &Type, position: Position) -> Result<String, TypeError> {
    match ty {
        Type::String => Ok(STRING_CLASS.to_string()),
        Type::ClassRef(name) => Ok(class_path(name)),
        Type::ArrayOf(_) => descriptor(ty, position),
        Type::Int32 | Type::Boolean | Type::Void | Type::This => {
            Err(TypeError::unsupported(ty, position))
        }
    }
}

/// Method descriptor: parameter descriptors in order, wrapped in
/// parentheses, followed by the return descriptor.
pub fn method_descriptor<'a, I>(params: I, ret: &Type) -> Result<String, TypeError>
where
    I: IntoIterator<Item = &'a Type>,
{
    signature(params, Position::Parameter, ret)
}

/// Descriptor of a call site, built from the arguments' declared types.
pub fn call_descriptor<'a, I>(args: I, ret: &Type) -> Result<String, TypeError>
where
    I: IntoIterator<Item = &'a Type>,
{
    signature(args, Position::Argument, ret)
}

fn signature<'a, I>(params: I, position: Position, ret: &Type) -> Result<String, TypeError>
where
    I: IntoIterator<Item = &'a Type>,
{
    let mut out = String::from("(");
    for param in params {
        out.push_str(&descriptor(param, position)?);
    }
    out.push(')');
    out.push_str(&descriptor(ret, Position::Return)?);
    Ok(out)
}

fn class_path(name: &str) -> String {
    name.replace('.', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_descriptors() {
        assert_eq!(descriptor(&Type::Int32, Position::Field).unwrap(), "I");
        assert_eq!(descriptor(&Type::Boolean, Position::Field).unwrap(), "Z");
        assert_eq!(descriptor(&Type::Void, Position::Return).unwrap(), "V");
    }

    #[test]
    fn test_reference_descriptors() {
        assert_eq!(
            descriptor(&Type::String, Position::Parameter).unwrap(),
            "Ljava/lang/String;"
        );
        assert_eq!(
            descriptor(&Type::class("java.util.List"), Position::Field).unwrap(),
            "Ljava/util/List;"
        );
        assert_eq!(
            descriptor(&Type::array_of(Type::String), Position::Parameter).unwrap(),
            "[Ljava/lang/String;"
        );
        assert_eq!(
            descriptor(&Type::array_of(Type::array_of(Type::Int32)), Position::Field).unwrap(),
            "[[I"
        );
    }

    #[test]
    fn test_void_outside_return_is_rejected() {
        let err = descriptor(&Type::Void, Position::Field).unwrap_err();
        assert_eq!(
            err,
            TypeError::UnsupportedType {
                ty: "void".to_string(),
                position: Position::Field,
            }
        );
        assert!(descriptor(&Type::array_of(Type::Void), Position::Field).is_err());
    }

    #[test]
    fn test_unresolved_this_is_rejected() {
        assert!(descriptor(&Type::This, Position::Operand).is_err());
        assert_eq!(
            descriptor(&Type::This.resolve_this("Foo"), Position::Operand).unwrap(),
            "LFoo;"
        );
    }

    #[test]
    fn test_ir_suffixes() {
        assert_eq!(ir_suffix(&Type::Int32).unwrap(), ".i32");
        assert_eq!(ir_suffix(&Type::Boolean).unwrap(), ".bool");
        assert_eq!(ir_suffix(&Type::Void).unwrap(), ".V");
        assert_eq!(ir_suffix(&Type::class("Foo")).unwrap(), ".Foo");
        assert_eq!(ir_suffix(&Type::array_of(Type::String)).unwrap(), ".array.String");
        assert!(ir_suffix(&Type::array_of(Type::Void)).is_err());
    }

    #[test]
    fn test_internal_names() {
        assert_eq!(internal_name(&Type::String, Position::Operand).unwrap(), "java/lang/String");
        assert_eq!(internal_name(&Type::class("a.b.C"), Position::Operand).unwrap(), "a/b/C");
        assert!(internal_name(&Type::Int32, Position::Operand).is_err());
    }

    #[test]
    fn test_method_descriptor() {
        let params = [Type::Int32, Type::String, Type::Boolean];
        assert_eq!(
            method_descriptor(&params, &Type::Void).unwrap(),
            "(ILjava/lang/String;Z)V"
        );
        let none: [Type; 0] = [];
        assert_eq!(method_descriptor(&none, &Type::Int32).unwrap(), "()I");
        assert!(method_descriptor(&[Type::Void], &Type::Void).is_err());
    }
}
