//! Core type definitions for Java--

use std::fmt;

/// A resolved semantic type.
///
/// Values are immutable and compared structurally. `This` stands for the
/// type of the receiver inside an instance method and must be resolved
/// against the enclosing class before it can be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// 32-bit signed integer
    Int32,
    /// Boolean
    Boolean,
    /// No value (method returns only)
    Void,
    /// `java.lang.String`
    String,
    /// Array of the element type
    ArrayOf(Box<Type>),
    /// Reference to a named class (`Foo`, `java.util.List`, ...)
    ClassRef(String),
    /// Type of the receiver of an instance method
    This,
}

impl Type {
    /// Array of `element`
    pub fn array_of(element: Type) -> Self {
        Type::ArrayOf(Box::new(element))
    }

    /// Reference to the class `name`
    pub fn class(name: impl Into<String>) -> Self {
        Type::ClassRef(name.into())
    }

    /// Values stored in integer-class slots (`iload`/`istore`/`ireturn`)
    pub fn is_integer_like(&self) -> bool {
        matches!(self, Type::Int32 | Type::Boolean)
    }

    /// Values stored in reference-class slots (`aload`/`astore`/`areturn`)
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::String | Type::ArrayOf(_) | Type::ClassRef(_) | Type::This
        )
    }

    /// Whether this is `Void`
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Replace `This` (also inside arrays) with a reference to `class`
    pub fn resolve_this(&self, class: &str) -> Type {
        match self {
            Type::This => Type::ClassRef(class.to_string()),
            Type::ArrayOf(elem) => Type::array_of(elem.resolve_this(class)),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int32 => write!(f, "int"),
            Type::Boolean => write!(f, "boolean"),
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "String"),
            Type::ArrayOf(elem) => write!(f, "{}[]", elem),
            Type::ClassRef(name) => write!(f, "{}", name),
            Type::This => write!(f, "this"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_classes() {
        assert!(Type::Int32.is_integer_like());
        assert!(Type::Boolean.is_integer_like());
        assert!(!Type::String.is_integer_like());

        assert!(Type::String.is_reference());
        assert!(Type::class("Foo").is_reference());
        assert!(Type::array_of(Type::Int32).is_reference());
        assert!(Type::This.is_reference());
        assert!(!Type::Void.is_reference());
        assert!(!Type::Void.is_integer_like());
    }

    #[test]
    fn test_resolve_this() {
        assert_eq!(Type::This.resolve_this("Foo"), Type::class("Foo"));
        assert_eq!(
            Type::array_of(Type::This).resolve_this("Foo"),
            Type::array_of(Type::class("Foo"))
        );
        assert_eq!(Type::Int32.resolve_this("Foo"), Type::Int32);
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::array_of(Type::String).to_string(), "String[]");
        assert_eq!(Type::class("Foo").to_string(), "Foo");
    }
}
