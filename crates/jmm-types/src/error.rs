//! Type mapping errors

use thiserror::Error;

use crate::descriptor::Position;

/// Errors raised while mapping a semantic type to a textual encoding
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// The type has no encoding at the given mapping site
    #[error("Unsupported type `{ty}` in {position} position")]
    UnsupportedType {
        /// Rendered form of the offending type
        ty: String,
        /// Where the type was being mapped
        position: Position,
    },
}

impl TypeError {
    pub(crate) fn unsupported(ty: &crate::Type, position: Position) -> Self {
        TypeError::UnsupportedType {
            ty: ty.to_string(),
            position,
        }
    }
}
