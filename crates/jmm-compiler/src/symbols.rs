//! Symbol table view consumed by lowering
//!
//! Exposes what the lowering needs from name resolution: the class name, the
//! imported names and method signatures looked up by name.

use jmm_types::Type;
use rustc_hash::FxHashMap;

/// Declared signature of a method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<Type>,
    pub return_ty: Type,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: Vec<Type>, return_ty: Type) -> Self {
        Self {
            name: name.into(),
            params,
            return_ty,
        }
    }
}

/// Symbols of one compilation unit
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    class_name: String,
    super_class: Option<String>,
    /// Imports as written, dotted (`io`, `java.util.List`)
    imports: Vec<String>,
    methods: FxHashMap<String, MethodSignature>,
}

impl SymbolTable {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    pub fn with_super(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    pub fn add_import(&mut self, import: impl Into<String>) {
        self.imports.push(import.into());
    }

    pub fn add_method(&mut self, signature: MethodSignature) {
        self.methods.insert(signature.name.clone(), signature);
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn super_class(&self) -> Option<&str> {
        self.super_class.as_deref()
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Full import path for a simple or qualified name
    pub fn resolve_import(&self, name: &str) -> Option<&str> {
        self.imports
            .iter()
            .find(|import| {
                import.as_str() == name || import.rsplit('.').next() == Some(name)
            })
            .map(String::as_str)
    }

    pub fn is_import(&self, name: &str) -> bool {
        self.resolve_import(name).is_some()
    }

    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.get(name)
    }

    /// Declared return type of the method called `name`
    pub fn return_type(&self, name: &str) -> Option<&Type> {
        self.methods.get(name).map(|sig| &sig.return_ty)
    }
}
