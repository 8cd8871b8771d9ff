//! IR Class Units
//!
//! A class unit owns its fields and methods; each method owns its parameter
//! list, modifiers, instruction sequence and variable table.

use jmm_types::Type;

use super::instr::IrInstr;
use super::var_table::VarTable;

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
    #[default]
    Default,
}

impl AccessModifier {
    /// Keyword in the assembly, `None` for package access
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            AccessModifier::Public => Some("public"),
            AccessModifier::Private => Some("private"),
            AccessModifier::Protected => Some("protected"),
            AccessModifier::Default => None,
        }
    }
}

/// A field declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrField {
    pub name: String,
    pub ty: Type,
    pub access: AccessModifier,
    pub is_final: bool,
    pub is_static: bool,
}

impl IrField {
    /// Create a package-access, non-final, non-static field
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            access: AccessModifier::Default,
            is_final: false,
            is_static: false,
        }
    }

    /// Set the visibility
    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A method and its IR body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrMethod {
    pub name: String,
    pub params: Vec<Param>,
    pub return_ty: Type,
    pub access: AccessModifier,
    pub is_final: bool,
    pub is_static: bool,
    /// Constructors are never regenerated from IR
    pub is_constructor: bool,
    pub instructions: Vec<IrInstr>,
    pub var_table: VarTable,
}

impl IrMethod {
    /// Create a package-access instance method with an empty body.
    ///
    /// The variable table starts with the standard frame layout for the
    /// parameters.
    pub fn new(name: impl Into<String>, params: Vec<Param>, return_ty: Type) -> Self {
        let var_table = VarTable::for_method(false, &params, []);
        Self {
            name: name.into(),
            params,
            return_ty,
            access: AccessModifier::Default,
            is_final: false,
            is_static: false,
            is_constructor: false,
            instructions: Vec::new(),
            var_table,
        }
    }

    /// Set the visibility
    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }

    /// Mark the method static.
    ///
    /// The parameter slots are rebuilt without `this` unless a table was
    /// already supplied with [`IrMethod::with_var_table`].
    pub fn into_static(mut self) -> Self {
        if !self.is_static && self.var_table == VarTable::for_method(false, &self.params, []) {
            self.var_table = VarTable::for_method(true, &self.params, []);
        }
        self.is_static = true;
        self
    }

    /// Replace the variable table
    pub fn with_var_table(mut self, var_table: VarTable) -> Self {
        self.var_table = var_table;
        self
    }

    /// Append an instruction to the body
    pub fn add_instr(&mut self, instr: IrInstr) {
        self.instructions.push(instr);
    }

    /// Append several instructions to the body
    pub fn extend_instrs(&mut self, instrs: impl IntoIterator<Item = IrInstr>) {
        self.instructions.extend(instrs);
    }

    /// Number of slots taken by `this` and the parameters
    pub fn param_frame_size(&self) -> u16 {
        let this_slot = if self.is_static { 0 } else { 1 };
        self.params.len() as u16 + this_slot
    }
}

/// A class unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrClass {
    pub name: String,
    /// Declared superclass, if any
    pub super_class: Option<String>,
    pub access: AccessModifier,
    pub fields: Vec<IrField>,
    pub methods: Vec<IrMethod>,
}

impl IrClass {
    /// Create an empty class with no declared superclass
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            access: AccessModifier::Default,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the superclass
    pub fn with_super(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    /// Add a field
    pub fn add_field(&mut self, field: IrField) {
        self.fields.push(field);
    }

    /// Add a method
    pub fn add_method(&mut self, method: IrMethod) {
        self.methods.push(method);
    }

    /// Methods that are generated from IR, in declaration order
    pub fn generated_methods(&self) -> impl Iterator<Item = &IrMethod> {
        self.methods.iter().filter(|m| !m.is_constructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_keywords() {
        assert_eq!(AccessModifier::Public.keyword(), Some("public"));
        assert_eq!(AccessModifier::Protected.keyword(), Some("protected"));
        assert_eq!(AccessModifier::Default.keyword(), None);
    }

    #[test]
    fn test_method_frame() {
        let method = IrMethod::new("sum", vec![Param::new("a", Type::Int32)], Type::Int32);
        assert_eq!(method.param_frame_size(), 2);
        assert_eq!(method.var_table.get("a").map(|e| e.slot), Some(1));

        let method = method.into_static();
        assert_eq!(method.param_frame_size(), 1);
        assert_eq!(method.var_table.get("a").map(|e| e.slot), Some(0));
    }

    #[test]
    fn test_into_static_keeps_supplied_table() {
        let params = vec![Param::new("a", Type::Int32)];
        let table = VarTable::for_method(true, &params, [("n", Type::Boolean)]);
        let method = IrMethod::new("f", params, Type::Void)
            .with_var_table(table.clone())
            .into_static();

        assert!(method.is_static);
        assert_eq!(method.var_table, table);
        assert_eq!(method.var_table.get("n").map(|e| e.slot), Some(1));
    }

    #[test]
    fn test_generated_methods_skip_constructors() {
        let mut class = IrClass::new("Foo");
        let mut ctor = IrMethod::new("Foo", vec![], Type::Void);
        ctor.is_constructor = true;
        class.add_method(ctor);
        class.add_method(IrMethod::new("bar", vec![], Type::Void));

        let names: Vec<_> = class.generated_methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["bar"]);
        assert_eq!(class.methods.len(), 2);
    }
}
