//! Per-method variable table
//!
//! Maps source variable names to virtual slots. Built by symbol resolution,
//! read-only during bytecode generation.

use jmm_types::Type;
use rustc_hash::FxHashMap;

use super::class::Param;

/// Slot and type of one variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarEntry {
    pub slot: u16,
    pub ty: Type,
}

/// Variable name to slot mapping for one method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VarTable {
    entries: FxHashMap<String, VarEntry>,
}

impl VarTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard frame layout: `this` in slot 0 for instance methods, then
    /// parameters in order, then locals in order.
    pub fn for_method<'a, L>(is_static: bool, params: &[Param], locals: L) -> Self
    where
        L: IntoIterator<Item = (&'a str, Type)>,
    {
        let mut table = Self::new();
        let mut next: u16 = 0;
        if !is_static {
            table.insert("this", next, Type::This);
            next += 1;
        }
        for param in params {
            table.insert(param.name.clone(), next, param.ty.clone());
            next += 1;
        }
        for (name, ty) in locals {
            if table.get(name).is_none() {
                table.insert(name, next, ty);
                next += 1;
            }
        }
        table
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: impl Into<String>, slot: u16, ty: Type) {
        self.entries.insert(name.into(), VarEntry { slot, ty });
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&VarEntry> {
        self.entries.get(name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest slot in use
    pub fn max_slot(&self) -> Option<u16> {
        self.entries.values().map(|entry| entry.slot).max()
    }
}
