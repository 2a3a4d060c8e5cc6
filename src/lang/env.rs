use crate::lang::builtins::register_builtins;
use crate::lang::types::{Binding, Builtin};
use std::collections::HashMap;

/// Explicit table of the names an expression may reference.
///
/// Nothing outside this table is reachable from an expression: there is no
/// fallback to a global namespace.
#[derive(Debug, Clone, Default)]
pub struct MathContext {
    bindings: HashMap<String, Binding>,
}

impl MathContext {
    /// An empty context with no constants or functions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard constant and function table.
    pub fn standard() -> Self {
        let mut ctx = Self::empty();
        register_builtins(&mut ctx);
        ctx
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn set_constant(&mut self, name: impl Into<String>, value: f64) {
        self.bindings.insert(name.into(), Binding::Value(value));
    }

    pub fn set_function(&mut self, builtin: Builtin) {
        self.bindings
            .insert(builtin.name.to_string(), Binding::Function(builtin));
    }
}
