//! Lexical environments for local variable bindings.

use super::value::Value;
use rustc_hash::FxHashMap;

/// A stack of lexical scopes for one unit of execution (a call frame or
/// a top-level program).
///
/// Module-level bindings live in a `Namespace`, not here; the interpreter
/// falls back to the active namespace when a name is not found in any
/// scope.
#[derive(Debug, Default)]
pub struct Environment {
    scopes: Vec<FxHashMap<String, Value>>,
}

impl Environment {
    /// Creates a new environment with a single root scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Enters a nested scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Leaves the innermost scope, dropping its bindings.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the root scope");
        self.scopes.pop();
    }

    /// Declares a variable in the innermost scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    /// Gets a variable's value, searching innermost scope first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Sets an existing variable's value. Returns false if no scope
    /// declares the name.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(name) {
                *slot = value;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_shadowing_in_nested_scope() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.push_scope();
        env.define("x", Value::Number(2.0));
        assert_eq!(env.get("x"), Some(&Value::Number(2.0)));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_assign_walks_outward() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.push_scope();
        assert!(env.assign("x", Value::Number(5.0)));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(&Value::Number(5.0)));
        assert!(!env.assign("missing", Value::Nil));
    }
}
