//! Module namespaces: name → value mappings behind a stable handle.

use super::value::Value;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;

/// The set of bindings a module exposes.
///
/// A namespace is always handed around as `Arc<Namespace>`; the handle's
/// identity is fixed for the lifetime of the process while the contents
/// are replaced in place on reload. Anything holding the handle (the
/// registry, a REPL binding, a function value from the module) observes
/// the replacement without rebinding.
pub struct Namespace {
    name: String,
    bindings: RwLock<FxHashMap<String, Value>>,
}

impl Namespace {
    /// Creates an empty namespace for the given module name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: RwLock::new(FxHashMap::default()),
        }
    }

    /// The module name this namespace belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets a binding's value.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.read().get(name).cloned()
    }

    /// Adds or overwrites a binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.write().insert(name.into(), value);
    }

    /// Removes every binding.
    pub fn clear(&self) {
        self.bindings.write().clear();
    }

    /// Replaces the entire contents: clear, then repopulate from `bindings`.
    ///
    /// Holders of the `Arc<Namespace>` handle see the new definitions; the
    /// handle itself is untouched.
    pub fn replace_all(&self, bindings: FxHashMap<String, Value>) {
        let mut guard = self.bindings.write();
        guard.clear();
        guard.extend(bindings);
    }

    /// Returns a copy of the current bindings.
    pub fn snapshot(&self) -> FxHashMap<String, Value> {
        self.bindings.read().clone()
    }

    /// The bound names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// The number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// Returns true if the namespace has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("bindings", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_define_and_get() {
        let ns = Namespace::new("m");
        ns.define("x", Value::Number(1.0));
        assert_eq!(ns.get("x"), Some(Value::Number(1.0)));
        assert_eq!(ns.get("y"), None);
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_replace_all_preserves_handle_identity() {
        let ns = Arc::new(Namespace::new("m"));
        ns.define("old", Value::Number(1.0));
        let alias = Arc::clone(&ns);

        let mut fresh = FxHashMap::default();
        fresh.insert("new".to_string(), Value::Number(2.0));
        ns.replace_all(fresh);

        // The alias taken before the replacement sees the new contents.
        assert!(Arc::ptr_eq(&ns, &alias));
        assert_eq!(alias.get("old"), None);
        assert_eq!(alias.get("new"), Some(Value::Number(2.0)));
    }

    #[test]
    fn test_names_sorted() {
        let ns = Namespace::new("m");
        ns.define("b", Value::Nil);
        ns.define("a", Value::Nil);
        assert_eq!(ns.names(), vec!["a".to_string(), "b".to_string()]);
    }
}
