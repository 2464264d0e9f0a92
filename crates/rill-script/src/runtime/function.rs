//! Rill function representation.

use super::namespace::Namespace;
use super::value::Value;
use crate::Error;
use crate::ast::Statement;
use std::sync::Arc;

/// A script-defined rill function.
///
/// Free names in the body resolve through `module` at call time, so a
/// reload that replaces the module's bindings is observed by calls made
/// through previously captured function values.
#[derive(Debug)]
pub struct Function {
    /// The function name
    pub name: String,
    /// The parameter names
    pub params: Vec<String>,
    /// The function body
    pub body: Vec<Statement>,
    /// The namespace the function was defined in
    pub module: Arc<Namespace>,
}

impl Function {
    /// Returns the arity (number of parameters).
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Signature of a native (Rust) function.
pub type NativeFn = fn(&[Value]) -> Result<Value, Error>;

/// A native Rust function exposed to scripts.
#[derive(Clone)]
pub struct NativeFunction {
    /// The function name
    pub name: &'static str,
    /// The arity (-1 for variadic)
    pub arity: i32,
    /// The native function pointer
    pub func: NativeFn,
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}
