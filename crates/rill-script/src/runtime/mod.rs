//! Runtime types: values, functions, environments, and namespaces.

pub mod environment;
pub mod function;
pub mod namespace;
pub mod value;

pub use environment::Environment;
pub use function::{Function, NativeFn, NativeFunction};
pub use namespace::Namespace;
pub use value::Value;
