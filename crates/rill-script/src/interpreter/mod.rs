//! The tree-walking interpreter.
//!
//! Executes a parsed [`Program`] against a [`Namespace`]. Top-level `let`
//! and `fn` statements define bindings in the namespace; everything else
//! runs for effect. Free names inside function bodies resolve through the
//! defining namespace at call time, which is what makes in-place reload
//! visible to previously created function values.

use crate::Error;
use crate::ast::*;
use crate::runtime::{Environment, Function, NativeFunction, Namespace, Value};
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Maximum script call depth before a `RecursionLimit` error is raised.
const MAX_CALL_DEPTH: usize = 200;

/// Result of executing a statement.
enum Control {
    /// Continue with the next statement
    Normal,
    /// Unwind to the nearest call boundary
    Return(Value),
}

/// The rill interpreter.
pub struct Interpreter {
    builtins: FxHashMap<String, Value>,
    depth: usize,
}

impl Interpreter {
    /// Creates a new interpreter with the default native functions.
    pub fn new() -> Self {
        Self {
            builtins: default_builtins(),
            depth: 0,
        }
    }

    /// Executes a program's top-level statements against `namespace`.
    ///
    /// `let` and `fn` statements define bindings in the namespace; other
    /// statements execute in a transient local environment. Returns the
    /// value of the final expression statement, or nil.
    pub fn eval_program(
        &mut self,
        program: &Program,
        namespace: &Arc<Namespace>,
    ) -> Result<Value, Error> {
        let mut env = Environment::new();
        let mut last = Value::Nil;

        for statement in &program.body {
            match statement {
                Statement::Let(let_stmt) => {
                    let value = self.eval_expression(&let_stmt.init, &mut env, namespace)?;
                    namespace.define(let_stmt.id.name.clone(), value);
                    last = Value::Nil;
                }
                Statement::Function(decl) => {
                    namespace.define(decl.id.name.clone(), self.make_function(decl, namespace));
                    last = Value::Nil;
                }
                Statement::Expression(expr_stmt) => {
                    last = self.eval_expression(&expr_stmt.expression, &mut env, namespace)?;
                }
                _ => {
                    match self.exec_statement(statement, &mut env, namespace)? {
                        Control::Return(_) => {
                            return Err(Error::Syntax(
                                "'return' outside of a function".into(),
                            ));
                        }
                        Control::Normal => {}
                    }
                    last = Value::Nil;
                }
            }
        }

        Ok(last)
    }

    /// Calls a callable value with the given arguments.
    pub fn call(&mut self, callee: &Value, arguments: Vec<Value>) -> Result<Value, Error> {
        match callee {
            Value::Function(func) => self.call_function(func, arguments),
            Value::Native(native) => call_native(native, &arguments),
            other => Err(Error::Type(format!(
                "value of type '{}' is not callable",
                other.type_of()
            ))),
        }
    }

    fn make_function(&self, decl: &FunctionDeclaration, namespace: &Arc<Namespace>) -> Value {
        Value::Function(Arc::new(Function {
            name: decl.id.name.clone(),
            params: decl.params.iter().map(|p| p.name.clone()).collect(),
            body: decl.body.clone(),
            module: Arc::clone(namespace),
        }))
    }

    fn call_function(&mut self, func: &Arc<Function>, arguments: Vec<Value>) -> Result<Value, Error> {
        if arguments.len() != func.arity() {
            return Err(Error::Arity {
                name: func.name.clone(),
                expected: func.arity(),
                found: arguments.len(),
            });
        }

        self.depth += 1;
        if self.depth > MAX_CALL_DEPTH {
            self.depth -= 1;
            return Err(Error::RecursionLimit);
        }

        let mut env = Environment::new();
        for (param, argument) in func.params.iter().zip(arguments) {
            env.define(param.clone(), argument);
        }

        let result = self.exec_statements(&func.body, &mut env, &func.module);
        self.depth -= 1;

        match result? {
            Control::Return(value) => Ok(value),
            Control::Normal => Ok(Value::Nil),
        }
    }

    fn exec_statements(
        &mut self,
        statements: &[Statement],
        env: &mut Environment,
        namespace: &Arc<Namespace>,
    ) -> Result<Control, Error> {
        for statement in statements {
            if let Control::Return(value) = self.exec_statement(statement, env, namespace)? {
                return Ok(Control::Return(value));
            }
        }
        Ok(Control::Normal)
    }

    fn exec_statement(
        &mut self,
        statement: &Statement,
        env: &mut Environment,
        namespace: &Arc<Namespace>,
    ) -> Result<Control, Error> {
        match statement {
            Statement::Let(let_stmt) => {
                let value = self.eval_expression(&let_stmt.init, env, namespace)?;
                env.define(let_stmt.id.name.clone(), value);
                Ok(Control::Normal)
            }
            Statement::Function(decl) => {
                env.define(decl.id.name.clone(), self.make_function(decl, namespace));
                Ok(Control::Normal)
            }
            Statement::Assign(assign) => {
                let value = self.eval_expression(&assign.value, env, namespace)?;
                if env.assign(&assign.id.name, value) {
                    Ok(Control::Normal)
                } else if namespace.get(&assign.id.name).is_some() {
                    Err(Error::Type(format!(
                        "cannot assign to module binding '{}'; rebind it with 'let'",
                        assign.id.name
                    )))
                } else {
                    Err(Error::Reference(format!(
                        "'{}' is not defined",
                        assign.id.name
                    )))
                }
            }
            Statement::Expression(expr_stmt) => {
                self.eval_expression(&expr_stmt.expression, env, namespace)?;
                Ok(Control::Normal)
            }
            Statement::Block(block) => {
                env.push_scope();
                let result = self.exec_statements(&block.body, env, namespace);
                env.pop_scope();
                result
            }
            Statement::If(if_stmt) => {
                let test = self.eval_expression(&if_stmt.test, env, namespace)?;
                if test.is_truthy() {
                    self.exec_statement(&if_stmt.consequent, env, namespace)
                } else if let Some(alternate) = &if_stmt.alternate {
                    self.exec_statement(alternate, env, namespace)
                } else {
                    Ok(Control::Normal)
                }
            }
            Statement::While(while_stmt) => {
                loop {
                    let test = self.eval_expression(&while_stmt.test, env, namespace)?;
                    if !test.is_truthy() {
                        break;
                    }
                    if let Control::Return(value) =
                        self.exec_statement(&while_stmt.body, env, namespace)?
                    {
                        return Ok(Control::Return(value));
                    }
                }
                Ok(Control::Normal)
            }
            Statement::Return(ret) => {
                let value = match &ret.argument {
                    Some(expression) => self.eval_expression(expression, env, namespace)?,
                    None => Value::Nil,
                };
                Ok(Control::Return(value))
            }
            Statement::Import(_) => Err(Error::Syntax(
                "'import' is only allowed at the top level of interactive input".into(),
            )),
            Statement::Empty => Ok(Control::Normal),
        }
    }

    fn eval_expression(
        &mut self,
        expression: &Expression,
        env: &mut Environment,
        namespace: &Arc<Namespace>,
    ) -> Result<Value, Error> {
        match expression {
            Expression::Number(n) => Ok(Value::Number(*n)),
            Expression::String(s) => Ok(Value::String(s.clone())),
            Expression::Boolean(b) => Ok(Value::Boolean(*b)),
            Expression::Nil => Ok(Value::Nil),
            Expression::Identifier(id) => self.lookup(&id.name, env, namespace),
            Expression::Unary(unary) => {
                let operand = self.eval_expression(&unary.operand, env, namespace)?;
                eval_unary(unary.operator, operand)
            }
            Expression::Binary(binary) => self.eval_binary(binary, env, namespace),
            Expression::Call(call) => {
                let callee = self.eval_expression(&call.callee, env, namespace)?;
                let mut arguments = Vec::with_capacity(call.arguments.len());
                for argument in &call.arguments {
                    arguments.push(self.eval_expression(argument, env, namespace)?);
                }
                self.call(&callee, arguments)
            }
            Expression::Member(member) => {
                let object = self.eval_expression(&member.object, env, namespace)?;
                match object {
                    Value::Module(ns) => ns.get(&member.property.name).ok_or_else(|| {
                        Error::Reference(format!(
                            "module '{}' has no member '{}'",
                            ns.name(),
                            member.property.name
                        ))
                    }),
                    other => Err(Error::Type(format!(
                        "member access on a value of type '{}'",
                        other.type_of()
                    ))),
                }
            }
        }
    }

    fn eval_binary(
        &mut self,
        binary: &BinaryExpression,
        env: &mut Environment,
        namespace: &Arc<Namespace>,
    ) -> Result<Value, Error> {
        // Short-circuiting operators evaluate the right side lazily.
        match binary.operator {
            BinaryOperator::And => {
                let left = self.eval_expression(&binary.left, env, namespace)?;
                if !left.is_truthy() {
                    return Ok(left);
                }
                return self.eval_expression(&binary.right, env, namespace);
            }
            BinaryOperator::Or => {
                let left = self.eval_expression(&binary.left, env, namespace)?;
                if left.is_truthy() {
                    return Ok(left);
                }
                return self.eval_expression(&binary.right, env, namespace);
            }
            _ => {}
        }

        let left = self.eval_expression(&binary.left, env, namespace)?;
        let right = self.eval_expression(&binary.right, env, namespace)?;

        match binary.operator {
            BinaryOperator::Add => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", left, right)))
                }
                _ => Err(type_error("+", &left, &right)),
            },
            BinaryOperator::Subtract => numeric_op(&left, &right, "-", |a, b| a - b),
            BinaryOperator::Multiply => numeric_op(&left, &right, "*", |a, b| a * b),
            BinaryOperator::Divide => numeric_op(&left, &right, "/", |a, b| a / b),
            BinaryOperator::Modulo => numeric_op(&left, &right, "%", |a, b| a % b),
            BinaryOperator::Less => numeric_cmp(&left, &right, "<", |a, b| a < b),
            BinaryOperator::LessEqual => numeric_cmp(&left, &right, "<=", |a, b| a <= b),
            BinaryOperator::Greater => numeric_cmp(&left, &right, ">", |a, b| a > b),
            BinaryOperator::GreaterEqual => numeric_cmp(&left, &right, ">=", |a, b| a >= b),
            BinaryOperator::Equal => Ok(Value::Boolean(left == right)),
            BinaryOperator::NotEqual => Ok(Value::Boolean(left != right)),
            BinaryOperator::And | BinaryOperator::Or => unreachable!("handled above"),
        }
    }

    fn lookup(
        &self,
        name: &str,
        env: &Environment,
        namespace: &Arc<Namespace>,
    ) -> Result<Value, Error> {
        if let Some(value) = env.get(name) {
            return Ok(value.clone());
        }
        if let Some(value) = namespace.get(name) {
            return Ok(value);
        }
        if let Some(value) = self.builtins.get(name) {
            return Ok(value.clone());
        }
        Err(Error::Reference(format!("'{}' is not defined", name)))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_unary(operator: UnaryOperator, operand: Value) -> Result<Value, Error> {
    match operator {
        UnaryOperator::Negate => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(Error::Type(format!(
                "cannot negate a value of type '{}'",
                other.type_of()
            ))),
        },
        UnaryOperator::Not => Ok(Value::Boolean(!operand.is_truthy())),
    }
}

fn numeric_op(
    left: &Value,
    right: &Value,
    symbol: &str,
    op: fn(f64, f64) -> f64,
) -> Result<Value, Error> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(op(*a, *b))),
        _ => Err(type_error(symbol, left, right)),
    }
}

fn numeric_cmp(
    left: &Value,
    right: &Value,
    symbol: &str,
    op: fn(f64, f64) -> bool,
) -> Result<Value, Error> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(op(*a, *b))),
        _ => Err(type_error(symbol, left, right)),
    }
}

fn type_error(symbol: &str, left: &Value, right: &Value) -> Error {
    Error::Type(format!(
        "unsupported operands for '{}': '{}' and '{}'",
        symbol,
        left.type_of(),
        right.type_of()
    ))
}

fn call_native(native: &NativeFunction, arguments: &[Value]) -> Result<Value, Error> {
    if native.arity >= 0 && arguments.len() != native.arity as usize {
        return Err(Error::Arity {
            name: native.name.to_string(),
            expected: native.arity as usize,
            found: arguments.len(),
        });
    }
    (native.func)(arguments)
}

fn default_builtins() -> FxHashMap<String, Value> {
    let mut builtins = FxHashMap::default();

    builtins.insert(
        "print".to_string(),
        Value::Native(NativeFunction {
            name: "print",
            arity: -1,
            func: |arguments| {
                let line = arguments
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{}", line);
                Ok(Value::Nil)
            },
        }),
    );

    builtins.insert(
        "str".to_string(),
        Value::Native(NativeFunction {
            name: "str",
            arity: 1,
            func: |arguments| Ok(Value::String(arguments[0].to_string())),
        }),
    );

    builtins.insert(
        "abs".to_string(),
        Value::Native(NativeFunction {
            name: "abs",
            arity: 1,
            func: |arguments| match &arguments[0] {
                Value::Number(n) => Ok(Value::Number(n.abs())),
                other => Err(Error::Type(format!(
                    "abs expects a number, found '{}'",
                    other.type_of()
                ))),
            },
        }),
    );

    builtins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn eval(source: &str) -> Result<Value, Error> {
        let namespace = Arc::new(Namespace::new("test"));
        eval_in(source, &namespace)
    }

    fn eval_in(source: &str, namespace: &Arc<Namespace>) -> Result<Value, Error> {
        let program = Parser::new(source).parse_program()?;
        Interpreter::new().eval_program(&program, namespace)
    }

    fn eval_ok(source: &str) -> Value {
        eval(source).unwrap_or_else(|e| panic!("failed to eval {:?}: {}", source, e))
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval_ok("1 + 2 * 3;"), Value::Number(7.0));
        assert_eq!(eval_ok("(1 + 2) * 3;"), Value::Number(9.0));
        assert_eq!(eval_ok("10 % 3;"), Value::Number(1.0));
        assert_eq!(eval_ok("-4 + 1;"), Value::Number(-3.0));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            eval_ok("'a' + 'b';"),
            Value::String("ab".into())
        );
        assert_eq!(
            eval_ok("'n = ' + 42;"),
            Value::String("n = 42".into())
        );
    }

    #[test]
    fn test_comparisons_and_equality() {
        assert_eq!(eval_ok("1 < 2;"), Value::Boolean(true));
        assert_eq!(eval_ok("2 <= 1;"), Value::Boolean(false));
        assert_eq!(eval_ok("'a' == 'a';"), Value::Boolean(true));
        assert_eq!(eval_ok("1 == '1';"), Value::Boolean(false));
        assert_eq!(eval_ok("nil == nil;"), Value::Boolean(true));
    }

    #[test]
    fn test_short_circuit() {
        // The right side of && is never evaluated when the left is falsy.
        assert_eq!(eval_ok("false && missing;"), Value::Boolean(false));
        assert_eq!(eval_ok("true || missing;"), Value::Boolean(true));
        assert_eq!(eval_ok("1 && 2;"), Value::Number(2.0));
        assert_eq!(eval_ok("nil || 3;"), Value::Number(3.0));
    }

    #[test]
    fn test_top_level_let_defines_in_namespace() {
        let namespace = Arc::new(Namespace::new("m"));
        eval_in("let x = 5;", &namespace).unwrap();
        assert_eq!(namespace.get("x"), Some(Value::Number(5.0)));
    }

    #[test]
    fn test_function_call() {
        assert_eq!(
            eval_ok("fn add(a, b) { return a + b; } add(1, 2);"),
            Value::Number(3.0)
        );
    }

    #[test]
    fn test_function_without_return_yields_nil() {
        assert_eq!(eval_ok("fn noop() { } noop();"), Value::Nil);
    }

    #[test]
    fn test_recursion() {
        assert_eq!(
            eval_ok("fn fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); } fib(10);"),
            Value::Number(55.0)
        );
    }

    #[test]
    fn test_while_loop() {
        assert_eq!(
            eval_ok("fn sum(n) { let total = 0; let i = 1; while (i <= n) { total = total + i; i = i + 1; } return total; } sum(4);"),
            Value::Number(10.0)
        );
    }

    #[test]
    fn test_functions_resolve_module_globals_at_call_time() {
        let namespace = Arc::new(Namespace::new("m"));
        eval_in("let k = 2; fn scale(x) { return x * k; }", &namespace).unwrap();
        assert_eq!(eval_in("scale(3);", &namespace).unwrap(), Value::Number(6.0));

        // Replacing the module constant is observed by the existing function.
        namespace.define("k", Value::Number(10.0));
        assert_eq!(eval_in("scale(3);", &namespace).unwrap(), Value::Number(30.0));
    }

    #[test]
    fn test_member_access_on_module() {
        let inner = Arc::new(Namespace::new("helpers"));
        inner.define("answer", Value::Number(42.0));

        let namespace = Arc::new(Namespace::new("repl"));
        namespace.define("helpers", Value::Module(inner));

        assert_eq!(
            eval_in("helpers.answer;", &namespace).unwrap(),
            Value::Number(42.0)
        );
        let err = eval_in("helpers.missing;", &namespace).unwrap_err();
        assert!(matches!(err, Error::Reference(_)));
    }

    #[test]
    fn test_member_access_on_non_module() {
        let err = eval("let x = 1; x.y;").unwrap_err();
        assert!(matches!(err, Error::Type(_)));
    }

    #[test]
    fn test_undefined_name() {
        let err = eval("missing;").unwrap_err();
        assert!(matches!(err, Error::Reference(_)));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = eval("fn f(a) { return a; } f(1, 2);").unwrap_err();
        assert!(matches!(err, Error::Arity { .. }));
    }

    #[test]
    fn test_calling_non_callable() {
        let err = eval("let x = 1; x();").unwrap_err();
        assert!(matches!(err, Error::Type(_)));
    }

    #[test]
    fn test_assign_to_module_binding_rejected() {
        let err = eval("let x = 1; fn bump() { x = x + 1; } bump();").unwrap_err();
        assert!(matches!(err, Error::Type(_)));
    }

    #[test]
    fn test_return_outside_function() {
        let err = eval("return 1;").unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_import_rejected_inside_block() {
        let err = eval("if (true) { import m; }").unwrap_err();
        assert!(matches!(err, Error::Syntax(_)));
    }

    #[test]
    fn test_recursion_limit() {
        let err = eval("fn loop_forever() { return loop_forever(); } loop_forever();").unwrap_err();
        assert!(matches!(err, Error::RecursionLimit));
    }

    #[test]
    fn test_builtins() {
        assert_eq!(eval_ok("str(12);"), Value::String("12".into()));
        assert_eq!(eval_ok("abs(-3);"), Value::Number(3.0));
    }
}
