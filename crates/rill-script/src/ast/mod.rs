//! Abstract Syntax Tree (AST) definitions for rill.

/// A complete rill program: a sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The statements in the program
    pub body: Vec<Statement>,
}

/// An identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The name of the identifier
    pub name: String,
}

/// A rill statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Constant binding: `let name = expr;`
    Let(LetStatement),
    /// Function declaration: `fn name(params) { ... }`
    Function(FunctionDeclaration),
    /// Assignment to a local: `name = expr;`
    Assign(AssignStatement),
    /// Expression statement
    Expression(ExpressionStatement),
    /// Block statement { ... }
    Block(BlockStatement),
    /// If statement
    If(IfStatement),
    /// While statement
    While(WhileStatement),
    /// Return statement
    Return(ReturnStatement),
    /// Import directive: `import name;` (handled by the host)
    Import(Identifier),
    /// Empty statement (;)
    Empty,
}

/// A `let` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    /// The identifier being bound
    pub id: Identifier,
    /// The initializer expression
    pub init: Expression,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The function name
    pub id: Identifier,
    /// The parameters
    pub params: Vec<Identifier>,
    /// The function body
    pub body: Vec<Statement>,
}

/// An assignment statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement {
    /// The identifier being assigned
    pub id: Identifier,
    /// The new value
    pub value: Expression,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Expression,
}

/// A block statement.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// The statements in the block
    pub body: Vec<Statement>,
}

/// An if statement.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// The condition
    pub test: Expression,
    /// The then branch
    pub consequent: Box<Statement>,
    /// The optional else branch
    pub alternate: Option<Box<Statement>>,
}

/// A while statement.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// The condition
    pub test: Expression,
    /// The loop body
    pub body: Box<Statement>,
}

/// A return statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// The optional return value
    pub argument: Option<Expression>,
}

/// A rill expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Numeric literal
    Number(f64),
    /// String literal
    String(String),
    /// Boolean literal
    Boolean(bool),
    /// nil literal
    Nil,
    /// Identifier reference
    Identifier(Identifier),
    /// Unary expression
    Unary(UnaryExpression),
    /// Binary expression
    Binary(BinaryExpression),
    /// Call expression
    Call(CallExpression),
    /// Member access: `module.member`
    Member(MemberExpression),
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (-)
    Negate,
    /// Logical not (!)
    Not,
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub operand: Box<Expression>,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (+); concatenation when either side is a string
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Remainder (%)
    Modulo,
    /// Less than (<)
    Less,
    /// Less than or equal (<=)
    LessEqual,
    /// Greater than (>)
    Greater,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Equality (==)
    Equal,
    /// Inequality (!=)
    NotEqual,
    /// Logical and (&&), short-circuiting
    And,
    /// Logical or (||), short-circuiting
    Or,
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// The operator
    pub operator: BinaryOperator,
    /// The left operand
    pub left: Box<Expression>,
    /// The right operand
    pub right: Box<Expression>,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// The callee
    pub callee: Box<Expression>,
    /// The arguments
    pub arguments: Vec<Expression>,
}

/// A member access expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// The object (a module reference)
    pub object: Box<Expression>,
    /// The member name
    pub property: Identifier,
}
