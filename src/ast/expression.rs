//! Expression AST nodes.
//!
//! This module defines the expression algebra used by conditions,
//! projections, sort specifications and procedure arguments:
//! - Identifier-like leaves (property access, variables, parameters)
//! - Literals and raw text fragments
//! - Comparisons, logical combinators and negation
//! - Function calls, including aggregates
//!
//! Composite nodes never mutate their children. `&`, `|` and `!` build
//! [`Expression::Logical`] and [`Expression::Not`] nodes, and both sides of a
//! logical node are always parenthesized on output.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use smol_str::SmolStr;

use crate::ast::value::Value;

// ============================================================================
// Expression - Top-level expression type
// ============================================================================

/// Represents any expression in a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Property access (`owner.name`)
    Property {
        /// Variable owning the property.
        owner: SmolStr,
        /// Property key.
        name: SmolStr,
    },

    /// Variable reference
    Variable(SmolStr),

    /// Parameter reference (`$name`)
    Parameter(SmolStr),

    /// Literal value
    Literal(Value),

    /// Verbatim query text
    Raw(SmolStr),

    /// Comparison expression
    Comparison(ComparisonOperator, Box<Expression>, Box<Expression>),

    /// Logical expression (AND, OR)
    Logical(LogicalOperator, Box<Expression>, Box<Expression>),

    /// Negation
    Not(Box<Expression>),

    /// Function call
    FunctionCall(FunctionCall),
}

// ============================================================================
// Operators
// ============================================================================

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    NotEq,
    /// Less than (<)
    Lt,
    /// Greater than (>)
    Gt,
    /// Less than or equal (<=)
    LtEq,
    /// Greater than or equal (>=)
    GtEq,
    /// Substring test (CONTAINS)
    Contains,
    /// Prefix test (STARTS WITH)
    StartsWith,
    /// Suffix test (ENDS WITH)
    EndsWith,
    /// List membership (IN)
    In,
    /// Null test (IS)
    Is,
    /// Negated null test (IS NOT)
    IsNot,
}

impl ComparisonOperator {
    /// Returns the operator keyword or symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::NotEq => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::LtEq => "<=",
            ComparisonOperator::GtEq => ">=",
            ComparisonOperator::Contains => "CONTAINS",
            ComparisonOperator::StartsWith => "STARTS WITH",
            ComparisonOperator::EndsWith => "ENDS WITH",
            ComparisonOperator::In => "IN",
            ComparisonOperator::Is => "IS",
            ComparisonOperator::IsNot => "IS NOT",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// Logical AND
    And,
    /// Logical OR
    Or,
}

impl LogicalOperator {
    /// Returns the operator keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Expression {
    /// Property access on a variable.
    pub fn property(owner: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Expression::Property {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Variable reference.
    pub fn variable(name: impl Into<SmolStr>) -> Self {
        Expression::Variable(name.into())
    }

    /// Parameter reference, rendered with a leading `$`.
    pub fn parameter(name: impl Into<SmolStr>) -> Self {
        Expression::Parameter(name.into())
    }

    /// Literal value.
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Verbatim text, emitted as-is.
    pub fn raw(text: impl Into<SmolStr>) -> Self {
        Expression::Raw(text.into())
    }

    fn compare(self, op: ComparisonOperator, right: impl Into<Expression>) -> Self {
        Expression::Comparison(op, Box::new(self), Box::new(right.into()))
    }

    /// `self = right`
    pub fn equals(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::Eq, right)
    }

    /// `self <> right`
    pub fn not_equals(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::NotEq, right)
    }

    /// `self > right`
    pub fn gt(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::Gt, right)
    }

    /// `self < right`
    pub fn lt(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::Lt, right)
    }

    /// `self >= right`
    pub fn ge(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::GtEq, right)
    }

    /// `self <= right`
    pub fn le(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::LtEq, right)
    }

    /// `self CONTAINS right`
    pub fn contains(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::Contains, right)
    }

    /// `self STARTS WITH right`
    pub fn starts_with(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::StartsWith, right)
    }

    /// `self ENDS WITH right`
    pub fn ends_with(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::EndsWith, right)
    }

    /// `self IN right`
    pub fn in_list(self, right: impl Into<Expression>) -> Self {
        self.compare(ComparisonOperator::In, right)
    }

    /// `self IS NULL`
    pub fn is_null(self) -> Self {
        self.compare(ComparisonOperator::Is, Expression::raw("NULL"))
    }

    /// `self IS NOT NULL`
    pub fn is_not_null(self) -> Self {
        self.compare(ComparisonOperator::IsNot, Expression::raw("NULL"))
    }

    /// `(self) AND (right)`
    pub fn and(self, right: impl Into<Expression>) -> Self {
        Expression::Logical(
            LogicalOperator::And,
            Box::new(self),
            Box::new(right.into()),
        )
    }

    /// `(self) OR (right)`
    pub fn or(self, right: impl Into<Expression>) -> Self {
        Expression::Logical(LogicalOperator::Or, Box::new(self), Box::new(right.into()))
    }

    /// `NOT (self)`
    pub fn negate(self) -> Self {
        Expression::Not(Box::new(self))
    }

    /// Wraps this expression in a projection with an alias.
    pub fn alias(self, alias: impl Into<SmolStr>) -> Projection {
        Projection {
            expression: self,
            alias: Some(alias.into()),
        }
    }

    /// Ascending sort specification.
    pub fn asc(self) -> OrderSpec {
        OrderSpec {
            field: self,
            descending: false,
        }
    }

    /// Descending sort specification.
    pub fn desc(self) -> OrderSpec {
        OrderSpec {
            field: self,
            descending: true,
        }
    }
}

impl BitAnd for Expression {
    type Output = Expression;

    fn bitand(self, rhs: Expression) -> Expression {
        self.and(rhs)
    }
}

impl BitOr for Expression {
    type Output = Expression;

    fn bitor(self, rhs: Expression) -> Expression {
        self.or(rhs)
    }
}

impl Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        self.negate()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Property { owner, name } => write!(f, "{owner}.{name}"),
            Expression::Variable(name) => f.write_str(name),
            Expression::Parameter(name) => write!(f, "${name}"),
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::Raw(text) => f.write_str(text),
            Expression::Comparison(op, left, right) => {
                write!(f, "{left} {} {right}", op.as_str())
            }
            Expression::Logical(op, left, right) => {
                write!(f, "({left}) {} ({right})", op.as_str())
            }
            Expression::Not(inner) => write!(f, "NOT ({inner})"),
            Expression::FunctionCall(call) => write!(f, "{call}"),
        }
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Literal(value)
    }
}

impl From<FunctionCall> for Expression {
    fn from(call: FunctionCall) -> Self {
        Expression::FunctionCall(call)
    }
}

macro_rules! expression_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Expression {
                fn from(v: $t) -> Self {
                    Expression::Literal(Value::from(v))
                }
            }
        )*
    };
}

expression_from_literal!(i32, i64, u32, u64, usize, f64, bool, &str, String);

impl<T: Into<Value>> From<Vec<T>> for Expression {
    fn from(items: Vec<T>) -> Self {
        Expression::Literal(Value::list(items))
    }
}

// ============================================================================
// Function Calls
// ============================================================================

/// Function call (`name(DISTINCT? args)`)
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Function name, possibly namespaced.
    pub name: SmolStr,
    /// Positional arguments.
    pub args: Vec<Expression>,
    /// Whether the arguments are prefixed with DISTINCT.
    pub distinct: bool,
}

impl FunctionCall {
    /// Creates a call with the given arguments.
    pub fn new<I, E>(name: impl Into<SmolStr>, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expression>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            distinct: false,
        }
    }

    /// Marks the call as DISTINCT.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Wraps this call in a projection with an alias.
    pub fn alias(self, alias: impl Into<SmolStr>) -> Projection {
        Expression::FunctionCall(self).alias(alias)
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() && self.name.eq_ignore_ascii_case("count") {
            return write!(f, "{}(*)", self.name);
        }
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write_joined(f, &self.args)?;
        f.write_str(")")
    }
}

// ============================================================================
// Projections and Sort Specifications
// ============================================================================

/// A RETURN / WITH item: an expression with an optional alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Projected expression.
    pub expression: Expression,
    /// Output name.
    pub alias: Option<SmolStr>,
}

impl Projection {
    /// Unaliased projection.
    pub fn new(expression: impl Into<Expression>) -> Self {
        Self {
            expression: expression.into(),
            alias: None,
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {alias}", self.expression),
            None => write!(f, "{}", self.expression),
        }
    }
}

impl From<Expression> for Projection {
    fn from(expression: Expression) -> Self {
        Projection::new(expression)
    }
}

impl From<FunctionCall> for Projection {
    fn from(call: FunctionCall) -> Self {
        Projection::new(call)
    }
}

/// Plain strings are emitted verbatim.
impl From<&str> for Projection {
    fn from(text: &str) -> Self {
        Projection::new(Expression::raw(text))
    }
}

impl From<String> for Projection {
    fn from(text: String) -> Self {
        Projection::new(Expression::raw(text))
    }
}

impl From<SmolStr> for Projection {
    fn from(text: SmolStr) -> Self {
        Projection::new(Expression::Raw(text))
    }
}

/// `(expression, alias)` pairs, both as verbatim text.
impl From<(&str, &str)> for Projection {
    fn from((expression, alias): (&str, &str)) -> Self {
        Expression::raw(expression).alias(alias)
    }
}

/// ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpec {
    /// Sort key.
    pub field: Expression,
    /// Sort descending.
    pub descending: bool,
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if self.descending {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

impl From<Expression> for OrderSpec {
    fn from(field: Expression) -> Self {
        field.asc()
    }
}

impl From<&str> for OrderSpec {
    fn from(text: &str) -> Self {
        Expression::raw(text).asc()
    }
}

impl From<String> for OrderSpec {
    fn from(text: String) -> Self {
        Expression::raw(text).asc()
    }
}

/// GROUP BY key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey(pub Expression);

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Expression> for GroupKey {
    fn from(expression: Expression) -> Self {
        GroupKey(expression)
    }
}

impl From<&str> for GroupKey {
    fn from(text: &str) -> Self {
        GroupKey(Expression::raw(text))
    }
}

impl From<String> for GroupKey {
    fn from(text: String) -> Self {
        GroupKey(Expression::raw(text))
    }
}

/// Writes displayable items joined by `, `.
pub(crate) fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Joins displayable items with `, ` into a new string.
pub(crate) fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
