//! Free constructor functions.
//!
//! These are thin wrappers over the AST constructors, meant to be glob
//! imported:
//!
//! ```
//! use cypher_builder::prelude::*;
//!
//! let p = node("Person").named("p");
//! let q = match_([p]).where_(prop("p", "age").gt(literal(25))).return_(["p.name"]);
//! assert_eq!(q.to_text(), "MATCH (p:Person)\nWHERE p.age > 25\nRETURN p.name");
//! ```

use smol_str::SmolStr;

use crate::ast::{
    Database, Direction, Expression, FunctionCall, IdentifierAllocator, LabelExpr, Labels,
    NodePattern, OrderSpec, PathItem, PathPattern, Pattern, RelationshipPattern, SubqueryScope,
    Value,
};
use crate::error::Result;
use crate::query::QueryBuilder;

// ============================================================================
// Patterns
// ============================================================================

/// Anonymous node with `labels`, named lazily from the shared allocator.
pub fn node(labels: impl Into<Labels>) -> NodePattern {
    IdentifierAllocator::shared().node(labels)
}

/// Anonymous unlabeled node.
pub fn any_node() -> NodePattern {
    NodePattern::new()
}

/// Anonymous untyped relationship.
pub fn relationship(direction: Direction) -> RelationshipPattern {
    RelationshipPattern::new(direction)
}

/// Path from nodes, relationships and nested paths.
pub fn path<I>(items: I) -> PathPattern
where
    I: IntoIterator,
    I::Item: Into<PathItem>,
{
    PathPattern::new(items)
}

/// Label atom for label expressions.
pub fn label(text: impl Into<SmolStr>) -> LabelExpr {
    LabelExpr::atom(text)
}

// ============================================================================
// Expressions
// ============================================================================

/// `owner.name`
pub fn prop(owner: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Expression {
    Expression::property(owner, name)
}

/// Variable reference.
pub fn var(name: impl Into<SmolStr>) -> Expression {
    Expression::variable(name)
}

/// `$name`
pub fn param(name: impl Into<SmolStr>) -> Expression {
    Expression::parameter(name)
}

/// Literal value.
pub fn literal(value: impl Into<Value>) -> Expression {
    Expression::literal(value)
}

/// Verbatim query text.
pub fn raw(text: impl Into<SmolStr>) -> Expression {
    Expression::raw(text)
}

/// Ascending sort key.
pub fn asc(field: impl Into<OrderSpec>) -> OrderSpec {
    let mut spec = field.into();
    spec.descending = false;
    spec
}

/// Descending sort key.
pub fn desc(field: impl Into<OrderSpec>) -> OrderSpec {
    let mut spec = field.into();
    spec.descending = true;
    spec
}

fn aggregate(name: &'static str, arg: impl Into<Expression>) -> Expression {
    Expression::FunctionCall(FunctionCall::new(name, [arg.into()]))
}

/// `count(expr)`
pub fn count(arg: impl Into<Expression>) -> Expression {
    aggregate("count", arg)
}

/// `count(*)`
pub fn count_all() -> Expression {
    Expression::FunctionCall(FunctionCall::new("count", Vec::<Expression>::new()))
}

/// `count(DISTINCT expr)`
pub fn count_distinct(arg: impl Into<Expression>) -> Expression {
    Expression::FunctionCall(FunctionCall::new("count", [arg.into()]).distinct())
}

/// `sum(expr)`
pub fn sum(arg: impl Into<Expression>) -> Expression {
    aggregate("sum", arg)
}

/// `avg(expr)`
pub fn avg(arg: impl Into<Expression>) -> Expression {
    aggregate("avg", arg)
}

/// `min(expr)`
pub fn min(arg: impl Into<Expression>) -> Expression {
    aggregate("min", arg)
}

/// `max(expr)`
pub fn max(arg: impl Into<Expression>) -> Expression {
    aggregate("max", arg)
}

/// `collect(expr)`
pub fn collect(arg: impl Into<Expression>) -> Expression {
    aggregate("collect", arg)
}

// ============================================================================
// Query entry points
// ============================================================================

/// Empty query.
pub fn query() -> QueryBuilder {
    QueryBuilder::new()
}

/// Query starting with `MATCH`.
pub fn match_<I>(patterns: I) -> QueryBuilder
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    QueryBuilder::new().match_(patterns)
}

/// Query starting with `OPTIONAL MATCH`.
pub fn optional_match<I>(patterns: I) -> QueryBuilder
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    QueryBuilder::new().optional_match(patterns)
}

/// Query starting with `CALL name(args)`.
pub fn call_procedure<I>(name: impl Into<SmolStr>, args: I) -> Result<QueryBuilder>
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    QueryBuilder::new().call_procedure(name, args)
}

/// Query starting with `OPTIONAL CALL name(args)`.
pub fn optional_call_procedure<I>(name: impl Into<SmolStr>, args: I) -> Result<QueryBuilder>
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    QueryBuilder::new().optional_call_procedure(name, args)
}

/// Query starting with a `CALL(scope) { }` subquery.
pub fn call_subquery(query: QueryBuilder, scope: SubqueryScope) -> QueryBuilder {
    QueryBuilder::new().call_subquery(query, scope)
}

/// Query starting with `UNWIND`.
pub fn unwind(expression: impl Into<Expression>, variable: impl Into<SmolStr>) -> QueryBuilder {
    QueryBuilder::new().unwind(expression, variable)
}

/// Query starting with `USE`.
pub fn use_(database: impl Into<Database>) -> Result<QueryBuilder> {
    QueryBuilder::new().use_(database)
}
