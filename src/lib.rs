//! Immutable, chainable Cypher query builder.
//!
//! This library assembles an abstract syntax tree of expressions, graph
//! patterns and query clauses through a value-typed builder API, then
//! serializes it deterministically into Cypher text. Construction errors are
//! reported as [`BuildError`] diagnostics built on miette.
//!
//! # Example
//!
//! ```
//! use cypher_builder::prelude::*;
//!
//! let person = node("Person").named("p");
//! let query = match_([person])
//!     .where_(prop("p", "age").gt(literal(25)))
//!     .return_(["p.name", "p.age"]);
//!
//! assert_eq!(
//!     query.to_text(),
//!     "MATCH (p:Person)\nWHERE p.age > 25\nRETURN p.name, p.age"
//! );
//! ```
//!
//! Anonymous nodes are named only when something refers to them:
//!
//! ```
//! use cypher_builder::prelude::*;
//!
//! let names = IdentifierAllocator::new();
//! let person = names.node("Person");
//! let query = match_([&person]).return_([&person]);
//!
//! assert_eq!(query.to_text(), "MATCH (_node_bolden:Person)\nRETURN _node_bolden");
//! ```

pub mod api;
pub mod ast;
pub mod config;
pub mod error;
pub mod query;

// Re-export the construction API at the crate root.
pub use api::*;

pub use config::{NamingConfig, RenderConfig};
pub use error::{BuildError, Result};
pub use query::{CompoundQuery, QueryBuilder, SetOperator};

/// Builds a [`PathPattern`](crate::ast::PathPattern) from mixed nodes,
/// relationships and paths.
///
/// ```
/// use cypher_builder::prelude::*;
///
/// let p = path![
///     node("Person").named("a"),
///     relationship(Direction::Right).with_type("KNOWS"),
///     node("Person").named("b"),
/// ];
/// assert_eq!(p.to_string(), "(a:Person)-[:KNOWS]->(b:Person)");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::ast::PathPattern::default()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::ast::PathPattern::new([$($crate::ast::PathItem::from($item)),+])
    };
}

/// Glob-importable set of constructors and core types.
pub mod prelude {
    pub use crate::api::*;
    pub use crate::ast::{
        Clause, DegreeConstraint, Direction, Expression, FunctionCall, IdentifierAllocator, LabelExpr,
        Labels, NodePattern, OrderSpec, PathPattern, Pattern, Projection, QuantifiedPathPattern,
        RelationshipPattern, SubqueryScope, Value,
    };
    pub use crate::error::BuildError;
    pub use crate::path;
    pub use crate::query::{CompoundQuery, QueryBuilder};
    pub use crate::{NamingConfig, RenderConfig};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_accessible() {
        let q: QueryBuilder = query();
        assert!(q.is_empty());
        let _config = RenderConfig::default();
        let _err: BuildError = BuildError::EmptyYield;
    }

    #[test]
    fn path_macro_flattens_and_separates() {
        let names = ast::IdentifierAllocator::new();
        let inner = path![names.node("B").named("b")];
        let p = path![names.node("A").named("a"), inner];
        assert_eq!(p.to_string(), "(a:A)--(b:B)");
        assert!(path![].is_empty());
    }
}
