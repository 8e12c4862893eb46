//! Error model for AST construction.
//!
//! Every failure in this crate is a synchronous usage error raised while a
//! node is being built. Errors carry a stable diagnostic code and a help hint
//! so they render well through miette.

use miette::{Diagnostic, Report};
use thiserror::Error;

/// Convenience alias used by every fallible constructor.
pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// An error raised while assembling a Cypher AST.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BuildError {
    /// `relates_to` was called with an empty relationship type.
    #[error("relationship type is required")]
    #[diagnostic(
        code(cypher::pattern::empty_relationship_type),
        help("pass a non-empty type such as \"KNOWS\"")
    )]
    EmptyRelationshipType,

    /// A quantifier was requested without any bound.
    #[error("at least one of the minimum or maximum quantifier bounds must be specified")]
    #[diagnostic(
        code(cypher::pattern::missing_quantifier_bounds),
        help("use `one_or_more()` or `zero_or_more()` for unbounded repetition")
    )]
    MissingQuantifierBounds,

    /// The lower quantifier bound exceeds the upper one.
    #[error("quantifier minimum {min} is greater than maximum {max}")]
    #[diagnostic(code(cypher::pattern::invalid_quantifier_range))]
    InvalidQuantifierRange {
        /// Requested lower bound.
        min: u32,
        /// Requested upper bound.
        max: u32,
    },

    /// A WHERE condition was attached to a path ending in a relationship.
    #[error("cannot add condition to incomplete path")]
    #[diagnostic(
        code(cypher::pattern::incomplete_path),
        help("finish the path with a node pattern before filtering it")
    )]
    IncompletePath,

    /// Concatenation would place two relationships next to each other.
    #[error("cannot append a relationship to a path ending with a relationship")]
    #[diagnostic(code(cypher::pattern::relationship_after_relationship))]
    RelationshipAfterRelationship,

    /// Two patterns of incompatible kinds were combined with `+`.
    #[error("cannot add {right} to {left}")]
    #[diagnostic(
        code(cypher::pattern::unsupported_operand),
        help("only nodes, relationships and plain paths can be concatenated")
    )]
    UnsupportedOperand {
        /// Kind of the left-hand operand.
        left: &'static str,
        /// Kind of the right-hand operand.
        right: &'static str,
    },

    /// A degree constraint was requested on a node without an identifier.
    #[error("variable name is required for degree constraints")]
    #[diagnostic(
        code(cypher::pattern::degree_without_identifier),
        help("name the node with `named(..)` before constraining its degree")
    )]
    DegreeConstraintWithoutIdentifier,

    /// Degree direction or type was given without a maximum.
    #[error("max_degree must be provided when using degree constraints")]
    #[diagnostic(code(cypher::pattern::missing_max_degree))]
    MissingMaxDegree,

    /// YIELD without columns and without wildcard.
    #[error("YIELD clause requires either columns or wildcard")]
    #[diagnostic(code(cypher::clause::empty_yield))]
    EmptyYield,

    /// YIELD with both columns and wildcard.
    #[error("cannot specify both wildcard and columns in YIELD clause")]
    #[diagnostic(code(cypher::clause::conflicting_yield))]
    ConflictingYield,

    /// A YIELD column with an empty name.
    #[error("YIELD column name cannot be empty")]
    #[diagnostic(code(cypher::clause::empty_yield_column))]
    EmptyYieldColumn,

    /// USE with an empty database name.
    #[error("database name cannot be empty")]
    #[diagnostic(
        code(cypher::clause::empty_database_name),
        help("pass a database name or a parameter expression")
    )]
    EmptyDatabaseName,

    /// CALL with an empty procedure name.
    #[error("procedure name cannot be empty")]
    #[diagnostic(code(cypher::clause::empty_procedure_name))]
    EmptyProcedureName,
}

impl BuildError {
    /// Converts this error into a miette report for rich rendering.
    pub fn to_report(&self) -> Report {
        Report::new(self.clone())
    }
}
