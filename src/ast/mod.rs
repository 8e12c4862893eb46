//! AST node families and their Cypher text form.

pub mod clause;
pub mod expression;
pub mod label;
pub mod naming;
pub mod pattern;
pub mod value;

// Re-export expression types
pub use expression::{
    ComparisonOperator, Expression, FunctionCall, GroupKey, LogicalOperator, OrderSpec, Projection,
};

// Re-export pattern types
pub use label::{LabelExpr, Labels};
pub use pattern::{
    DegreeConstraint, DegreeDirection, Direction, NodePattern, PathElement, PathItem, PathPattern,
    Pattern, QuantifiedPathPattern, Quantifier, RelationshipPattern,
};

// Re-export clause types
pub use clause::{
    Clause, Count, Database, ProcedureCall, ProjectionList, Subquery, SubqueryScope, YieldClause,
    YieldItem,
};

pub use naming::{IdentifierAllocator, LazyIdentifier};
pub use value::Value;
