//! Query clause AST nodes.
//!
//! Each clause renders to one line, or to a bracketed block for `CALL { }`
//! subqueries, prefixed with the current indentation.

use std::fmt;

use smol_str::SmolStr;

use crate::ast::expression::{Expression, GroupKey, OrderSpec, Projection, join};
use crate::ast::pattern::Pattern;
use crate::config::RenderConfig;
use crate::error::{BuildError, Result};
use crate::query::QueryBuilder;

// ============================================================================
// Clause - Top-level clause type
// ============================================================================

/// A single query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// MATCH patterns
    Match(Vec<Pattern>),
    /// OPTIONAL MATCH patterns
    OptionalMatch(Vec<Pattern>),
    /// WHERE condition
    Where(Expression),
    /// WITH projections
    With(ProjectionList),
    /// RETURN projections
    Return(ProjectionList),
    /// GROUP BY keys
    GroupBy(Vec<GroupKey>),
    /// ORDER BY sort specifications
    OrderBy(Vec<OrderSpec>),
    /// SKIP count
    Skip(Count),
    /// LIMIT count
    Limit(Count),
    /// UNWIND list AS variable
    Unwind {
        /// List expression.
        expression: Expression,
        /// Row variable.
        variable: SmolStr,
    },
    /// USE database
    Use(Database),
    /// Procedure call
    CallProcedure(ProcedureCall),
    /// Standalone YIELD
    Yield(YieldClause),
    /// CALL { } subquery
    CallSubquery(Subquery),
    /// NEXT (linear composition)
    Next,
}

impl Clause {
    /// Position among pagination clauses, `None` for every other clause.
    pub fn pagination_rank(&self) -> Option<u8> {
        match self {
            Clause::OrderBy(_) => Some(0),
            Clause::Skip(_) => Some(1),
            Clause::Limit(_) => Some(2),
            _ => None,
        }
    }

    /// Returns true for clauses that already project rows.
    pub fn is_projection(&self) -> bool {
        matches!(
            self,
            Clause::Return(_) | Clause::With(_) | Clause::CallSubquery(_)
        )
    }

    /// Returns true if `other` is the same kind of clause.
    pub fn same_kind(&self, other: &Clause) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Renders the clause with `indent` before every line.
    pub fn render(&self, indent: &str, config: &RenderConfig) -> String {
        match self {
            Clause::CallSubquery(subquery) => subquery.render(indent, config),
            Clause::CallProcedure(call) => call.render(indent),
            other => format!("{indent}{other}"),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Match(patterns) => write!(f, "MATCH {}", join(patterns)),
            Clause::OptionalMatch(patterns) => write!(f, "OPTIONAL MATCH {}", join(patterns)),
            Clause::Where(condition) => write!(f, "WHERE {condition}"),
            Clause::With(list) => write!(f, "WITH{list}"),
            Clause::Return(list) => write!(f, "RETURN{list}"),
            Clause::GroupBy(keys) => write!(f, "GROUP BY {}", join(keys)),
            Clause::OrderBy(specs) => write!(f, "ORDER BY {}", join(specs)),
            Clause::Skip(count) => write!(f, "SKIP {count}"),
            Clause::Limit(count) => write!(f, "LIMIT {count}"),
            Clause::Unwind {
                expression,
                variable,
            } => write!(f, "UNWIND {expression} AS {variable}"),
            Clause::Use(database) => write!(f, "USE {database}"),
            Clause::CallProcedure(call) => write!(f, "{}", call.render("")),
            Clause::Yield(yield_clause) => write!(f, "{yield_clause}"),
            Clause::CallSubquery(subquery) => {
                write!(f, "{}", subquery.render("", &RenderConfig::default()))
            }
            Clause::Next => f.write_str("NEXT"),
        }
    }
}

// ============================================================================
// Clause payloads
// ============================================================================

/// Projection items of a WITH or RETURN clause. An empty list projects `*`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectionList {
    /// Projected items.
    pub items: Vec<Projection>,
    /// Whether DISTINCT is applied.
    pub distinct: bool,
}

impl ProjectionList {
    /// Builds a projection list from anything convertible to projections.
    pub fn new<I>(items: I, distinct: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Projection>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            distinct,
        }
    }
}

impl fmt::Display for ProjectionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        if self.items.is_empty() {
            return f.write_str(" *");
        }
        write!(f, " {}", join(&self.items))
    }
}

/// SKIP / LIMIT argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Count {
    /// Integer literal
    Value(i64),
    /// Any expression, typically a parameter
    Expr(Expression),
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Value(n) => write!(f, "{n}"),
            Count::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

macro_rules! count_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Count {
                fn from(n: $t) -> Self {
                    Count::Value(i64::from(n))
                }
            }
        )*
    };
}

count_from_int!(i32, i64, u8, u16, u32);

impl From<Expression> for Count {
    fn from(expr: Expression) -> Self {
        Count::Expr(expr)
    }
}

/// Target of a USE clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Database {
    /// Database name, emitted verbatim
    Name(SmolStr),
    /// Database expression such as a parameter or `graph.byName(..)`
    Expr(Expression),
}

impl Database {
    pub(crate) fn validate(self) -> Result<Self> {
        match &self {
            Database::Name(name) if name.is_empty() => Err(BuildError::EmptyDatabaseName),
            _ => Ok(self),
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Database::Name(name) => f.write_str(name),
            Database::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

impl From<&str> for Database {
    fn from(name: &str) -> Self {
        Database::Name(SmolStr::new(name))
    }
}

impl From<String> for Database {
    fn from(name: String) -> Self {
        Database::Name(SmolStr::from(name))
    }
}

impl From<Expression> for Database {
    fn from(expr: Expression) -> Self {
        Database::Expr(expr)
    }
}

// ============================================================================
// Procedures
// ============================================================================

/// One YIELD column, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldItem {
    /// Procedure output column.
    pub column: SmolStr,
    /// Local name.
    pub alias: Option<SmolStr>,
}

impl fmt::Display for YieldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {alias}", self.column),
            None => f.write_str(&self.column),
        }
    }
}

impl From<&str> for YieldItem {
    fn from(column: &str) -> Self {
        Self {
            column: SmolStr::new(column),
            alias: None,
        }
    }
}

impl From<(&str, &str)> for YieldItem {
    fn from((column, alias): (&str, &str)) -> Self {
        Self {
            column: SmolStr::new(column),
            alias: Some(SmolStr::new(alias)),
        }
    }
}

/// YIELD specification: either `*` or a non-empty column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldClause {
    items: Vec<YieldItem>,
    wildcard: bool,
}

impl YieldClause {
    /// Validates and builds a YIELD clause.
    pub fn new(items: Vec<YieldItem>, wildcard: bool) -> Result<Self> {
        match (items.is_empty(), wildcard) {
            (true, false) => return Err(BuildError::EmptyYield),
            (false, true) => return Err(BuildError::ConflictingYield),
            _ => {}
        }
        if items.iter().any(|item| item.column.is_empty()) {
            return Err(BuildError::EmptyYieldColumn);
        }
        Ok(Self { items, wildcard })
    }

    /// `YIELD col, col AS alias`
    pub fn columns<I>(items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<YieldItem>,
    {
        Self::new(items.into_iter().map(Into::into).collect(), false)
    }

    /// `YIELD *`
    pub fn wildcard() -> Self {
        Self {
            items: Vec::new(),
            wildcard: true,
        }
    }

    /// Yielded columns; empty for a wildcard.
    pub fn items(&self) -> &[YieldItem] {
        &self.items
    }

    /// Returns true for `YIELD *`.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }
}

impl fmt::Display for YieldClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wildcard {
            f.write_str("YIELD *")
        } else {
            write!(f, "YIELD {}", join(&self.items))
        }
    }
}

/// `(OPTIONAL) CALL name(args)` with an optional attached YIELD.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    /// Qualified procedure name.
    pub name: SmolStr,
    /// Arguments; strings render quoted.
    pub args: Vec<Expression>,
    /// OPTIONAL CALL.
    pub optional: bool,
    /// Attached YIELD, rendered on the following line.
    pub yield_clause: Option<YieldClause>,
}

impl ProcedureCall {
    /// Builds a call. The procedure name must not be empty.
    pub fn new<I>(name: impl Into<SmolStr>, args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(BuildError::EmptyProcedureName);
        }
        Ok(Self {
            name,
            args: args.into_iter().map(Into::into).collect(),
            optional: false,
            yield_clause: None,
        })
    }

    /// Marks the call OPTIONAL.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Attaches a YIELD clause.
    pub fn with_yield(mut self, yield_clause: YieldClause) -> Self {
        self.yield_clause = Some(yield_clause);
        self
    }

    fn render(&self, indent: &str) -> String {
        let keyword = if self.optional { "OPTIONAL CALL" } else { "CALL" };
        let mut out = format!("{indent}{keyword} {}({})", self.name, join(&self.args));
        if let Some(yield_clause) = &self.yield_clause {
            out.push('\n');
            out.push_str(indent);
            out.push_str(&yield_clause.to_string());
        }
        out
    }
}

// ============================================================================
// Subqueries
// ============================================================================

/// Variables imported into a `CALL { }` subquery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubqueryScope {
    /// `CALL()`
    #[default]
    None,
    /// `CALL(*)`
    All,
    /// `CALL(a, b)`
    Variables(Vec<SmolStr>),
}

impl SubqueryScope {
    /// Explicit variable list. An empty list imports nothing.
    pub fn variables<I>(variables: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SmolStr>,
    {
        let variables: Vec<SmolStr> = variables.into_iter().map(Into::into).collect();
        if variables.is_empty() {
            SubqueryScope::None
        } else {
            SubqueryScope::Variables(variables)
        }
    }
}

impl fmt::Display for SubqueryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubqueryScope::None => Ok(()),
            SubqueryScope::All => f.write_str("*"),
            SubqueryScope::Variables(vars) => f.write_str(&vars.join(", ")),
        }
    }
}

/// `(OPTIONAL) CALL(scope) { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    /// Nested query.
    pub query: Box<QueryBuilder>,
    /// Imported variables.
    pub scope: SubqueryScope,
    /// OPTIONAL CALL.
    pub optional: bool,
}

impl Subquery {
    /// Wraps `query` with the given scope.
    pub fn new(query: QueryBuilder, scope: SubqueryScope) -> Self {
        Self {
            query: Box::new(query),
            scope,
            optional: false,
        }
    }

    /// Marks the subquery OPTIONAL.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    fn render(&self, indent: &str, config: &RenderConfig) -> String {
        let keyword = if self.optional { "OPTIONAL CALL" } else { "CALL" };
        let inner_indent = format!("{indent}{}", config.indent_unit);
        let body = self.query.render_indented(&inner_indent, config);
        if body.is_empty() {
            return format!("{indent}{keyword}({}) {{\n{indent}}}", self.scope);
        }
        format!("{indent}{keyword}({}) {{\n{body}\n{indent}}}", self.scope)
    }
}
