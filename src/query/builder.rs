//! Immutable, chainable query assembler.
//!
//! Every builder method consumes the builder and returns a new one with one
//! clause appended. `use_`, `skip` and `limit` replace an earlier clause of the
//! same kind instead, and USE always moves to the front.
//!
//! Assembly partitions the clauses into pagination (ORDER BY, SKIP, LIMIT)
//! and everything else, sorts pagination into ORDER BY, SKIP, LIMIT order, and
//! adds an implicit `RETURN *` when pagination is present but nothing
//! projects rows.

use std::fmt;

use smol_str::SmolStr;
use tracing::debug;

use crate::ast::clause::{
    Clause, Count, Database, ProcedureCall, ProjectionList, Subquery, SubqueryScope, YieldClause,
    YieldItem,
};
use crate::ast::expression::{Expression, GroupKey, OrderSpec, Projection};
use crate::ast::pattern::Pattern;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::query::compound::{CompoundQuery, SetOperator};

/// Ordered, immutable list of clauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
}

impl QueryBuilder {
    /// Empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clauses in call order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns true if no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Appends a clause.
    pub fn push(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    fn replace(mut self, clause: Clause) -> Self {
        match self.clauses.iter().position(|c| c.same_kind(&clause)) {
            Some(index) => {
                debug!(clause = %clause, "replacing earlier clause");
                self.clauses.retain(|c| !c.same_kind(&clause));
                self.clauses.insert(index.min(self.clauses.len()), clause);
            }
            None => self.clauses.push(clause),
        }
        self
    }

    fn push_patterns(self, patterns: Vec<Pattern>, clause: fn(Vec<Pattern>) -> Clause) -> Self {
        if patterns.is_empty() {
            debug!("skipping MATCH without patterns");
            return self;
        }
        self.push(clause(patterns))
    }

    /// `MATCH p1, p2, ...`
    ///
    /// An empty pattern list adds nothing.
    pub fn match_<I>(self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Pattern>,
    {
        let patterns = patterns.into_iter().map(Into::into).collect();
        self.push_patterns(patterns, Clause::Match)
    }

    /// `OPTIONAL MATCH p1, p2, ...`
    ///
    /// An empty pattern list adds nothing.
    pub fn optional_match<I>(self, patterns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Pattern>,
    {
        let patterns = patterns.into_iter().map(Into::into).collect();
        self.push_patterns(patterns, Clause::OptionalMatch)
    }

    /// `WHERE condition`
    pub fn where_(self, condition: Expression) -> Self {
        self.push(Clause::Where(condition))
    }

    /// `WITH items`, or `WITH *` when `items` is empty.
    pub fn with<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Projection>,
    {
        self.push(Clause::With(ProjectionList::new(items, false)))
    }

    /// `WITH DISTINCT items`
    pub fn with_distinct<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Projection>,
    {
        self.push(Clause::With(ProjectionList::new(items, true)))
    }

    /// `RETURN items`, or `RETURN *` when `items` is empty.
    pub fn return_<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Projection>,
    {
        self.push(Clause::Return(ProjectionList::new(items, false)))
    }

    /// `RETURN DISTINCT items`
    pub fn return_distinct<I>(self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Projection>,
    {
        self.push(Clause::Return(ProjectionList::new(items, true)))
    }

    /// `GROUP BY keys`
    pub fn group_by<I>(self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<GroupKey>,
    {
        self.push(Clause::GroupBy(keys.into_iter().map(Into::into).collect()))
    }

    /// `ORDER BY specs`
    pub fn order_by<I>(self, specs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderSpec>,
    {
        self.push(Clause::OrderBy(specs.into_iter().map(Into::into).collect()))
    }

    /// `SKIP count`, replacing any earlier SKIP.
    pub fn skip(self, count: impl Into<Count>) -> Self {
        self.replace(Clause::Skip(count.into()))
    }

    /// `LIMIT count`, replacing any earlier LIMIT.
    pub fn limit(self, count: impl Into<Count>) -> Self {
        self.replace(Clause::Limit(count.into()))
    }

    /// `UNWIND expression AS variable`
    pub fn unwind(self, expression: impl Into<Expression>, variable: impl Into<SmolStr>) -> Self {
        self.push(Clause::Unwind {
            expression: expression.into(),
            variable: variable.into(),
        })
    }

    /// `USE database`, replacing any earlier USE and moving it to the front.
    pub fn use_(mut self, database: impl Into<Database>) -> Result<Self> {
        let database = database.into().validate()?;
        let before = self.clauses.len();
        self.clauses.retain(|c| !matches!(c, Clause::Use(_)));
        if self.clauses.len() != before {
            debug!(database = %database, "replacing earlier USE clause");
        }
        self.clauses.insert(0, Clause::Use(database));
        Ok(self)
    }

    /// `CALL name(args)`
    pub fn call_procedure<I>(self, name: impl Into<SmolStr>, args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let call = ProcedureCall::new(name, args)?;
        Ok(self.push(Clause::CallProcedure(call)))
    }

    /// `OPTIONAL CALL name(args)`
    pub fn optional_call_procedure<I>(self, name: impl Into<SmolStr>, args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let call = ProcedureCall::new(name, args)?.optional();
        Ok(self.push(Clause::CallProcedure(call)))
    }

    /// `YIELD columns`
    ///
    /// Attaches to the immediately preceding procedure call when it has no
    /// YIELD yet; otherwise appends a standalone YIELD clause.
    pub fn yield_<I>(self, items: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<YieldItem>,
    {
        let yield_clause = YieldClause::columns(items)?;
        Ok(self.attach_yield(yield_clause))
    }

    /// `YIELD *`
    pub fn yield_all(self) -> Self {
        self.attach_yield(YieldClause::wildcard())
    }

    fn attach_yield(mut self, yield_clause: YieldClause) -> Self {
        if let Some(Clause::CallProcedure(call)) = self.clauses.last_mut() {
            if call.yield_clause.is_none() {
                call.yield_clause = Some(yield_clause);
                return self;
            }
        }
        self.push(Clause::Yield(yield_clause))
    }

    /// `CALL(scope) { query }`
    pub fn call_subquery(self, query: QueryBuilder, scope: SubqueryScope) -> Self {
        self.push(Clause::CallSubquery(Subquery::new(query, scope)))
    }

    /// `OPTIONAL CALL(scope) { query }`
    pub fn optional_call_subquery(self, query: QueryBuilder, scope: SubqueryScope) -> Self {
        self.push(Clause::CallSubquery(Subquery::new(query, scope).optional()))
    }

    /// `NEXT`
    #[allow(clippy::should_implement_trait)]
    pub fn next(self) -> Self {
        self.push(Clause::Next)
    }

    /// Combines with `other` using UNION.
    pub fn union(self, other: QueryBuilder) -> CompoundQuery {
        CompoundQuery::new(self).combine(SetOperator::Union, other)
    }

    /// Combines with `other` using UNION ALL.
    pub fn union_all(self, other: QueryBuilder) -> CompoundQuery {
        CompoundQuery::new(self).combine(SetOperator::UnionAll, other)
    }

    /// Renders the query with default settings.
    pub fn to_text(&self) -> String {
        self.render_with(&RenderConfig::default())
    }

    /// Renders the query with an explicit configuration.
    pub fn render_with(&self, config: &RenderConfig) -> String {
        self.render_indented("", config)
    }

    /// Renders every clause line with `indent` in front.
    ///
    /// ORDER BY, SKIP and LIMIT always come last, in that order. When they are
    /// present and no RETURN, WITH or CALL subquery projects rows, an implicit
    /// `RETURN *` is emitted directly before them
    /// (`MATCH (p)\nRETURN *\nLIMIT 10`), never after LIMIT.
    pub fn render_indented(&self, indent: &str, config: &RenderConfig) -> String {
        let implicit_return = Clause::Return(ProjectionList::new(["*"], false));
        let (mut pagination, mut other): (Vec<&Clause>, Vec<&Clause>) = self
            .clauses
            .iter()
            .partition(|c| c.pagination_rank().is_some());
        pagination.sort_by_key(|c| c.pagination_rank());

        let needs_return = !pagination.is_empty() && !other.iter().any(|c| c.is_projection());
        if needs_return {
            other.push(&implicit_return);
        }
        debug!(
            clauses = self.clauses.len(),
            pagination = pagination.len(),
            implicit_return = needs_return,
            "assembling query"
        );

        other
            .into_iter()
            .chain(pagination)
            .map(|clause| clause.render(indent, config))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::naming::IdentifierAllocator;
    use crate::ast::pattern::NodePattern;
    use crate::error::BuildError;

    fn person(id: &str) -> NodePattern {
        NodePattern::with_allocator(&IdentifierAllocator::new())
            .with_labels("Person")
            .named(id)
    }

    #[test]
    fn basic_match_where_return() {
        let q = QueryBuilder::new()
            .match_([person("p")])
            .where_(Expression::property("p", "age").gt(25))
            .return_(["p.name", "p.age"]);
        assert_eq!(
            q.to_text(),
            "MATCH (p:Person)\nWHERE p.age > 25\nRETURN p.name, p.age"
        );
    }

    #[test]
    fn pagination_is_reordered() {
        let q = QueryBuilder::new()
            .match_([person("p")])
            .return_(["p"])
            .limit(10)
            .skip(5)
            .order_by(["p.name"]);
        assert_eq!(
            q.to_text(),
            "MATCH (p:Person)\nRETURN p\nORDER BY p.name\nSKIP 5\nLIMIT 10"
        );
    }

    #[test]
    fn implicit_return_precedes_pagination() {
        let q = QueryBuilder::new().match_([person("p")]).limit(10);
        assert_eq!(q.to_text(), "MATCH (p:Person)\nRETURN *\nLIMIT 10");
    }

    #[test]
    fn no_implicit_return_without_pagination() {
        let q = QueryBuilder::new().match_([person("p")]);
        assert_eq!(q.to_text(), "MATCH (p:Person)");
    }

    #[test]
    fn skip_and_limit_replace() {
        let q = QueryBuilder::new()
            .match_([person("p")])
            .return_(["p"])
            .skip(1)
            .limit(2)
            .skip(3)
            .limit(Expression::parameter("n"));
        assert_eq!(
            q.to_text(),
            "MATCH (p:Person)\nRETURN p\nSKIP 3\nLIMIT $n"
        );
        assert_eq!(q.clauses().len(), 4);
    }

    #[test]
    fn use_moves_to_front_and_replaces() {
        let q = QueryBuilder::new()
            .match_([NodePattern::with_allocator(&IdentifierAllocator::new()).named("n")])
            .use_("old_db")
            .unwrap()
            .use_("new_db")
            .unwrap()
            .return_(["n"]);
        assert_eq!(q.to_text(), "USE new_db\nMATCH (n)\nRETURN n");
        assert_eq!(
            QueryBuilder::new().use_(""),
            Err(BuildError::EmptyDatabaseName)
        );
    }

    #[test]
    fn builder_methods_do_not_mutate_receiver() {
        let base = QueryBuilder::new().match_([person("p")]);
        let extended = base.clone().return_(["p"]);
        assert_eq!(base.clauses().len(), 1);
        assert_eq!(extended.clauses().len(), 2);
    }

    #[test]
    fn yield_attaches_to_preceding_call() {
        let q = QueryBuilder::new()
            .call_procedure("db.labels", Vec::<Expression>::new())
            .unwrap()
            .yield_(["label"])
            .unwrap()
            .where_(Expression::variable("label").contains("User"))
            .return_(["label"]);
        assert_eq!(
            q.to_text(),
            "CALL db.labels()\nYIELD label\nWHERE label CONTAINS 'User'\nRETURN label"
        );
        assert_eq!(q.clauses().len(), 3);
    }

    #[test]
    fn standalone_yield_when_no_call_precedes() {
        let q = QueryBuilder::new()
            .call_procedure("db.labels", Vec::<Expression>::new())
            .unwrap()
            .yield_all()
            .yield_([("label", "l")])
            .unwrap();
        assert_eq!(q.to_text(), "CALL db.labels()\nYIELD *\nYIELD label AS l");
        assert_eq!(
            QueryBuilder::new().yield_(Vec::<&str>::new()),
            Err(BuildError::EmptyYield)
        );
    }

    #[test]
    fn subquery_indents_body() {
        let inner = QueryBuilder::new()
            .use_("movies")
            .unwrap()
            .match_([NodePattern::with_allocator(&IdentifierAllocator::new())
                .with_labels("Movie")
                .named("m")])
            .return_(["m.title"]);
        let q = QueryBuilder::new()
            .call_subquery(inner, SubqueryScope::None)
            .return_(["count(*) AS movie_count"]);
        assert_eq!(
            q.to_text(),
            "CALL() {\n  USE movies\n  MATCH (m:Movie)\n  RETURN m.title\n}\nRETURN count(*) AS movie_count"
        );
    }

    #[test]
    fn nested_subqueries_indent_per_level() {
        let innermost = QueryBuilder::new()
            .match_([person("c")])
            .return_(["c.name"]);
        let middle = QueryBuilder::new().call_subquery(innermost, SubqueryScope::All);
        let q = QueryBuilder::new().optional_call_subquery(middle, SubqueryScope::variables(["t"]));
        assert_eq!(
            q.to_text(),
            "OPTIONAL CALL(t) {\n  CALL(*) {\n    MATCH (c:Person)\n    RETURN c.name\n  }\n}"
        );
    }

    #[test]
    fn custom_indent_unit() {
        let inner = QueryBuilder::new().match_([person("p")]).return_(["p"]);
        let q = QueryBuilder::new().call_subquery(inner, SubqueryScope::None);
        assert_eq!(
            q.render_with(&RenderConfig::new().with_indent_unit("\t")),
            "CALL() {\n\tMATCH (p:Person)\n\tRETURN p\n}"
        );
    }

    #[test]
    fn subquery_counts_as_projection() {
        let inner = QueryBuilder::new().match_([person("p")]).return_(["p.name"]);
        let q = QueryBuilder::new()
            .call_subquery(inner, SubqueryScope::None)
            .limit(5)
            .skip(10);
        assert_eq!(
            q.to_text(),
            "CALL() {\n  MATCH (p:Person)\n  RETURN p.name\n}\nSKIP 10\nLIMIT 5"
        );
    }

    #[test]
    fn unwind_group_by_and_next() {
        let q = QueryBuilder::new()
            .unwind(vec![1, 2, 3], "x")
            .with(["x"])
            .group_by(["x"])
            .return_(["x"])
            .next()
            .match_([person("b")])
            .return_distinct(["b"]);
        assert_eq!(
            q.to_text(),
            "UNWIND [1, 2, 3] AS x\nWITH x\nGROUP BY x\nRETURN x\nNEXT\nMATCH (b:Person)\nRETURN DISTINCT b"
        );
    }
}
