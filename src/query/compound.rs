//! UNION / UNION ALL combination of assembled queries.

use std::fmt;

use crate::config::RenderConfig;
use crate::query::QueryBuilder;

/// Set operation joining two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// UNION
    Union,
    /// UNION ALL
    UnionAll,
}

impl SetOperator {
    /// Returns the operator keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
        }
    }
}

/// Queries joined by set operators, in call order.
///
/// There is always exactly one operator fewer than queries.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundQuery {
    queries: Vec<QueryBuilder>,
    operators: Vec<SetOperator>,
}

impl CompoundQuery {
    /// Starts a compound query from its first member.
    pub fn new(first: QueryBuilder) -> Self {
        Self {
            queries: vec![first],
            operators: Vec::new(),
        }
    }

    pub(crate) fn combine(mut self, operator: SetOperator, query: QueryBuilder) -> Self {
        self.operators.push(operator);
        self.queries.push(query);
        self
    }

    /// Appends `query` with UNION.
    pub fn union(self, query: QueryBuilder) -> Self {
        self.combine(SetOperator::Union, query)
    }

    /// Appends `query` with UNION ALL.
    pub fn union_all(self, query: QueryBuilder) -> Self {
        self.combine(SetOperator::UnionAll, query)
    }

    /// Member queries.
    pub fn queries(&self) -> &[QueryBuilder] {
        &self.queries
    }

    /// Operators between consecutive members.
    pub fn operators(&self) -> &[SetOperator] {
        &self.operators
    }

    /// Renders the compound query with default settings.
    pub fn to_text(&self) -> String {
        self.render_with(&RenderConfig::default())
    }

    /// Renders the compound query with an explicit configuration.
    pub fn render_with(&self, config: &RenderConfig) -> String {
        let mut parts = Vec::with_capacity(self.queries.len() * 2);
        let mut queries = self.queries.iter();
        if let Some(first) = queries.next() {
            parts.push(first.render_with(config));
        }
        for (operator, query) in self.operators.iter().zip(queries) {
            parts.push(operator.as_str().to_string());
            parts.push(query.render_with(config));
        }
        parts.join("\n")
    }
}

impl fmt::Display for CompoundQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn returning(item: &str) -> QueryBuilder {
        QueryBuilder::new().return_([item])
    }

    #[test]
    fn union_chain_preserves_call_order() {
        let q = returning("1 AS x")
            .union(returning("2 AS x"))
            .union_all(returning("3 AS x"));
        assert_eq!(
            q.to_text(),
            "RETURN 1 AS x\nUNION\nRETURN 2 AS x\nUNION ALL\nRETURN 3 AS x"
        );
        assert_eq!(q.queries().len(), 3);
        assert_eq!(q.operators(), &[SetOperator::Union, SetOperator::UnionAll]);
    }

    #[test]
    fn single_member_renders_alone() {
        assert_eq!(CompoundQuery::new(returning("1")).to_text(), "RETURN 1");
    }
}
