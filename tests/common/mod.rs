//! Common test utilities
//!
//! Shared helpers for the integration suites.
//!
//! # Fixtures
//! - [`names`] - Fresh identifier allocator, so lazy names start at `_node_bolden`
//! - [`person`] - Named `:Person` node
//! - [`rel`] - Named, typed, right-pointing relationship
//!
//! # Assertions
//! - [`assert_lines`] - Compare rendered text line by line
//! - [`assert_error_code`] - Assert a build error's diagnostic code

#![allow(dead_code)]

use cypher_builder::ast::{Direction, IdentifierAllocator, NodePattern, RelationshipPattern};
use cypher_builder::BuildError;
use miette::Diagnostic;

/// Fresh allocator with the default name pool.
pub fn names() -> IdentifierAllocator {
    IdentifierAllocator::new()
}

/// `(id:Person)` drawn from its own allocator.
pub fn person(id: &str) -> NodePattern {
    names().node("Person").named(id)
}

/// `(id:Label)` drawn from its own allocator.
pub fn labeled(label: &str, id: &str) -> NodePattern {
    names().node(label).named(id)
}

/// `-[id:TYPE]->`
pub fn rel(id: &str, rel_type: &str) -> RelationshipPattern {
    RelationshipPattern::new(Direction::Right)
        .named(id)
        .with_type(rel_type)
}

/// Assert that `actual` equals the newline-joined `expected` lines.
pub fn assert_lines(actual: &str, expected: &[&str]) {
    let expected = expected.join("\n");
    assert_eq!(
        actual, expected,
        "\n--- actual ---\n{actual}\n--- expected ---\n{expected}\n"
    );
}

/// Assert that `err` carries the diagnostic `code`.
pub fn assert_error_code(err: &BuildError, code: &str) {
    let actual = err
        .code()
        .map(|c| c.to_string())
        .unwrap_or_default();
    assert_eq!(actual, code, "unexpected diagnostic code for `{err}`");
}
