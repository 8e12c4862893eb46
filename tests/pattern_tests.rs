mod common;

use common::{assert_error_code, names, person, rel};
use cypher_builder::prelude::*;

#[test]
fn adjacent_nodes_get_anonymous_relationship() {
    let p = path![person("a"), person("b"), person("c"), person("d")];
    let text = p.to_string();
    assert_eq!(text, "(a:Person)--(b:Person)--(c:Person)--(d:Person)");
    assert_eq!(text.matches("--").count(), 3);
}

#[test]
fn nested_paths_are_flattened() {
    let company = path![
        names().node("Company").named("c"),
        relationship(Direction::Right).named("w").with_type("WORKS_AT"),
    ];
    assert_eq!(
        path![person("n1"), rel("r", "KNOWS"), company.clone()].to_string(),
        "(n1:Person)-[r:KNOWS]->(c:Company)-[w:WORKS_AT]->"
    );
    assert_eq!(
        path![company.clone(), person("n1"), rel("r", "KNOWS")].to_string(),
        "(c:Company)-[w:WORKS_AT]->(n1:Person)-[r:KNOWS]->"
    );
    assert_eq!(
        path![person("n1"), company].to_string(),
        "(n1:Person)--(c:Company)-[w:WORKS_AT]->"
    );
}

#[test]
fn concatenation_renders_shared_nodes_once() {
    let x = person("x");
    let y = person("y");
    let z = person("z");
    let left = path![x, rel("r1", "KNOWS"), y.clone()];
    let right = path![y, rel("r2", "KNOWS"), z];
    let joined = left.concat(right).unwrap();
    let text = joined.to_string();
    assert_eq!(text, "(x:Person)-[r1:KNOWS]->(y:Person)-[r2:KNOWS]->(z:Person)");
    assert_eq!(text.matches("(y:Person)").count(), 1);
}

#[test]
fn concatenation_with_node_operand() {
    let existing = path![person("n2"), rel("r", "KNOWS"), person("n3")];
    assert_eq!(
        (person("n1") + existing).unwrap().to_string(),
        "(n1:Person)--(n2:Person)-[r:KNOWS]->(n3:Person)"
    );

    let friends = path![person("n2"), rel("s", "FRIENDS"), person("n3")];
    assert_eq!(
        (rel("r", "KNOWS") + friends).unwrap().to_string(),
        "-[r:KNOWS]->(n2:Person)-[s:FRIENDS]->(n3:Person)"
    );
}

#[test]
fn concatenating_relationship_onto_dangling_path_fails() {
    let dangling = path![person("a"), rel("r", "KNOWS")];
    let err = dangling.concat(rel("s", "KNOWS")).unwrap_err();
    assert_eq!(err, BuildError::RelationshipAfterRelationship);
    assert_error_code(&err, "cypher::pattern::relationship_after_relationship");
}

#[test]
fn operator_chain_with_where() {
    let chained = (person("n1") + rel("r", "KNOWS") + person("n2"))
        .and_then(|p| p.where_(prop("n1", "age").gt(literal(30)) & prop("n2", "age").lt(literal(40))))
        .unwrap();
    assert_eq!(
        chained.to_string(),
        "(n1:Person)-[r:KNOWS]->(n2:Person) WHERE (n1.age > 30) AND (n2.age < 40)"
    );
}

#[test]
fn where_on_incomplete_path_fails() {
    let err = (person("n1") + rel("r", "KNOWS"))
        .and_then(|p| p.where_(prop("n1", "age").gt(30)))
        .unwrap_err();
    assert_eq!(err, BuildError::IncompletePath);
    assert_eq!(err.to_string(), "cannot add condition to incomplete path");
}

#[test]
fn dynamic_patterns_reject_quantified_operands() {
    let quantified: Pattern = path![person("a"), person("b")].one_or_more().into();
    let node: Pattern = person("c").into();
    let err = (quantified + node).unwrap_err();
    assert_eq!(
        err,
        BuildError::UnsupportedOperand {
            left: "QuantifiedPathPattern",
            right: "NodePattern"
        }
    );
    assert_error_code(&err, "cypher::pattern::unsupported_operand");

    let ok = (Pattern::from(person("a")) + Pattern::from(rel("r", "KNOWS"))).unwrap();
    assert_eq!(ok.to_string(), "(a:Person)-[r:KNOWS]->");
}

#[test]
fn quantifier_suffixes() {
    let base = || path![person("p"), person("f")];
    assert!(base().quantify(Some(2), Some(5)).unwrap().to_string().ends_with("){2,5}"));
    assert!(base().one_or_more().to_string().ends_with(")+"));
    assert!(base().zero_or_more().to_string().ends_with(")*"));
    assert_eq!(
        base().quantify(Some(2), Some(2)).unwrap().to_string(),
        "((p:Person)--(f:Person)){2,2}"
    );
}

#[test]
fn quantifier_validation() {
    let base = path![person("p"), person("f")];
    assert_eq!(
        base.clone().quantify(None, None).unwrap_err(),
        BuildError::MissingQuantifierBounds
    );
    assert_eq!(
        base.quantify(Some(3), Some(1)).unwrap_err(),
        BuildError::InvalidQuantifierRange { min: 3, max: 1 }
    );
}

#[test]
fn quantified_paths_in_match() {
    let q = match_([path![person("p"), person("f")].one_or_more()]).return_(["p", "f"]);
    assert_eq!(q.to_text(), "MATCH ((p:Person)--(f:Person))+\nRETURN p, f");

    let hops = relationship(Direction::Right)
        .with_type("KNOWS")
        .quantify(Some(1), Some(3))
        .unwrap();
    let q = match_([Pattern::from(person("a")), Pattern::from(hops)]).return_(["a"]);
    assert_eq!(q.to_text(), "MATCH (a:Person), -[:KNOWS]->{1,3}\nRETURN a");
}

#[test]
fn bound_path_variables() {
    let p = path![person("a"), rel("r", "KNOWS"), person("b")].bind("route");
    assert_eq!(
        match_([p]).return_(["route"]).to_text(),
        "MATCH route = (a:Person)-[r:KNOWS]->(b:Person)\nRETURN route"
    );
}

#[test]
fn inline_conditions_on_nodes_and_relationships() {
    let active = person("p1").where_(prop("p1", "active").equals(true));
    let recent = rel("r", "KNOWS").where_(prop("r", "since").gt(2020));
    assert_eq!(
        path![active, recent, person("p2")].to_string(),
        "(p1:Person WHERE p1.active = true)-[r:KNOWS WHERE r.since > 2020]->(p2:Person)"
    );
}

#[test]
fn node_properties_preserve_order() {
    let alice = person("p").with_property("name", "Alice").with_property("age", 30);
    assert_eq!(alice.to_string(), "(p:Person {name: 'Alice', age: 30})");
}

#[test]
fn label_expressions() {
    let admin = names()
        .node(label("Person") & label("Admin"))
        .named("a");
    assert_eq!(admin.to_string(), "(a:`(Person & Admin)`)");

    let either = names().node(label("Person") | !label("Bot")).named("x");
    assert_eq!(either.to_string(), "(x:`(Person | !Bot)`)");

    let plain = names().node(["User", "Admin"]).named("u");
    assert_eq!(plain.to_string(), "(u:User:Admin)");
}

#[test]
fn degree_constraints() {
    let constrained = person("p")
        .with_property("name", "Alice")
        .where_(prop("p", "age").gt(18))
        .constrain_degree(DegreeConstraint::below(5))
        .unwrap();
    assert_eq!(
        constrained.to_string(),
        "(p:Person {name: 'Alice'} WHERE p.age > 18 AND apoc.node.degree(p) < 5)"
    );

    let composite = names()
        .node(label("Person") & label("Admin"))
        .named("a")
        .constrain_degree(DegreeConstraint::below(3))
        .unwrap();
    assert_eq!(
        composite.to_string(),
        "(a:`(Person & Admin)` WHERE apoc.node.degree(a) < 3)"
    );

    let err = names()
        .node("Person")
        .constrain_degree(DegreeConstraint::below(5))
        .unwrap_err();
    assert_eq!(err, BuildError::DegreeConstraintWithoutIdentifier);

    let err = person("p")
        .constrain_degree(DegreeConstraint::default().outgoing())
        .unwrap_err();
    assert!(err.to_string().contains("max_degree must be provided"));
}

#[test]
fn relates_to() {
    let path = person("p")
        .relates_to("KNOWS", Direction::Undirected, person("f"))
        .unwrap();
    assert_eq!(path.to_string(), "(p:Person)-[:KNOWS]-(f:Person)");

    let err = person("p")
        .relates_to("", Direction::Right, person("f"))
        .unwrap_err();
    assert_eq!(err, BuildError::EmptyRelationshipType);
}

#[test]
fn relationship_shorthand_and_pipe_joined_types() {
    let p = path![
        person("a"),
        relationship(Direction::Left),
        person("b"),
        relationship(Direction::Right).with_type("KNOWS").with_type("LIKES"),
        person("c"),
    ];
    assert_eq!(
        p.to_string(),
        "(a:Person)<--(b:Person)-[:KNOWS|LIKES]->(c:Person)"
    );
}

#[test]
fn relationship_properties_require_a_variable() {
    let since = rel("r", "KNOWS").prop("since").map(|e| e.gt(2020));
    assert_eq!(since.map(|e| e.to_string()).as_deref(), Some("r.since > 2020"));

    let anonymous = relationship(Direction::Right).with_type("KNOWS");
    assert!(anonymous.prop("since").is_none());
}
