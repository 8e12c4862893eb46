//! Graph pattern AST nodes.
//!
//! This module defines the pattern algebra used by MATCH clauses:
//! - [`NodePattern`]: `(id:Label {k: v} WHERE cond)`
//! - [`RelationshipPattern`]: `-[id:TYPE {k: v} WHERE cond]->`
//! - [`PathPattern`]: an ordered chain of nodes and relationships
//! - [`QuantifiedPathPattern`]: a path repeated `+`, `*` or `{m,n}` times
//!
//! Path construction keeps one structural invariant: two node patterns are
//! never adjacent. Wherever they would be, an anonymous undirected
//! relationship (`--`) is inserted.

use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::ast::expression::{Expression, FunctionCall, Projection};
use crate::ast::label::Labels;
use crate::ast::naming::{IdentifierAllocator, LazyIdentifier};
use crate::ast::value::{Value, write_entries};
use crate::error::{BuildError, Result};

// ============================================================================
// Direction
// ============================================================================

/// Relationship direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Right-to-left (`<-[]-`)
    Left,
    /// Left-to-right (`-[]->`)
    Right,
    /// Either direction (`-[]-`)
    #[default]
    Undirected,
}

fn set_property(properties: &mut Vec<(SmolStr, Value)>, key: SmolStr, value: Value) {
    match properties.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => properties.push((key, value)),
    }
}

// ============================================================================
// Relationship Patterns
// ============================================================================

/// Relationship pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelationshipPattern {
    /// Traversal direction.
    pub direction: Direction,
    /// Optional relationship variable.
    pub identifier: Option<SmolStr>,
    /// Relationship types, rendered pipe-joined.
    pub types: Vec<SmolStr>,
    /// Inline property map.
    pub properties: Vec<(SmolStr, Value)>,
    /// Inline WHERE condition.
    pub condition: Option<Expression>,
}

impl RelationshipPattern {
    /// Anonymous untyped relationship.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    /// Binds the relationship to a variable.
    pub fn named(mut self, identifier: impl Into<SmolStr>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Adds an alternative relationship type.
    pub fn with_type(mut self, rel_type: impl Into<SmolStr>) -> Self {
        self.types.push(rel_type.into());
        self
    }

    /// Sets an inline property, replacing an earlier value for the key.
    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        set_property(&mut self.properties, key.into(), value.into());
        self
    }

    /// Attaches an inline WHERE condition.
    pub fn where_(mut self, condition: Expression) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Property access on the relationship variable.
    ///
    /// Relationships are never named lazily, so an anonymous relationship
    /// has no property to refer to.
    pub fn prop(&self, name: impl Into<SmolStr>) -> Option<Expression> {
        let owner = self.identifier.clone()?;
        Some(Expression::property(owner, name))
    }

    /// Returns true if the relationship has no identifier, type, properties
    /// or condition.
    pub fn is_bare(&self) -> bool {
        self.identifier.is_none()
            && self.types.is_empty()
            && self.properties.is_empty()
            && self.condition.is_none()
    }

    /// Repeats this relationship between `min` and `max` times.
    pub fn quantify(self, min: Option<u32>, max: Option<u32>) -> Result<QuantifiedPathPattern> {
        PathPattern::from(self).quantify(min, max)
    }

    /// Repeats this relationship one or more times.
    pub fn one_or_more(self) -> QuantifiedPathPattern {
        PathPattern::from(self).one_or_more()
    }

    /// Repeats this relationship zero or more times.
    pub fn zero_or_more(self) -> QuantifiedPathPattern {
        PathPattern::from(self).zero_or_more()
    }

    fn body(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(3);
        let mut head = String::new();
        if let Some(id) = &self.identifier {
            head.push_str(id);
        }
        if !self.types.is_empty() {
            head.push(':');
            head.push_str(&self.types.join("|"));
        }
        if !head.is_empty() {
            parts.push(head);
        }
        if !self.properties.is_empty() {
            parts.push(PropertyMap(&self.properties).to_string());
        }
        if let Some(condition) = &self.condition {
            parts.push(format!("WHERE {condition}"));
        }
        parts.join(" ")
    }
}

impl fmt::Display for RelationshipPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body();
        match (self.direction, body.is_empty()) {
            (Direction::Right, true) => f.write_str("-->"),
            (Direction::Left, true) => f.write_str("<--"),
            (Direction::Undirected, true) => f.write_str("--"),
            (Direction::Right, false) => write!(f, "-[{body}]->"),
            (Direction::Left, false) => write!(f, "<-[{body}]-"),
            (Direction::Undirected, false) => write!(f, "-[{body}]-"),
        }
    }
}

struct PropertyMap<'a>(&'a [(SmolStr, Value)]);

impl fmt::Display for PropertyMap<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_entries(f, self.0)?;
        f.write_str("}")
    }
}

// ============================================================================
// Node Patterns
// ============================================================================

/// Direction filter for a degree constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeDirection {
    /// Incoming relationships only
    In,
    /// Outgoing relationships only
    Out,
}

/// Upper bound on the number of relationships a matched node may have.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DegreeConstraint {
    /// Exclusive upper bound.
    pub max: Option<u32>,
    /// Restricts counting to one direction.
    pub direction: Option<DegreeDirection>,
    /// Restricts counting to one relationship type.
    pub rel_type: Option<SmolStr>,
}

impl DegreeConstraint {
    /// Degree strictly below `max`.
    pub fn below(max: u32) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    /// Counts incoming relationships only.
    pub fn incoming(mut self) -> Self {
        self.direction = Some(DegreeDirection::In);
        self
    }

    /// Counts outgoing relationships only.
    pub fn outgoing(mut self) -> Self {
        self.direction = Some(DegreeDirection::Out);
        self
    }

    /// Counts relationships of one type only.
    pub fn of_type(mut self, rel_type: impl Into<SmolStr>) -> Self {
        self.rel_type = Some(rel_type.into());
        self
    }

    fn predicate(&self, identifier: &SmolStr, max: u32) -> Expression {
        let function = match self.direction {
            None => "apoc.node.degree",
            Some(DegreeDirection::In) => "apoc.node.degree.in",
            Some(DegreeDirection::Out) => "apoc.node.degree.out",
        };
        let mut args = vec![Expression::Variable(identifier.clone())];
        if let Some(rel_type) = &self.rel_type {
            args.push(Expression::literal(rel_type.clone()));
        }
        Expression::FunctionCall(FunctionCall::new(function, args)).lt(Expression::literal(max))
    }
}

/// Node pattern.
///
/// Each node carries a write-once identity slot shared by its clones. An
/// anonymous node receives a generated name the first time it is referenced
/// through [`identifier`](Self::identifier), [`prop`](Self::prop),
/// [`reference`](Self::reference) or a projection. Rendering never allocates.
#[derive(Debug, Clone)]
pub struct NodePattern {
    identifier: Option<SmolStr>,
    labels: Labels,
    properties: Vec<(SmolStr, Value)>,
    condition: Option<Expression>,
    degree: Option<(DegreeConstraint, u32)>,
    slot: Arc<LazyIdentifier>,
}

impl PartialEq for NodePattern {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
            && self.labels == other.labels
            && self.properties == other.properties
            && self.condition == other.condition
            && self.degree == other.degree
    }
}

impl Default for NodePattern {
    fn default() -> Self {
        Self::new()
    }
}

impl NodePattern {
    /// Anonymous, unlabeled node named from the shared allocator.
    pub fn new() -> Self {
        Self::with_allocator(&IdentifierAllocator::shared())
    }

    /// Anonymous, unlabeled node named from `allocator`.
    pub fn with_allocator(allocator: &IdentifierAllocator) -> Self {
        Self {
            identifier: None,
            labels: Labels::default(),
            properties: Vec::new(),
            condition: None,
            degree: None,
            slot: LazyIdentifier::new(allocator.clone()),
        }
    }

    /// Sets the node labels.
    pub fn with_labels(mut self, labels: impl Into<Labels>) -> Self {
        self.labels = labels.into();
        self
    }

    /// Binds the node to an explicit variable.
    pub fn named(mut self, identifier: impl Into<SmolStr>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets an inline property, replacing an earlier value for the key.
    pub fn with_property(mut self, key: impl Into<SmolStr>, value: impl Into<Value>) -> Self {
        set_property(&mut self.properties, key.into(), value.into());
        self
    }

    /// Attaches an inline WHERE condition.
    pub fn where_(mut self, condition: Expression) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Limits the node's degree.
    ///
    /// Requires an explicit identifier and a maximum.
    pub fn constrain_degree(mut self, constraint: DegreeConstraint) -> Result<Self> {
        if self.identifier.is_none() {
            return Err(BuildError::DegreeConstraintWithoutIdentifier);
        }
        let max = constraint.max.ok_or(BuildError::MissingMaxDegree)?;
        self.degree = Some((constraint, max));
        Ok(self)
    }

    /// Builds the path `self -[:rel_type]- target` in the given direction.
    pub fn relates_to(
        self,
        rel_type: impl Into<SmolStr>,
        direction: Direction,
        target: NodePattern,
    ) -> Result<PathPattern> {
        let rel_type = rel_type.into();
        if rel_type.is_empty() {
            return Err(BuildError::EmptyRelationshipType);
        }
        let rel = RelationshipPattern::new(direction).with_type(rel_type);
        Ok(PathPattern::new([
            PathItem::Node(self),
            PathItem::Relationship(rel),
            PathItem::Node(target),
        ]))
    }

    /// Returns the node's name, assigning a lazy one on first use.
    pub fn identifier(&self) -> SmolStr {
        match &self.identifier {
            Some(id) => id.clone(),
            None => self.slot.get_or_assign().clone(),
        }
    }

    /// Returns the explicit or already assigned name without allocating.
    pub fn current_identifier(&self) -> Option<&SmolStr> {
        self.identifier.as_ref().or_else(|| self.slot.peek())
    }

    /// The caller-supplied identifier, if any.
    pub fn explicit_identifier(&self) -> Option<&SmolStr> {
        self.identifier.as_ref()
    }

    /// The lazily assigned identifier, if one has been assigned.
    pub fn lazy_identifier(&self) -> Option<&SmolStr> {
        self.slot.peek()
    }

    /// Property access on this node.
    pub fn prop(&self, name: impl Into<SmolStr>) -> Expression {
        Expression::property(self.identifier(), name)
    }

    /// Variable reference to this node.
    pub fn reference(&self) -> Expression {
        Expression::Variable(self.identifier())
    }

    /// Node labels.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Inline properties in insertion order.
    pub fn properties(&self) -> &[(SmolStr, Value)] {
        &self.properties
    }

    /// Inline WHERE condition.
    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref()
    }

    /// Degree constraint.
    pub fn degree(&self) -> Option<&DegreeConstraint> {
        self.degree.as_ref().map(|(constraint, _)| constraint)
    }

    /// Returns true if both values are the same node instance.
    pub fn same_instance(&self, other: &NodePattern) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    fn is_same_anchor(&self, other: &NodePattern) -> bool {
        if self.same_instance(other) {
            return true;
        }
        match (self.current_identifier(), other.current_identifier()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        if let Some(id) = self.current_identifier() {
            f.write_str(id)?;
        }
        write!(f, "{}", self.labels)?;
        if !self.properties.is_empty() {
            write!(f, " {}", PropertyMap(&self.properties))?;
        }

        let mut predicates: Vec<String> = Vec::with_capacity(2);
        if let Some(condition) = &self.condition {
            predicates.push(condition.to_string());
        }
        if let (Some((constraint, max)), Some(id)) = (&self.degree, &self.identifier) {
            predicates.push(constraint.predicate(id, *max).to_string());
        }
        if !predicates.is_empty() {
            write!(f, " WHERE {}", predicates.join(" AND "))?;
        }
        f.write_str(")")
    }
}

impl From<&NodePattern> for Expression {
    fn from(node: &NodePattern) -> Self {
        node.reference()
    }
}

impl From<&NodePattern> for Projection {
    fn from(node: &NodePattern) -> Self {
        Projection::new(node.reference())
    }
}

// ============================================================================
// Path Patterns
// ============================================================================

/// Element of a materialized path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    /// Node pattern
    Node(NodePattern),
    /// Relationship pattern
    Relationship(RelationshipPattern),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Node(node) => write!(f, "{node}"),
            PathElement::Relationship(rel) => write!(f, "{rel}"),
        }
    }
}

/// Input to path construction. Nested paths are flattened.
#[derive(Debug, Clone, PartialEq)]
pub enum PathItem {
    /// Node pattern
    Node(NodePattern),
    /// Relationship pattern
    Relationship(RelationshipPattern),
    /// Path whose elements are spliced in
    Path(PathPattern),
}

impl From<NodePattern> for PathItem {
    fn from(node: NodePattern) -> Self {
        PathItem::Node(node)
    }
}

impl From<&NodePattern> for PathItem {
    fn from(node: &NodePattern) -> Self {
        PathItem::Node(node.clone())
    }
}

impl From<RelationshipPattern> for PathItem {
    fn from(rel: RelationshipPattern) -> Self {
        PathItem::Relationship(rel)
    }
}

impl From<PathPattern> for PathItem {
    fn from(path: PathPattern) -> Self {
        PathItem::Path(path)
    }
}

/// Path pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathPattern {
    elements: Vec<PathElement>,
    variable: Option<SmolStr>,
    condition: Option<Expression>,
}

fn push_element(elements: &mut Vec<PathElement>, element: PathElement) {
    if matches!(element, PathElement::Node(_))
        && matches!(elements.last(), Some(PathElement::Node(_)))
    {
        elements.push(PathElement::Relationship(RelationshipPattern::default()));
    }
    elements.push(element);
}

impl PathPattern {
    /// Builds a path, flattening nested paths and separating adjacent nodes.
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathItem>,
    {
        let mut elements = Vec::new();
        for item in items {
            match item.into() {
                PathItem::Node(node) => push_element(&mut elements, PathElement::Node(node)),
                PathItem::Relationship(rel) => {
                    push_element(&mut elements, PathElement::Relationship(rel))
                }
                PathItem::Path(path) => {
                    for element in path.elements {
                        push_element(&mut elements, element);
                    }
                }
            }
        }
        Self {
            elements,
            variable: None,
            condition: None,
        }
    }

    /// Materialized elements.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Bound path variable.
    pub fn variable(&self) -> Option<&SmolStr> {
        self.variable.as_ref()
    }

    /// WHERE condition on the whole path.
    pub fn condition(&self) -> Option<&Expression> {
        self.condition.as_ref()
    }

    /// Returns true if the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Binds the whole path to a variable (`var = path`).
    pub fn bind(mut self, variable: impl Into<SmolStr>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    /// Attaches a WHERE condition. Fails if the path ends in a relationship.
    pub fn where_(mut self, condition: Expression) -> Result<Self> {
        if matches!(self.elements.last(), Some(PathElement::Relationship(_))) {
            return Err(BuildError::IncompletePath);
        }
        self.condition = Some(condition);
        Ok(self)
    }

    /// Appends another pattern.
    ///
    /// A shared anchor node at the seam is kept once. The result keeps this
    /// path's bound variable and drops any condition.
    pub fn concat(self, other: impl Into<PathItem>) -> Result<PathPattern> {
        let other = match other.into() {
            PathItem::Path(path) => path,
            item => PathPattern::new([item]),
        };
        if self.elements.is_empty() {
            return Ok(other);
        }
        if other.elements.is_empty() {
            return Ok(self);
        }

        let shared_anchor = match (self.elements.last(), other.elements.first()) {
            (Some(PathElement::Relationship(_)), Some(PathElement::Relationship(_))) => {
                return Err(BuildError::RelationshipAfterRelationship);
            }
            (Some(PathElement::Node(last)), Some(PathElement::Node(first))) => {
                last.is_same_anchor(first)
            }
            _ => false,
        };

        let mut elements = self.elements;
        for element in other.elements.into_iter().skip(usize::from(shared_anchor)) {
            push_element(&mut elements, element);
        }
        Ok(PathPattern {
            elements,
            variable: self.variable,
            condition: None,
        })
    }

    /// Repeats this path between `min` and `max` times.
    pub fn quantify(self, min: Option<u32>, max: Option<u32>) -> Result<QuantifiedPathPattern> {
        let quantifier = Quantifier::range(min, max)?;
        Ok(QuantifiedPathPattern::new(self, quantifier))
    }

    /// Repeats this path one or more times (`+`).
    pub fn one_or_more(self) -> QuantifiedPathPattern {
        QuantifiedPathPattern::new(self, Quantifier::OneOrMore)
    }

    /// Repeats this path zero or more times (`*`).
    pub fn zero_or_more(self) -> QuantifiedPathPattern {
        QuantifiedPathPattern::new(self, Quantifier::ZeroOrMore)
    }

    fn is_single_relationship(&self) -> bool {
        self.variable.is_none()
            && self.condition.is_none()
            && matches!(self.elements.as_slice(), [PathElement::Relationship(_)])
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(variable) = &self.variable {
            write!(f, "{variable} = ")?;
        }
        for element in &self.elements {
            write!(f, "{element}")?;
        }
        if let Some(condition) = &self.condition {
            write!(f, " WHERE {condition}")?;
        }
        Ok(())
    }
}

impl From<NodePattern> for PathPattern {
    fn from(node: NodePattern) -> Self {
        PathPattern::new([PathItem::Node(node)])
    }
}

impl From<RelationshipPattern> for PathPattern {
    fn from(rel: RelationshipPattern) -> Self {
        PathPattern::new([PathItem::Relationship(rel)])
    }
}

// ============================================================================
// Quantified Path Patterns
// ============================================================================

/// Repetition quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `+`
    OneOrMore,
    /// `*`
    ZeroOrMore,
    /// `{min,max}` with either bound open
    Range {
        /// Lower bound.
        min: Option<u32>,
        /// Upper bound.
        max: Option<u32>,
    },
}

impl Quantifier {
    /// Validated `{min,max}` quantifier.
    pub fn range(min: Option<u32>, max: Option<u32>) -> Result<Self> {
        match (min, max) {
            (None, None) => Err(BuildError::MissingQuantifierBounds),
            (Some(min), Some(max)) if min > max => {
                Err(BuildError::InvalidQuantifierRange { min, max })
            }
            _ => Ok(Quantifier::Range { min, max }),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::OneOrMore => f.write_str("+"),
            Quantifier::ZeroOrMore => f.write_str("*"),
            Quantifier::Range { min, max } => {
                f.write_str("{")?;
                if let Some(min) = min {
                    write!(f, "{min}")?;
                }
                f.write_str(",")?;
                if let Some(max) = max {
                    write!(f, "{max}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Quantified path pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantifiedPathPattern {
    /// Repeated path.
    pub path: PathPattern,
    /// Repetition quantifier.
    pub quantifier: Quantifier,
    /// Bound path variable.
    pub variable: Option<SmolStr>,
}

impl QuantifiedPathPattern {
    /// Wraps `path` with `quantifier`.
    pub fn new(path: PathPattern, quantifier: Quantifier) -> Self {
        Self {
            path,
            quantifier,
            variable: None,
        }
    }

    /// Binds the quantified path to a variable (`var = (...)+`).
    pub fn bind(mut self, variable: impl Into<SmolStr>) -> Self {
        self.variable = Some(variable.into());
        self
    }
}

impl fmt::Display for QuantifiedPathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(variable) = &self.variable {
            write!(f, "{variable} = ")?;
        }
        if self.path.is_single_relationship() {
            write!(f, "{}{}", self.path, self.quantifier)
        } else {
            write!(f, "({}){}", self.path, self.quantifier)
        }
    }
}

// ============================================================================
// Pattern - any pattern accepted by MATCH
// ============================================================================

/// Any pattern that can appear in a MATCH clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Single node
    Node(NodePattern),
    /// Single relationship
    Relationship(RelationshipPattern),
    /// Path
    Path(PathPattern),
    /// Quantified path
    Quantified(QuantifiedPathPattern),
}

impl Pattern {
    /// Name of the pattern kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Pattern::Node(_) => "NodePattern",
            Pattern::Relationship(_) => "RelationshipPattern",
            Pattern::Path(_) => "PathPattern",
            Pattern::Quantified(_) => "QuantifiedPathPattern",
        }
    }

    fn into_path_item(self) -> std::result::Result<PathItem, Self> {
        match self {
            Pattern::Node(node) => Ok(PathItem::Node(node)),
            Pattern::Relationship(rel) => Ok(PathItem::Relationship(rel)),
            Pattern::Path(path) => Ok(PathItem::Path(path)),
            quantified @ Pattern::Quantified(_) => Err(quantified),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Node(node) => write!(f, "{node}"),
            Pattern::Relationship(rel) => write!(f, "{rel}"),
            Pattern::Path(path) => write!(f, "{path}"),
            Pattern::Quantified(quantified) => write!(f, "{quantified}"),
        }
    }
}

impl From<NodePattern> for Pattern {
    fn from(node: NodePattern) -> Self {
        Pattern::Node(node)
    }
}

impl From<&NodePattern> for Pattern {
    fn from(node: &NodePattern) -> Self {
        Pattern::Node(node.clone())
    }
}

impl From<RelationshipPattern> for Pattern {
    fn from(rel: RelationshipPattern) -> Self {
        Pattern::Relationship(rel)
    }
}

impl From<PathPattern> for Pattern {
    fn from(path: PathPattern) -> Self {
        Pattern::Path(path)
    }
}

impl From<QuantifiedPathPattern> for Pattern {
    fn from(quantified: QuantifiedPathPattern) -> Self {
        Pattern::Quantified(quantified)
    }
}

// ============================================================================
// Concatenation operators
// ============================================================================

macro_rules! impl_path_add {
    ($lhs:ty => $($rhs:ty),+) => {
        $(
            impl Add<$rhs> for $lhs {
                type Output = Result<PathPattern>;

                fn add(self, rhs: $rhs) -> Result<PathPattern> {
                    PathPattern::from(self).concat(rhs)
                }
            }
        )+
    };
}

impl_path_add!(NodePattern => NodePattern, RelationshipPattern, PathPattern);
impl_path_add!(RelationshipPattern => NodePattern, RelationshipPattern, PathPattern);

macro_rules! impl_path_concat {
    ($($rhs:ty),+) => {
        $(
            impl Add<$rhs> for PathPattern {
                type Output = Result<PathPattern>;

                fn add(self, rhs: $rhs) -> Result<PathPattern> {
                    self.concat(rhs)
                }
            }

            impl Add<$rhs> for Result<PathPattern> {
                type Output = Result<PathPattern>;

                fn add(self, rhs: $rhs) -> Result<PathPattern> {
                    self?.concat(rhs)
                }
            }
        )+
    };
}

impl_path_concat!(NodePattern, RelationshipPattern, PathPattern);

impl Add for Pattern {
    type Output = Result<PathPattern>;

    fn add(self, rhs: Pattern) -> Result<PathPattern> {
        let (left_kind, right_kind) = (self.kind(), rhs.kind());
        let unsupported = || BuildError::UnsupportedOperand {
            left: left_kind,
            right: right_kind,
        };
        let left = self.into_path_item().map_err(|_| unsupported())?;
        let right = rhs.into_path_item().map_err(|_| unsupported())?;
        PathPattern::new([left]).concat(right)
    }
}
