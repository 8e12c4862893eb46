//! Label expressions for node patterns.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use smol_str::SmolStr;

/// Boolean expression over node labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelExpr {
    /// A single label
    Atom(SmolStr),
    /// Both labels (`&`)
    And(Box<LabelExpr>, Box<LabelExpr>),
    /// Either label (`|`)
    Or(Box<LabelExpr>, Box<LabelExpr>),
    /// Label absent (`!`)
    Not(Box<LabelExpr>),
}

impl LabelExpr {
    /// Single label atom.
    pub fn atom(text: impl Into<SmolStr>) -> Self {
        LabelExpr::Atom(text.into())
    }

    /// Returns true for a single atom.
    pub fn is_atom(&self) -> bool {
        matches!(self, LabelExpr::Atom(_))
    }
}

impl fmt::Display for LabelExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelExpr::Atom(text) => f.write_str(text),
            LabelExpr::And(left, right) => write!(f, "({left} & {right})"),
            LabelExpr::Or(left, right) => write!(f, "({left} | {right})"),
            LabelExpr::Not(inner) => write!(f, "!{inner}"),
        }
    }
}

impl BitAnd for LabelExpr {
    type Output = LabelExpr;

    fn bitand(self, rhs: LabelExpr) -> LabelExpr {
        LabelExpr::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for LabelExpr {
    type Output = LabelExpr;

    fn bitor(self, rhs: LabelExpr) -> LabelExpr {
        LabelExpr::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for LabelExpr {
    type Output = LabelExpr;

    fn not(self) -> LabelExpr {
        LabelExpr::Not(Box::new(self))
    }
}

/// Labels attached to a node pattern.
///
/// Plain names render colon-joined (`:User:Admin`). A composite
/// [`LabelExpr`] renders wrapped in backticks so it stays one label token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Labels {
    /// Zero or more plain label names
    Names(Vec<SmolStr>),
    /// Label expression
    Expr(LabelExpr),
}

impl Default for Labels {
    fn default() -> Self {
        Labels::Names(Vec::new())
    }
}

impl Labels {
    /// No labels.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if no label is present.
    pub fn is_empty(&self) -> bool {
        matches!(self, Labels::Names(names) if names.is_empty())
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Labels::Names(names) => {
                for name in names {
                    write!(f, ":{name}")?;
                }
                Ok(())
            }
            Labels::Expr(expr) if expr.is_atom() => write!(f, ":{expr}"),
            Labels::Expr(expr) => write!(f, ":`{expr}`"),
        }
    }
}

impl From<&str> for Labels {
    fn from(name: &str) -> Self {
        Labels::Names(vec![SmolStr::new(name)])
    }
}

impl From<String> for Labels {
    fn from(name: String) -> Self {
        Labels::Names(vec![SmolStr::from(name)])
    }
}

impl From<SmolStr> for Labels {
    fn from(name: SmolStr) -> Self {
        Labels::Names(vec![name])
    }
}

impl<const N: usize> From<[&str; N]> for Labels {
    fn from(names: [&str; N]) -> Self {
        Labels::Names(names.iter().copied().map(SmolStr::new).collect())
    }
}

impl From<Vec<&str>> for Labels {
    fn from(names: Vec<&str>) -> Self {
        Labels::Names(names.into_iter().map(SmolStr::new).collect())
    }
}

impl From<Vec<SmolStr>> for Labels {
    fn from(names: Vec<SmolStr>) -> Self {
        Labels::Names(names)
    }
}

impl From<LabelExpr> for Labels {
    fn from(expr: LabelExpr) -> Self {
        Labels::Expr(expr)
    }
}
