//! Query assembly and set-operation combination.

mod builder;
mod compound;

pub use builder::QueryBuilder;
pub use compound::{CompoundQuery, SetOperator};
