//! Instana tag-filter expressions.
//!
//! This crate provides:
//! - A parser for the textual form (`service.name@dest EQUALS 'shop' AND ...`)
//! - The REST tag-filter object tree ([`TagFilter`])
//! - Mapping from a parsed expression to the REST tree
//! - Normalization of a REST tree back to canonical text
//!
//! For any text `t` that parses, `parse(normalize(map_to_rest(parse(t))))`
//! yields the same expression as `parse(t)`.

pub mod ast;
pub mod error;
mod lexer;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod parser;

pub use ast::{Entity, Expression, LogicalOperator, Operator, Origin, Value};
pub use error::TagFilterError;
pub use mapper::map_to_rest;
pub use model::{TagFilter, TagFilterType};
pub use normalize::{normalize, to_expression};
pub use parser::parse;
