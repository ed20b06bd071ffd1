//! ta-sql - SQL layer for Trusted Advisor Explorer
//!
//! This crate renders the Athena view statements through a typed, quoting
//! builder, holds the fixed view catalog, and parses rendered statements
//! back with sqlparser-rs for inspection.

pub mod builder;
pub mod catalog;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod inspect;
pub mod parser;

pub use builder::{Expr, SelectColumn, TagJoin, ViewStatement, TAGS_TABLE};
pub use catalog::{view_catalog, ViewSpec};
pub use dialect::{AthenaDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use generator::{generate_views, include_tags, GeneratedView};
pub use inspect::{inspect_view, ViewShape};
pub use parser::SqlParser;
