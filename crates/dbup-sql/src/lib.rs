//! dbup-sql - SQL parsing layer for dbup
//!
//! This crate analyzes the statements handed to the idempotent SQL helpers
//! using sqlparser-rs: INSERT statements are decomposed into table, column
//! list, and literal value tuples; ALTER TABLE statements are validated to
//! be single-column ADD COLUMN operations. No SQL is executed here.

pub mod alter;
pub mod error;
pub mod insert;
pub mod literal;
pub mod parser;

pub use alter::{parse_add_column, AddColumnStatement};
pub use error::{SqlError, SqlResult};
pub use insert::{parse_insert, InsertStatement};
pub use literal::Literal;
pub use parser::parse_single;
