//! PostgreSQL adapters - Database implementations for member ports.
//!
//! - `PostgresMemberRepository` - Member writes, including conditional payment writes
//! - `PostgresMemberReader` - Search, listings and report queries

mod member_reader;
mod member_repository;
mod member_rows;

pub use member_reader::PostgresMemberReader;
pub use member_repository::PostgresMemberRepository;
