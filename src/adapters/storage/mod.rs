//! Storage Adapters
//!
//! Process-local implementations of the member ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryMemberStore** - Members and payment records in memory (development/testing)
//!
//! PostgreSQL implementations live in `adapters::postgres`.
//!
//! ## Usage
//!
//! ```ignore
//! use member_dues::adapters::storage::InMemoryMemberStore;
//!
//! let store = Arc::new(InMemoryMemberStore::new());
//! let repo: Arc<dyn MemberRepository> = store.clone();
//! let reader: Arc<dyn MemberReader> = store;
//! ```

mod in_memory_member_store;

pub use in_memory_member_store::InMemoryMemberStore;
