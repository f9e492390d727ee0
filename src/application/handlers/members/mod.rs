//! Member handlers.
//!
//! ## Queries
//! - Self-service lookup by folio number, name or email
//! - Admin listing with status and text filters
//! - Single member with payment record
//!
//! ## Commands
//! - Registering, editing and changing the status of members

mod change_member_status;
mod create_member;
mod get_member;
mod list_members;
mod search_members;
mod update_member;

// Commands
pub use change_member_status::{ChangeMemberStatusCommand, ChangeMemberStatusHandler};
pub use create_member::{CreateMemberCommand, CreateMemberHandler};
pub use update_member::{UpdateMemberCommand, UpdateMemberHandler};

// Queries
pub use get_member::GetMemberHandler;
pub use list_members::ListMembersHandler;
pub use search_members::{
    SearchMembersHandler, SearchMembersQuery, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT,
};
