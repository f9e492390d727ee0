//! SearchMembersHandler - Query handler for self-service member lookup.

use std::sync::Arc;

use crate::domain::membership::MembershipError;
use crate::ports::{MemberReader, MemberSummary};

/// Results returned when the caller gives no limit.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Upper bound on results for one lookup.
pub const MAX_SEARCH_LIMIT: u32 = 25;

#[derive(Debug, Clone)]
pub struct SearchMembersQuery {
    pub query: String,
    pub limit: Option<u32>,
}

pub struct SearchMembersHandler {
    reader: Arc<dyn MemberReader>,
}

impl SearchMembersHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: SearchMembersQuery,
    ) -> Result<Vec<MemberSummary>, MembershipError> {
        let text = query.query.trim();
        if text.is_empty() {
            return Err(MembershipError::validation("q", "search text is required"));
        }

        let limit = query
            .limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        Ok(self.reader.search(text, limit).await?)
    }
}
