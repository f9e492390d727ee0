//! ListMembersHandler - Query handler for the admin member listing.

use std::sync::Arc;

use crate::domain::membership::MembershipError;
use crate::ports::{MemberFilter, MemberPage, MemberReader};

pub struct ListMembersHandler {
    reader: Arc<dyn MemberReader>,
}

impl ListMembersHandler {
    pub fn new(reader: Arc<dyn MemberReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, filter: MemberFilter) -> Result<MemberPage, MembershipError> {
        Ok(self.reader.list(&filter).await?)
    }
}
