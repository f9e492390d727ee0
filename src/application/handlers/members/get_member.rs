//! GetMemberHandler - Query handler for one member with its payment record.

use std::sync::Arc;

use crate::application::handlers::dues::load_member;
use crate::domain::foundation::MemberId;
use crate::domain::membership::{Member, MembershipError};
use crate::ports::MemberRepository;

pub struct GetMemberHandler {
    repository: Arc<dyn MemberRepository>,
}

impl GetMemberHandler {
    pub fn new(repository: Arc<dyn MemberRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, member_id: MemberId) -> Result<Member, MembershipError> {
        load_member(&self.repository, &member_id).await
    }
}
