use super::SickLeaveQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, SickLeaveDto},
        error::{ApplicationError, ApplicationResult},
        ports::cache::keys,
        queries::{cached::cached, ensure_read_capability},
    },
    domain::sick_leave::SickLeaveId,
};
use uuid::Uuid;

pub struct GetSickLeaveQuery {
    pub id: Uuid,
}

impl SickLeaveQueryService {
    pub async fn get_sick_leave(
        &self,
        actor: &AuthenticatedUser,
        query: GetSickLeaveQuery,
    ) -> ApplicationResult<SickLeaveDto> {
        ensure_read_capability(actor, "sick_leaves")?;
        let key = keys::sick_leave_item(query.id);
        cached(self.cache.as_ref(), &key, self.ttls.item, || async {
            self.repo
                .find_by_id(SickLeaveId(query.id))
                .await?
                .map(SickLeaveDto::from)
                .ok_or_else(|| ApplicationError::not_found("sick leave not found"))
        })
        .await
    }
}
