use std::sync::Arc;

use crate::{
    application::ports::{
        cache::{CacheTtls, QueryCache},
        time::Clock,
    },
    domain::sick_leave::SickLeaveReadRepository,
};

pub struct SickLeaveQueryService {
    pub(super) repo: Arc<dyn SickLeaveReadRepository>,
    pub(super) cache: Arc<dyn QueryCache>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) ttls: CacheTtls,
}

impl SickLeaveQueryService {
    pub fn new(
        repo: Arc<dyn SickLeaveReadRepository>,
        cache: Arc<dyn QueryCache>,
        clock: Arc<dyn Clock>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            repo,
            cache,
            clock,
            ttls,
        }
    }
}
