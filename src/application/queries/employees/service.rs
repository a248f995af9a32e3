use std::sync::Arc;

use crate::{
    application::ports::cache::{CacheTtls, QueryCache},
    domain::{employee::EmployeeReadRepository, sick_leave::SickLeaveReadRepository},
};

pub struct EmployeeQueryService {
    pub(super) employees: Arc<dyn EmployeeReadRepository>,
    pub(super) sick_leaves: Arc<dyn SickLeaveReadRepository>,
    pub(super) cache: Arc<dyn QueryCache>,
    pub(super) ttls: CacheTtls,
}

impl EmployeeQueryService {
    pub fn new(
        employees: Arc<dyn EmployeeReadRepository>,
        sick_leaves: Arc<dyn SickLeaveReadRepository>,
        cache: Arc<dyn QueryCache>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            employees,
            sick_leaves,
            cache,
            ttls,
        }
    }
}
