// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        audit::AuditLogWriter,
        commands::{
            audit::AuditCommandService, employees::EmployeeCommandService, sick_leaves::SickLeaveCommandService,
            users::UserCommandService,
        },
        dto::AuthenticatedUser,
        ports::{
            cache::{CacheTtls, QueryCache},
            ids::IdGenerator,
            security::{PasswordHasher, TokenManager},
            time::Clock,
        },
        queries::{
            audit::AuditQueryService, employees::EmployeeQueryService,
            sick_leaves::SickLeaveQueryService, users::UserQueryService,
        },
    },
    domain::{
        audit::AuditLogRepository, employee::EmployeeReadRepository,
        sick_leave::SickLeaveReadRepository, transaction::TransactionManager,
        user::UserRepository,
    },
};

/// Repositories and adapters the services are wired from.
pub struct ApplicationDependencies {
    pub user_repo: Arc<dyn UserRepository>,
    pub employee_repo: Arc<dyn EmployeeReadRepository>,
    pub sick_leave_repo: Arc<dyn SickLeaveReadRepository>,
    pub audit_log_repo: Arc<dyn AuditLogRepository>,
    pub transactions: Arc<dyn TransactionManager>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_manager: Arc<dyn TokenManager>,
    pub cache: Arc<dyn QueryCache>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn IdGenerator>,
    pub cache_ttls: CacheTtls,
}

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub sick_leave_commands: Arc<SickLeaveCommandService>,
    pub sick_leave_queries: Arc<SickLeaveQueryService>,
    pub employee_commands: Arc<EmployeeCommandService>,
    pub employee_queries: Arc<EmployeeQueryService>,
    pub audit_commands: Arc<AuditCommandService>,
    pub audit_queries: Arc<AuditQueryService>,
    audit_writer: Arc<AuditLogWriter>,
    token_manager: Arc<dyn TokenManager>,
    cache_ttls: CacheTtls,
}

impl ApplicationServices {
    pub fn new(deps: ApplicationDependencies) -> Self {
        let ApplicationDependencies {
            user_repo,
            employee_repo,
            sick_leave_repo,
            audit_log_repo,
            transactions,
            password_hasher,
            token_manager,
            cache,
            clock,
            ids,
            cache_ttls,
        } = deps;

        let audit_writer = Arc::new(AuditLogWriter::new(
            Arc::clone(&audit_log_repo),
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&user_repo),
            Arc::clone(&clock),
        ));

        let sick_leave_commands = Arc::new(SickLeaveCommandService::new(
            Arc::clone(&sick_leave_repo),
            Arc::clone(&employee_repo),
            Arc::clone(&transactions),
            Arc::clone(&audit_writer),
            Arc::clone(&cache),
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));
        let sick_leave_queries = Arc::new(SickLeaveQueryService::new(
            Arc::clone(&sick_leave_repo),
            Arc::clone(&cache),
            Arc::clone(&clock),
            cache_ttls,
        ));

        let employee_commands = Arc::new(EmployeeCommandService::new(
            Arc::clone(&employee_repo),
            Arc::clone(&sick_leave_repo),
            Arc::clone(&transactions),
            Arc::clone(&audit_writer),
            Arc::clone(&cache),
            Arc::clone(&clock),
            Arc::clone(&ids),
        ));
        let employee_queries = Arc::new(EmployeeQueryService::new(
            Arc::clone(&employee_repo),
            Arc::clone(&sick_leave_repo),
            Arc::clone(&cache),
            cache_ttls,
        ));

        let audit_commands = Arc::new(AuditCommandService::new(Arc::clone(&audit_writer)));
        let audit_queries = Arc::new(AuditQueryService::new(audit_log_repo));

        Self {
            user_commands,
            user_queries,
            sick_leave_commands,
            sick_leave_queries,
            employee_commands,
            employee_queries,
            audit_commands,
            audit_queries,
            audit_writer,
            token_manager,
            cache_ttls,
        }
    }

    /// Expiry of cached query results, also advertised to HTTP clients.
    pub fn cache_ttls(&self) -> CacheTtls {
        self.cache_ttls
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    /// Writer for audit entries recorded outside a mutation transaction.
    pub fn audit_writer(&self) -> Arc<AuditLogWriter> {
        Arc::clone(&self.audit_writer)
    }

    /// Verifies a raw bearer token.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
