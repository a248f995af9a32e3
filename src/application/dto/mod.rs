pub mod audit;
pub mod auth;
pub mod employees;
pub mod pagination;
pub mod serde_time;
pub mod sick_leaves;
pub mod users;

pub use audit::AuditLogDto;
pub use auth::{AuthTokenDto, AuthenticatedUser, TokenSubject};
pub use employees::{
    EmployeeDto, EmployeeListDto, EmployeeListFilterView, EmployeeListMeta, EmployeeMutationDto,
    EmployeeSummaryDto,
};
pub use pagination::CursorPage;
pub use sick_leaves::{
    SickLeaveDto, SickLeaveFilterView, SickLeaveListDto, SickLeaveListMeta, SickLeaveMutationDto,
    StatusCountsDto,
};
pub use users::{CapabilityView, LoginResultDto, UserDto, UserProfileDto, UserSummaryDto};
