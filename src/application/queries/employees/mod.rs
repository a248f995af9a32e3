mod get_by_id;
mod list;
mod service;

pub use get_by_id::GetEmployeeQuery;
pub use list::ListEmployeesQuery;
pub use service::EmployeeQueryService;
