mod get_by_id;
mod list;
mod service;

pub use get_by_id::GetSickLeaveQuery;
pub use list::ListSickLeavesQuery;
pub use service::SickLeaveQueryService;
