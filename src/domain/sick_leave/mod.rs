pub mod entity;
pub mod filter;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use entity::{
    NewSickLeave, SickLeave, SickLeaveDetails, SickLeaveEdit, SickLeaveSnapshot, StatusSnapshot,
};
pub use filter::{DateBounds, RelativePeriod, SickLeaveListCriteria};
pub use repository::{SickLeaveListing, SickLeaveReadRepository, StatusCounts};
pub use value_objects::{LeavePeriod, Notes, SickLeaveId, SickLeaveStatus};
