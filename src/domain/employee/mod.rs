pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Employee, EmployeeEdit, EmployeeSnapshot, EmployeeSummary, NewEmployee};
pub use repository::{EmployeeListCriteria, EmployeeListing, EmployeeReadRepository};
pub use value_objects::{EmployeeId, EmployeeNumber, PersonName, Position};
