pub mod audit;
pub mod employee;
pub mod errors;
pub mod sick_leave;
pub mod transaction;
pub mod user;
