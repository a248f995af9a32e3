pub mod audit;
mod capability;
pub mod employees;
pub mod sick_leaves;
pub mod users;
