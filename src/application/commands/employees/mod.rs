// src/application/commands/employees/mod.rs
mod create;
mod deactivate;
mod service;
mod update;

pub use create::CreateEmployeeCommand;
pub use deactivate::DeactivateEmployeeCommand;
pub use service::EmployeeCommandService;
pub use update::UpdateEmployeeCommand;
