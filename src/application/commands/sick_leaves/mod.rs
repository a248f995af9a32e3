// src/application/commands/sick_leaves/mod.rs
mod cancel;
mod create;
mod service;
mod update;

pub use cancel::CancelSickLeaveCommand;
pub use create::CreateSickLeaveCommand;
pub use service::SickLeaveCommandService;
pub use update::UpdateSickLeaveCommand;
