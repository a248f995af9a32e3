mod bootstrap;
mod login;
mod password;
mod service;

pub use bootstrap::BootstrapAdminCommand;
pub use login::LoginUserCommand;
pub use service::UserCommandService;
