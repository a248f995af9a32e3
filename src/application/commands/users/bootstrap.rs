use super::{UserCommandService, password::validate_password};
use crate::{
    application::{dto::UserDto, error::ApplicationResult},
    domain::user::{Email, NewUser, PasswordHash, Role},
};

/// First administrator, created from configuration on an empty user table.
pub struct BootstrapAdminCommand {
    pub email: String,
    pub password: String,
}

impl UserCommandService {
    /// Returns `None` when users already exist; nothing is changed then.
    pub async fn bootstrap_admin(
        &self,
        command: BootstrapAdminCommand,
    ) -> ApplicationResult<Option<UserDto>> {
        if self.user_repo.count().await? > 0 {
            return Ok(None);
        }

        let email = Email::new(command.email)?;
        validate_password(&command.password)?;
        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(email, password_hash, Role::Admin, self.clock.now());
        let user = self.user_repo.insert(new_user).await?;
        tracing::info!(user_id = %user.id, "bootstrap administrator created");
        Ok(Some(user.into()))
    }
}
