// src/application/commands/users/register.rs
use super::{UserCommandService, password::validate_password};
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{NewUser, PasswordHash, Role, Username},
};

pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub role: Option<Role>,
}

impl UserCommandService {
    /// Open registration creates customers; the very first account becomes
    /// the admin. Explicit roles require an admin actor.
    pub async fn register(
        &self,
        actor: Option<&AuthenticatedUser>,
        command: RegisterUserCommand,
    ) -> ApplicationResult<UserDto> {
        let username = Username::new(command.username)?;
        validate_password(&command.password)?;

        let existing = self.user_repo.count().await?;
        let role = determine_role(existing, actor, command.role)?;

        if existing > 0 && self.user_repo.find_by_username(&username).await?.is_some() {
            return Err(ApplicationError::conflict("username already exists"));
        }

        let hashed = self.password_hasher.hash(&command.password).await?;
        let password_hash = PasswordHash::new(hashed)?;

        let new_user = NewUser::new(username, password_hash, role, self.clock.now());
        let user = self.user_repo.insert(new_user).await?;

        Ok(user.into())
    }
}

fn determine_role(
    existing: u64,
    actor: Option<&AuthenticatedUser>,
    requested: Option<Role>,
) -> ApplicationResult<Role> {
    if existing == 0 {
        return Ok(Role::Admin);
    }
    match requested {
        None => Ok(Role::Customer),
        Some(role) => {
            let requester = actor.ok_or_else(|| {
                ApplicationError::forbidden("administrative privileges are required")
            })?;
            ensure_capability(requester, "users", "create")?;
            Ok(role)
        }
    }
}
