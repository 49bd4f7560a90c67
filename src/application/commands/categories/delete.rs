// src/application/commands/categories/delete.rs
use super::service::CategoryCommandService;
use crate::{
    application::{
        commands::capability::ensure_capability,
        dto::AuthenticatedUser,
        error::ApplicationResult,
    },
    domain::category::CategoryId,
};

pub struct DeleteCategoryCommand {
    pub id: i64,
}

impl CategoryCommandService {
    /// Soft-delete: the row stays for referential history, lookups stop
    /// treating it as live.
    pub async fn delete_category(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCategoryCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, "categories", "delete")?;

        let id = CategoryId::new(command.id)?;
        self.write_repo.soft_delete(id).await?;
        Ok(())
    }
}
