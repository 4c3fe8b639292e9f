use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};

use crate::{AuthorizedUser, ResultEngine, authorized_users};

use super::{Engine, ensure_same_id, map_update_error, not_found, with_tx};

const LABEL: &str = "authorized user";

impl Engine {
    /// Return the whole allow-list in store order.
    pub async fn list_authorized_users(&self) -> ResultEngine<Vec<AuthorizedUser>> {
        let users = authorized_users::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(AuthorizedUser::from)
            .collect();
        Ok(users)
    }

    pub async fn authorized_user(&self, id: i32) -> ResultEngine<Option<AuthorizedUser>> {
        let user = authorized_users::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(AuthorizedUser::from);
        Ok(user)
    }

    pub async fn authorized_user_exists(&self, id: i32) -> ResultEngine<bool> {
        let count = authorized_users::Entity::find_by_id(id)
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }

    /// Add an entry to the allow-list. Duplicated emails are accepted.
    pub async fn insert_authorized_user(
        &self,
        user: AuthorizedUser,
    ) -> ResultEngine<AuthorizedUser> {
        let active = authorized_users::ActiveModel::for_insert(&user)?;
        let model = active.insert(&self.database).await?;
        tracing::debug!(authorized_user_id = model.id, "authorized user inserted");
        Ok(model.into())
    }

    /// Overwrite the entry with `id`; same failure modes as `update_expense`.
    pub async fn update_authorized_user(&self, id: i32, user: AuthorizedUser) -> ResultEngine<()> {
        ensure_same_id(id, user.id, LABEL)?;
        let active = authorized_users::ActiveModel::for_update(&user)?;

        with_tx!(self, |db_tx| {
            if authorized_users::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Err(not_found(LABEL, id));
            }
            active
                .update(&db_tx)
                .await
                .map_err(|err| map_update_error(err, LABEL, id))?;
            Ok(())
        })
    }

    pub async fn delete_authorized_user(&self, id: i32) -> ResultEngine<()> {
        let result = authorized_users::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found(LABEL, id));
        }
        Ok(())
    }
}
