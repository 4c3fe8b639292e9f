use sea_orm::{PaginatorTrait, TransactionTrait, prelude::*};

use crate::{Expense, ResultEngine, expenses};

use super::{Engine, ensure_same_id, map_update_error, not_found, with_tx};

const LABEL: &str = "expense";

impl Engine {
    /// Return every expense in store order.
    pub async fn list_expenses(&self) -> ResultEngine<Vec<Expense>> {
        expenses::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(Expense::try_from)
            .collect()
    }

    /// Return the expense with `id`, if any.
    pub async fn expense(&self, id: i32) -> ResultEngine<Option<Expense>> {
        expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Expense::try_from)
            .transpose()
    }

    pub async fn expense_exists(&self, id: i32) -> ResultEngine<bool> {
        let count = expenses::Entity::find_by_id(id)
            .count(&self.database)
            .await?;
        Ok(count > 0)
    }

    /// Persist a new expense and return it with the id assigned by the store.
    ///
    /// `expense.id` is ignored. Audit fields are written as given: stamping
    /// them is up to the caller.
    pub async fn insert_expense(&self, expense: Expense) -> ResultEngine<Expense> {
        let active = expenses::ActiveModel::for_insert(&expense)?;
        let model = active.insert(&self.database).await?;
        tracing::debug!(expense_id = model.id, "expense inserted");
        Expense::try_from(model)
    }

    /// Overwrite the expense with `id`.
    ///
    /// Fails with `IdMismatch` when `expense.id != id`, `KeyNotFound` when the
    /// row does not exist and `Conflict` when the store did not write the row.
    /// `created_at` and `created_by` keep their stored values.
    pub async fn update_expense(&self, id: i32, expense: Expense) -> ResultEngine<()> {
        ensure_same_id(id, expense.id, LABEL)?;
        let active = expenses::ActiveModel::for_update(&expense)?;

        with_tx!(self, |db_tx| {
            if expenses::Entity::find_by_id(id).one(&db_tx).await?.is_none() {
                return Err(not_found(LABEL, id));
            }
            active
                .update(&db_tx)
                .await
                .map_err(|err| map_update_error(err, LABEL, id))?;
            tracing::debug!(expense_id = id, "expense updated");
            Ok(())
        })
    }

    /// Remove the expense with `id`.
    pub async fn delete_expense(&self, id: i32) -> ResultEngine<()> {
        let result = expenses::Entity::delete_by_id(id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(not_found(LABEL, id));
        }
        tracing::debug!(expense_id = id, "expense deleted");
        Ok(())
    }
}
