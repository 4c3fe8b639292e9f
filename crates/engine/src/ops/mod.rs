use sea_orm::{DatabaseConnection, DbErr};

use crate::{EngineError, ResultEngine};

mod authorized_users;
mod expenses;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// An update must target the row the record describes.
fn ensure_same_id(path_id: i32, record_id: i32, label: &str) -> ResultEngine<()> {
    if path_id != record_id {
        return Err(EngineError::IdMismatch(format!(
            "{label} {path_id} cannot be overwritten with record {record_id}"
        )));
    }
    Ok(())
}

/// Translate the store's "no row written" outcome into a conflict.
fn map_update_error(err: DbErr, label: &str, id: i32) -> EngineError {
    match err {
        DbErr::RecordNotUpdated => {
            EngineError::Conflict(format!("{label} {id} changed while updating"))
        }
        other => EngineError::Database(other),
    }
}

fn not_found(label: &str, id: i32) -> EngineError {
    EngineError::KeyNotFound(format!("{label} {id}"))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_ids_are_rejected() {
        assert!(ensure_same_id(3, 3, "expense").is_ok());
        assert!(matches!(
            ensure_same_id(3, 4, "expense"),
            Err(EngineError::IdMismatch(_))
        ));
    }

    #[test]
    fn record_not_updated_becomes_conflict() {
        let err = map_update_error(DbErr::RecordNotUpdated, "expense", 9);
        assert_eq!(
            err,
            EngineError::Conflict("expense 9 changed while updating".to_string())
        );
        let err = map_update_error(DbErr::Custom("boom".to_string()), "expense", 9);
        assert!(matches!(err, EngineError::Database(_)));
    }
}
