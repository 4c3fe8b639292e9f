//! Authorized users allow-list (minimal entity).
//!
//! Nothing checks requests against this table; `email` is not unique.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{ResultEngine, util::check_max_len};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedUser {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub is_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authorized_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn validate(user: &AuthorizedUser) -> ResultEngine<()> {
    check_max_len("email", &user.email, 100)?;
    if let Some(name) = user.name.as_deref() {
        check_max_len("name", name, 100)?;
    }
    Ok(())
}

impl ActiveModel {
    pub(crate) fn for_insert(user: &AuthorizedUser) -> ResultEngine<Self> {
        validate(user)?;
        Ok(Self {
            id: ActiveValue::NotSet,
            email: ActiveValue::Set(user.email.clone()),
            name: ActiveValue::Set(user.name.clone()),
            is_admin: ActiveValue::Set(user.is_admin),
        })
    }

    pub(crate) fn for_update(user: &AuthorizedUser) -> ResultEngine<Self> {
        validate(user)?;
        Ok(Self {
            id: ActiveValue::Unchanged(user.id),
            email: ActiveValue::Set(user.email.clone()),
            name: ActiveValue::Set(user.name.clone()),
            is_admin: ActiveValue::Set(user.is_admin),
        })
    }
}

impl From<Model> for AuthorizedUser {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            is_admin: model.is_admin,
        }
    }
}
