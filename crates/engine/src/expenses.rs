//! Expense primitives.
//!
//! An `Expense` is one purchase/payment record. `paid_by`, `split_type` and
//! `your_percentage` are informational: no split is ever computed from them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine,
    fixed_point::{AMOUNT, PERCENTAGE},
    util::{check_max_len, normalize_currency},
};

/// Identity recorded when an expense is created without a caller.
pub const SYSTEM_USER: &str = "System";

/// Who paid for the expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaidBy {
    You,
    Partner,
}

impl PaidBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::You => "You",
            Self::Partner => "Partner",
        }
    }
}

impl TryFrom<&str> for PaidBy {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "You" => Ok(Self::You),
            "Partner" => Ok(Self::Partner),
            other => Err(EngineError::InvalidField(format!(
                "invalid paid_by: {other}"
            ))),
        }
    }
}

/// How the expense is meant to be shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitType {
    Equal,
    Custom,
    YouPay,
    PartnerPays,
}

impl SplitType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::Custom => "Custom",
            Self::YouPay => "YouPay",
            Self::PartnerPays => "PartnerPays",
        }
    }
}

impl TryFrom<&str> for SplitType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Equal" => Ok(Self::Equal),
            "Custom" => Ok(Self::Custom),
            "YouPay" => Ok(Self::YouPay),
            "PartnerPays" => Ok(Self::PartnerPays),
            other => Err(EngineError::InvalidField(format!(
                "invalid split_type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i32,
    pub description: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub paid_by: PaidBy,
    pub split_type: SplitType,
    pub your_percentage: Option<Decimal>,
    pub currency: String,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub created_by: String,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub date: DateTimeUtc,
    pub amount_minor: i64,
    pub paid_by: String,
    pub split_type: String,
    pub your_percentage_bp: Option<i64>,
    pub currency: String,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Validated column values shared by inserts and updates.
struct Columns {
    description: String,
    amount_minor: i64,
    your_percentage_bp: Option<i64>,
    currency: String,
    category: Option<String>,
}

fn validate(expense: &Expense) -> ResultEngine<Columns> {
    check_max_len("description", &expense.description, 200)?;
    if let Some(category) = expense.category.as_deref() {
        check_max_len("category", category, 100)?;
    }
    check_max_len("created_by", &expense.created_by, 100)?;

    Ok(Columns {
        description: expense.description.clone(),
        amount_minor: AMOUNT.to_minor(expense.amount, "amount")?,
        your_percentage_bp: expense
            .your_percentage
            .map(|value| PERCENTAGE.to_minor(value, "your_percentage"))
            .transpose()?,
        currency: normalize_currency(&expense.currency)?,
        category: expense.category.clone(),
    })
}

impl ActiveModel {
    /// Active model for a brand new row: the id is left to the store.
    pub(crate) fn for_insert(expense: &Expense) -> ResultEngine<Self> {
        let columns = validate(expense)?;
        Ok(Self {
            id: ActiveValue::NotSet,
            description: ActiveValue::Set(columns.description),
            date: ActiveValue::Set(expense.date),
            amount_minor: ActiveValue::Set(columns.amount_minor),
            paid_by: ActiveValue::Set(expense.paid_by.as_str().to_string()),
            split_type: ActiveValue::Set(expense.split_type.as_str().to_string()),
            your_percentage_bp: ActiveValue::Set(columns.your_percentage_bp),
            currency: ActiveValue::Set(columns.currency),
            category: ActiveValue::Set(columns.category),
            notes: ActiveValue::Set(expense.notes.clone()),
            created_at: ActiveValue::Set(expense.created_at),
            updated_at: ActiveValue::Set(expense.updated_at),
            created_by: ActiveValue::Set(expense.created_by.clone()),
        })
    }

    /// Active model overwriting an existing row.
    ///
    /// `created_at` and `created_by` stay `NotSet` so the stored audit values
    /// are never part of the UPDATE.
    pub(crate) fn for_update(expense: &Expense) -> ResultEngine<Self> {
        let columns = validate(expense)?;
        Ok(Self {
            id: ActiveValue::Unchanged(expense.id),
            description: ActiveValue::Set(columns.description),
            date: ActiveValue::Set(expense.date),
            amount_minor: ActiveValue::Set(columns.amount_minor),
            paid_by: ActiveValue::Set(expense.paid_by.as_str().to_string()),
            split_type: ActiveValue::Set(expense.split_type.as_str().to_string()),
            your_percentage_bp: ActiveValue::Set(columns.your_percentage_bp),
            currency: ActiveValue::Set(columns.currency),
            category: ActiveValue::Set(columns.category),
            notes: ActiveValue::Set(expense.notes.clone()),
            created_at: ActiveValue::NotSet,
            updated_at: ActiveValue::Set(expense.updated_at),
            created_by: ActiveValue::NotSet,
        })
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            description: model.description,
            date: model.date,
            amount: AMOUNT.from_minor(model.amount_minor),
            paid_by: PaidBy::try_from(model.paid_by.as_str())?,
            split_type: SplitType::try_from(model.split_type.as_str())?,
            your_percentage: model.your_percentage_bp.map(|bp| PERCENTAGE.from_minor(bp)),
            currency: model.currency,
            category: model.category,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
            created_by: model.created_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expense {
        Expense {
            id: 7,
            description: "Dinner".to_string(),
            date: Utc::now(),
            amount: Decimal::new(5000, 2),
            paid_by: PaidBy::You,
            split_type: SplitType::Equal,
            your_percentage: None,
            currency: "usd".to_string(),
            category: Some("Food".to_string()),
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
            created_by: "a@example.com".to_string(),
        }
    }

    #[test]
    fn enums_round_trip_through_their_column_text() {
        for paid_by in [PaidBy::You, PaidBy::Partner] {
            assert_eq!(PaidBy::try_from(paid_by.as_str()).unwrap(), paid_by);
        }
        for split in [
            SplitType::Equal,
            SplitType::Custom,
            SplitType::YouPay,
            SplitType::PartnerPays,
        ] {
            assert_eq!(SplitType::try_from(split.as_str()).unwrap(), split);
        }
        assert!(PaidBy::try_from("Nobody").is_err());
    }

    #[test]
    fn update_model_leaves_audit_columns_untouched() {
        let active = ActiveModel::for_update(&sample()).unwrap();
        assert_eq!(active.id, ActiveValue::Unchanged(7));
        assert_eq!(active.created_at, ActiveValue::NotSet);
        assert_eq!(active.created_by, ActiveValue::NotSet);
        assert_eq!(active.amount_minor, ActiveValue::Set(5000));
        assert_eq!(active.currency, ActiveValue::Set("USD".to_string()));
    }

    #[test]
    fn insert_model_lets_the_store_assign_the_id() {
        let active = ActiveModel::for_insert(&sample()).unwrap();
        assert_eq!(active.id, ActiveValue::NotSet);
        assert_eq!(
            active.created_by,
            ActiveValue::Set("a@example.com".to_string())
        );
    }

    #[test]
    fn oversized_description_is_rejected() {
        let mut expense = sample();
        expense.description = "x".repeat(201);
        assert!(matches!(
            ActiveModel::for_insert(&expense),
            Err(EngineError::InvalidField(_))
        ));
    }
}
