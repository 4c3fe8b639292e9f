//! JSON bodies of the `/api` HTTP interface.
//!
//! Field names are camelCase. Request bodies match field names without regard
//! to case (`paidBy`, `PaidBy` and `paidby` are the same field), and decimals
//! are accepted as JSON numbers or strings. Responses emit decimals as JSON
//! numbers carrying every digit of the stored value.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub mod datetime {
    //! Lenient timestamp decoding for request bodies.

    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Parse RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) or a
    /// bare `YYYY-MM-DD` (midnight UTC).
    pub fn parse(value: &str) -> Result<DateTime<Utc>, String> {
        let value = value.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Ok(parsed.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }
        Err(format!("invalid timestamp: {value}"))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        raw.as_deref()
            .map(parse)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

/// Rename every key of `object` that matches one of `fields` ignoring ASCII
/// case to that field's canonical spelling. Unknown keys are kept as they are.
pub fn fold_field_names(object: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    object
        .into_iter()
        .map(|(key, value)| {
            let key = fields
                .iter()
                .find(|field| field.eq_ignore_ascii_case(&key))
                .map_or(key, |field| field.to_string());
            (key, value)
        })
        .collect()
}

/// Serde impls for a body derived with `#[serde(remote = "Self")]`: decoding
/// folds field names onto `$fields` first, encoding is the derived one.
macro_rules! case_insensitive_body {
    ($ty:ident, [$($field:literal),+ $(,)?]) => {
        impl $ty {
            pub const FIELDS: &'static [&'static str] = &[$($field),+];
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let object = Map::<String, Value>::deserialize(deserializer)?;
                let object = crate::fold_field_names(object, Self::FIELDS);
                $ty::deserialize(Value::Object(object)).map_err(serde::de::Error::custom)
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                $ty::serialize(self, serializer)
            }
        }
    };
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum PaidBy {
        #[serde(alias = "you")]
        You,
        #[serde(alias = "partner")]
        Partner,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum SplitType {
        #[serde(alias = "equal")]
        Equal,
        #[serde(alias = "custom")]
        Custom,
        #[serde(alias = "youPay")]
        YouPay,
        #[serde(alias = "partnerPays")]
        PartnerPays,
    }

    fn default_currency() -> String {
        "USD".to_string()
    }

    /// An expense as returned by the server.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        pub id: i32,
        pub description: String,
        pub date: DateTime<Utc>,
        #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
        pub amount: Decimal,
        pub paid_by: PaidBy,
        pub split_type: SplitType,
        /// Only meaningful with `SplitType::Custom`; never used in any computation.
        #[serde(
            default,
            serialize_with = "rust_decimal::serde::arbitrary_precision_option::serialize"
        )]
        pub your_percentage: Option<Decimal>,
        pub currency: String,
        pub category: Option<String>,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: Option<DateTime<Utc>>,
        pub created_by: String,
    }

    /// Request body of `POST /expenses` and `PUT /expenses/{id}`.
    ///
    /// `id` is ignored on create and must match the path on update. Audit
    /// fields may be present but are never honored.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(remote = "Self", rename_all = "camelCase")]
    pub struct ExpenseWrite {
        #[serde(default)]
        pub id: i32,
        pub description: String,
        /// Optional on create, where it defaults to the time of the request.
        /// Updates replace the whole record and must carry it.
        #[serde(default, deserialize_with = "crate::datetime::deserialize_option")]
        pub date: Option<DateTime<Utc>>,
        #[serde(serialize_with = "rust_decimal::serde::arbitrary_precision::serialize")]
        pub amount: Decimal,
        pub paid_by: PaidBy,
        pub split_type: SplitType,
        #[serde(
            default,
            serialize_with = "rust_decimal::serde::arbitrary_precision_option::serialize"
        )]
        pub your_percentage: Option<Decimal>,
        #[serde(default = "default_currency")]
        pub currency: String,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
        #[serde(default, deserialize_with = "crate::datetime::deserialize_option")]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub created_by: Option<String>,
    }

    case_insensitive_body!(
        ExpenseWrite,
        [
            "id",
            "description",
            "date",
            "amount",
            "paidBy",
            "splitType",
            "yourPercentage",
            "currency",
            "category",
            "notes",
            "createdAt",
            "createdBy",
        ]
    );
}

pub mod authorized_user {
    use super::*;

    /// An allow-list entry as returned by the server.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AuthorizedUser {
        pub id: i32,
        pub email: String,
        pub name: Option<String>,
        pub is_admin: bool,
    }

    /// Request body of `POST /authorizedusers` and `PUT /authorizedusers/{id}`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(remote = "Self", rename_all = "camelCase")]
    pub struct AuthorizedUserWrite {
        #[serde(default)]
        pub id: i32,
        pub email: String,
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub is_admin: bool,
    }

    case_insensitive_body!(AuthorizedUserWrite, ["id", "email", "name", "isAdmin"]);
}
