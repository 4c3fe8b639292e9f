//! Data-access layer of the expense tracker.
//!
//! [`Engine`] maps list/get/insert/update/delete onto the `expenses` and
//! `authorized_users` tables. Every call borrows a pooled connection for its
//! own duration; there is no cached state between calls.

pub use authorized_users::AuthorizedUser;
pub use error::EngineError;
pub use expenses::{Expense, PaidBy, SYSTEM_USER, SplitType};
pub use fixed_point::{AMOUNT, FixedPoint, PERCENTAGE};
pub use ops::{Engine, EngineBuilder};
pub use util::creator_name;

mod authorized_users;
mod error;
mod expenses;
mod fixed_point;
mod ops;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
