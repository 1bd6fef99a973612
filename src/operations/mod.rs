//! Shipped operations.
//!
//! Each operation is a unit type implementing [`Operation`](crate::operation::Operation):
//! a parameter struct rendered into the request element, and a detail struct
//! the classifier deserializes on success. Money and rates stay as decimal
//! text; callers parse them with the precision they need.

pub mod account_creation;
pub mod card_replacement;
pub mod customer_limit;
pub mod exchange_rate;
pub mod fraud_check;
pub mod mini_statement;

pub use account_creation::{AccountCreationOp, AccountCreationParams, CreatedAccount};
pub use card_replacement::{CardReplacement, CardReplacementOp, CardReplacementParams, ReplacementReason};
pub use customer_limit::{CustomerLimitOp, CustomerLimitParams, LimitAmendment};
pub use exchange_rate::{ExchangeRate, ExchangeRateOp, ExchangeRateParams};
pub use fraud_check::{FraudAssessment, FraudCheckOp, FraudCheckParams};
pub use mini_statement::{MiniStatement, MiniStatementOp, MiniStatementParams, Transaction};
