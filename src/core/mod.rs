pub mod ledger;
pub mod rates;
pub mod triangle;

pub use crate::domain::model::{
    Category, Currency, LedgerData, LedgerReport, Operation, OperationKind, ReportLine,
    UserProfile,
};
pub use crate::domain::ports::{ConfigProvider, RateProvider, Storage};
pub use crate::utils::error::Result;
