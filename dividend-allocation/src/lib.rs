mod account;
pub use account::{AccountPath, DerivedAccounts};

mod accrual;
pub use accrual::{AccrualCode, AccrualRecord};

mod allocate;
pub use allocate::{allocate, AllocatedShare, PositionRow, MINOR_UNIT_SCALE};

pub mod defaults;

mod engine;
pub use engine::{Engine, PositionQuery, Settings};

mod errors;
pub use errors::{AccountError, HarvestError};

mod filter;
pub use filter::eligible;

mod format;

mod transaction;
pub use transaction::{Amount, Posting, Price, Transaction, TXNID_KEY};
