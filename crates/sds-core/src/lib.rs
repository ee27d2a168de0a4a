//! Engine behind the SDS register.
//!
//! [`SubstanceRegistry`] owns the ordered record collection,
//! [`currency_status`] judges whether a sheet is still current,
//! [`filter_by_name`] derives the search view, and [`Session`] ties the
//! pieces together behind the operations a front end is allowed to call.

pub mod currency;
pub mod filter;
pub mod registry;
pub mod session;

pub use currency::{CurrencyStatus, MAX_SHEET_AGE_DAYS, currency_status};
pub use filter::filter_by_name;
pub use registry::SubstanceRegistry;
pub use session::{ImportError, Session};
