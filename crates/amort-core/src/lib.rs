pub mod affordability;
pub mod analysis;
pub mod error;
pub mod rates;
pub mod schedule;
pub mod summary;
pub mod types;
pub mod validation;

pub use error::AmortError;
pub use types::*;

pub use affordability::{affordability_report, AffordabilityReport};
pub use analysis::{analyze_loan, LoanAnalysis};
pub use rates::{penalty_for_month, rate_for_month, PenaltyRate, PromotionalRate};
pub use schedule::{build_schedule, LoanParameters, ScheduleEntry};
pub use summary::{summarize, Summary};
pub use validation::validate_parameters;

/// Standard result type for all amort operations
pub type AmortResult<T> = Result<T, AmortError>;
