// emprecord - Employee record manager with JSONL persistence

pub mod config;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod input;
pub mod jsonl;
pub mod models;
pub mod shell;
pub mod store;
pub mod validate;

// Re-export main types for convenience
pub use config::Config;
pub use error::{AddError, NotFound, ParseError, PersistError, ValidationError};
pub use filter::SearchCriteria;
pub use gateway::{Gateway, SessionLock};
pub use models::{Employee, EmployeeId, EmployeePatch, Field, NewEmployee};
pub use shell::{Shell, format_table};
pub use store::{ModifyReport, Store};
