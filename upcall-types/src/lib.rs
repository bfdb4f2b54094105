//! Upcall-specific error taxonomy, configuration primitives and report envelopes.
#![warn(missing_docs)]

mod config;
mod context;
mod error;
mod reports;

pub use config::{Paradigm, UpcallConfig};
pub use context::{RequestContext, TraceId};
pub use error::UpcallError;
pub use reports::UpcallReport;
