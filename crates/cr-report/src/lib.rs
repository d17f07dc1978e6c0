//! Report synthesis engine for certification test sessions.
//!
//! Takes a fully-populated, immutable [`cr_session::SessionSnapshot`] and
//! renders two artifacts:
//!
//! - a machine-readable JSON submission document ([`json::JsonReportBuilder`])
//! - a self-contained, human-browsable HTML report ([`html::HtmlReportBuilder`])
//!
//! Both builders resolve each job's effective category and certification
//! status through the same [`StatusResolver`], count outcomes through the
//! same aggregation functions, and iterate jobs in lexicographic id order, so
//! output is deterministic and the two documents agree with each other.
//!
//! # Example
//!
//! ```no_run
//! use cr_report::{HtmlReportBuilder, JsonReportBuilder, StatusResolver};
//! use cr_session::SessionSnapshot;
//!
//! let session = SessionSnapshot::default();
//! let resolver = StatusResolver::default();
//! let json = JsonReportBuilder::new(&session, &resolver).build().unwrap();
//! let html = HtmlReportBuilder::new(&session, &resolver).build().unwrap();
//! # let _ = (json, html);
//! ```

pub mod error;
pub mod html;
pub mod json;
pub mod resolve;
pub mod summary;
pub mod writer;

pub use error::{ReportError, Result};
pub use html::HtmlReportBuilder;
pub use json::JsonReportBuilder;
pub use resolve::{Resolution, StatusResolver};
pub use summary::OutcomeSummary;
pub use writer::write_atomic;
