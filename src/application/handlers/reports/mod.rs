//! Admin report handlers.
//!
//! Both reports exclude removed members.

mod get_collection_report;
mod list_defaulters;

pub use get_collection_report::GetCollectionReportHandler;
pub use list_defaulters::ListDefaultersHandler;
