//! Listing reports.
//!
//! [`ListingAggregator`] queries the catalog for a collection's children (or
//! a single data object) and merges ids, ACLs, metadata and replicas into one
//! [`ReportDocument`].

mod aggregator;
mod report;

pub use aggregator::{ListingAggregator, ReportFlags};
pub use report::{
    CollectionRecord, DataObjectRecord, ReplicaRecord, ReportDocument, Section, TIME_FORMAT,
};
