//! `istio.networking` API records, grouped by schema version.
//!
//! [`v1alpha3`] holds the record definitions. [`v1`] is the stable version of
//! the same API and re-exports those definitions unchanged.

pub mod v1;
pub mod v1alpha3;
