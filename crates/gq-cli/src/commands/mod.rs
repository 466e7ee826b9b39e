//! CLI command implementations

pub(crate) mod common;
pub(crate) mod list;
pub(crate) mod load;
pub(crate) mod query;
