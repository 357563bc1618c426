//! Band configuration data model and preset persistence.

pub(crate) mod band;
