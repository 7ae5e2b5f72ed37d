//! Progress reporting during a confirmation run

pub mod reporter;
