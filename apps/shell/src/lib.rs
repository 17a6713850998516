//! Command-line front end for the Summit registration client.

pub mod args;
pub mod submit;
