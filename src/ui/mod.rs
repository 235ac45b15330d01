//! Terminal presentation: listings on stdout and the GPA prompt on stdin.

pub mod listing;
pub mod prompt;
