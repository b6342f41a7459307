//! QST: Quality Study Toolkit
//!
//! A Unix-style toolkit for process capability and measurement system
//! analysis over plain-text CSV measurement data.

pub mod analysis;
pub mod cli;
pub mod io;
