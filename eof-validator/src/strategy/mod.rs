//! File sources for a check run.
//!
//! Only the filesystem source exists; `check_fs()` calls into it directly.

pub mod fs;
