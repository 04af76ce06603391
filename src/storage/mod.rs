//! Profile sources for Chairside.
//!
//! Read-only ingestion of profile records from files or memory. Nothing here
//! persists derived stats.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileProfileSource;
pub use memory::MemoryProfileSource;
pub use traits::ProfileSource;
