mod entry;
mod result;
mod snapshot;

pub use entry::ResultEntry;
pub use result::CommandResult;
pub use snapshot::{DiskUsage, MemoryUsage, ProcessInfo, SystemSnapshot};
