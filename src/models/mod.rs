pub mod entry;
pub mod fees;
pub mod snapshot;

pub use entry::*;
pub use fees::*;
pub use snapshot::*;
