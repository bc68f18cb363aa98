mod contact;
mod entry;

pub use contact::*;
pub use entry::*;
