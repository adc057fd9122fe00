mod codec;
mod error;
mod fs_access;
mod prompt;
mod registry;

pub use codec::{decode, encode, TargetsState};
pub use error::{Result, TargetError};
pub use fs_access::{MemFs, OsFs, TargetFile, TargetFs};
pub use prompt::{confirm, is_affirmative};
pub use registry::{Target, TargetRegistry, TargetRow};
