//! Command implementations

pub mod hashes;
pub mod init;
pub mod passthrough;
pub mod verify;

pub use hashes::execute as hashes;
pub use init::execute as init;
pub use passthrough::execute as passthrough;
pub use verify::execute as verify;
