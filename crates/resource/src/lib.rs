//! Asset providers for the field report engine.
//!
//! - [`FilesystemResourceProvider`]: loads assets (the logo) from a directory
//! - [`InMemoryResourceProvider`]: re-exported from `fieldreport-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use fieldreport_traits::InMemoryResourceProvider;
