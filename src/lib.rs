//! Field analysis / service report engine.
//!
//! A [`ReportSnapshot`] holds one site visit: chemistry readings for boilers,
//! support systems and closed loops plus site details. [`ReportEngine`] lays
//! it out as a paginated A4 report and renders it to PDF bytes, which the
//! export helpers write to disk or hold as an in-memory preview.
//!
//! ```no_run
//! use fieldreport::{ReportEngine, ReportSnapshot};
//!
//! # fn main() -> Result<(), fieldreport::ReportError> {
//! let engine = ReportEngine::builder().with_logo_dir("assets").build();
//! let snapshot = ReportSnapshot::default();
//! let path = engine.save_to_file(&snapshot, "reports")?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod format;
pub mod limits;
pub mod logo;
pub mod model;
pub mod report;

pub use error::ReportError;
pub use export::{PreviewHandle, PreviewRegistry, report_filename};
pub use limits::{ControlLimit, ValidationStatus};
pub use logo::LogoCache;
pub use model::{
    Boiler, ClosedLoop, InstrumentRecord, RecordId, ReportSnapshot, ServiceFrequency,
    SupportSystem,
};
pub use report::{LayoutSettings, ReportEngine, ReportEngineBuilder};

pub use fieldreport_layout::LaidOutDocument;
pub use fieldreport_traits::{InMemoryResourceProvider, ResourceProvider};
pub use fieldreport_resource::FilesystemResourceProvider;
