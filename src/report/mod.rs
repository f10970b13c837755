//! Report layout: cover page, header block, sections and footer, plus the
//! engine that turns a snapshot into PDF bytes.

pub mod builder;
pub mod composer;
pub mod engine;
pub mod header;
pub mod sections;
pub mod settings;
pub mod theme;

pub use builder::ReportEngineBuilder;
pub use composer::compose;
pub use engine::ReportEngine;
pub use settings::LayoutSettings;
