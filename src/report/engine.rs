use super::builder::ReportEngineBuilder;
use super::composer::compose;
use super::settings::LayoutSettings;
use crate::error::ReportError;
use crate::logo::LogoCache;
use crate::model::ReportSnapshot;
use fieldreport_layout::LaidOutDocument;
use fieldreport_render_core::DocumentRenderer;
use std::sync::Arc;
use std::time::Instant;

/// Produces service report PDFs from snapshots.
///
/// Each call lays out into its own page manager, so one engine can serve
/// many threads at once. The only shared state is the logo cache.
pub struct ReportEngine {
    pub(crate) settings: LayoutSettings,
    pub(crate) logo: Arc<LogoCache>,
    pub(crate) renderer: Arc<dyn DocumentRenderer>,
    pub(crate) authorized: bool,
}

impl ReportEngine {
    pub fn builder() -> ReportEngineBuilder {
        ReportEngineBuilder::new()
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn logo_cache(&self) -> &Arc<LogoCache> {
        &self.logo
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub(crate) fn ensure_authorized(&self) -> Result<(), ReportError> {
        if self.authorized {
            Ok(())
        } else {
            log::warn!("Refusing to generate a report: caller is not authorized");
            Err(ReportError::Unauthorized)
        }
    }

    /// Lays out the report without rendering it.
    pub fn layout(&self, snapshot: &ReportSnapshot) -> Result<LaidOutDocument, ReportError> {
        self.ensure_authorized()?;
        Ok(compose(snapshot, &self.settings, self.logo.get_logo())?)
    }

    /// Lays out and renders the report. Nothing is returned unless both steps succeed.
    pub fn generate_pdf(&self, snapshot: &ReportSnapshot) -> Result<Vec<u8>, ReportError> {
        let start = Instant::now();
        let document = self.layout(snapshot)?;
        let bytes = self.renderer.render(&document)?;
        log::info!(
            "Generated {}-page report for '{}' ({} bytes) in {:.2?}",
            document.page_count(),
            snapshot.site_name,
            bytes.len(),
            start.elapsed()
        );
        Ok(bytes)
    }
}

impl std::fmt::Debug for ReportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportEngine")
            .field("settings", &self.settings)
            .field("logo", &self.logo)
            .field("authorized", &self.authorized)
            .finish_non_exhaustive()
    }
}
