use super::engine::ReportEngine;
use super::settings::LayoutSettings;
use super::theme::REPORT_TITLE;
use crate::logo::LogoCache;
use fieldreport_render_core::DocumentRenderer;
use fieldreport_render_lopdf::LopdfRenderer;
use fieldreport_resource::FilesystemResourceProvider;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A builder for creating a `ReportEngine`.
pub struct ReportEngineBuilder {
    settings: LayoutSettings,
    logo_cache: Option<Arc<LogoCache>>,
    logo_dir: Option<PathBuf>,
    renderer: Option<Arc<dyn DocumentRenderer>>,
    authorized: bool,
}

impl Default for ReportEngineBuilder {
    fn default() -> Self {
        Self {
            settings: LayoutSettings::default(),
            logo_cache: None,
            logo_dir: None,
            renderer: None,
            authorized: true,
        }
    }
}

impl ReportEngineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Uses an existing logo cache, e.g. one shared with other engines.
    /// Takes precedence over `with_logo_dir`.
    pub fn with_logo_cache(mut self, cache: Arc<LogoCache>) -> Self {
        self.logo_cache = Some(cache);
        self
    }

    /// Loads `logo.png` from `dir` the first time a report needs it.
    pub fn with_logo_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.logo_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_settings(mut self, settings: LayoutSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Whether the caller may generate reports. Defaults to `true`.
    pub fn with_authorization(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    /// Replaces the default lopdf renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn build(self) -> ReportEngine {
        let logo = match (self.logo_cache, self.logo_dir) {
            (Some(cache), _) => cache,
            (None, Some(dir)) => {
                log::debug!("Logo assets will be read from {}", dir.display());
                Arc::new(LogoCache::new(Arc::new(FilesystemResourceProvider::new(dir))))
            }
            (None, None) => Arc::new(LogoCache::empty()),
        };
        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(LopdfRenderer::new().with_title(REPORT_TITLE)) as Arc<dyn DocumentRenderer>);

        ReportEngine {
            settings: self.settings,
            logo,
            renderer,
            authorized: self.authorized,
        }
    }
}
