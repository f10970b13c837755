//! Saving reports to disk and holding in-memory previews.

use crate::error::ReportError;
use crate::format::format_date_us;
use crate::model::ReportSnapshot;
use crate::report::ReportEngine;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

const PREVIEW_URL_PREFIX: &str = "blob:fieldreport/";

/// `{site}_Water_Treatment_Report_{MM-DD-YYYY}.pdf` with whitespace runs
/// replaced by underscores. A blank site name becomes `Site`.
///
/// Path separators and other characters not allowed in file names are
/// replaced by `_` as well, so the result is always a single path component.
pub fn report_filename(snapshot: &ReportSnapshot) -> String {
    let site = if snapshot.site_name.is_empty() {
        "Site"
    } else {
        snapshot.site_name.as_str()
    };
    let name = format!(
        "{}_Water_Treatment_Report_{}.pdf",
        site,
        format_date_us(&snapshot.date)
    );
    sanitize_file_name(&name)
}

fn is_forbidden_in_filename(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

fn sanitize_file_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else if is_forbidden_in_filename(c) {
            out.push('_');
            in_run = false;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

impl ReportEngine {
    /// Renders the report and writes it into `dir` under [`report_filename`].
    ///
    /// The file is written to a temporary file in the same directory and then
    /// renamed, so a failed export never leaves a partial PDF behind.
    pub fn save_to_file<P: AsRef<Path>>(
        &self,
        snapshot: &ReportSnapshot,
        dir: P,
    ) -> Result<PathBuf, ReportError> {
        let bytes = self.generate_pdf(snapshot)?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let filename = report_filename(snapshot);
        let path = dir.join(&filename);
        if path.parent() != Some(dir) || matches!(filename.as_str(), "." | "..") {
            return Err(ReportError::Export(format!(
                "report name '{}' does not stay inside {}",
                filename,
                dir.display()
            )));
        }

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| ReportError::Io(e.error))?;

        log::info!("Saved report to {}", path.display());
        Ok(path)
    }
}

/// Identifies one rendered preview held by a [`PreviewRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Default)]
struct PreviewState {
    issued: u64,
    live: Option<(String, Arc<Vec<u8>>)>,
}

/// Keeps the bytes of the most recent preview in memory.
///
/// Issuing a new preview releases the previous one, so at most one preview
/// is ever held.
pub struct PreviewRegistry {
    engine: Arc<ReportEngine>,
    state: Mutex<PreviewState>,
}

impl PreviewRegistry {
    pub fn new(engine: Arc<ReportEngine>) -> Self {
        Self {
            engine,
            state: Mutex::new(PreviewState::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PreviewState>, ReportError> {
        self.state
            .lock()
            .map_err(|_| ReportError::Export("preview registry lock poisoned".to_string()))
    }

    pub fn preview(&self, snapshot: &ReportSnapshot) -> Result<PreviewHandle, ReportError> {
        let bytes = self.engine.generate_pdf(snapshot)?;
        let mut state = self.lock()?;
        if let Some((previous, _)) = state.live.take() {
            log::debug!("Released preview {}", previous);
        }
        state.issued += 1;
        let url = format!("{}{}", PREVIEW_URL_PREFIX, state.issued);
        state.live = Some((url.clone(), Arc::new(bytes)));
        Ok(PreviewHandle { url })
    }

    pub fn release(&self, handle: &PreviewHandle) -> Result<(), ReportError> {
        let mut state = self.lock()?;
        match &state.live {
            Some((url, _)) if *url == handle.url => {
                state.live = None;
                Ok(())
            }
            _ => Err(ReportError::Export(format!(
                "preview {} is no longer live",
                handle.url
            ))),
        }
    }

    pub fn bytes(&self, url: &str) -> Result<Arc<Vec<u8>>, ReportError> {
        let state = self.lock()?;
        match &state.live {
            Some((live_url, bytes)) if live_url == url => Ok(Arc::clone(bytes)),
            _ => Err(ReportError::Export(format!("preview {} is no longer live", url))),
        }
    }

    /// Number of previews currently held, zero or one.
    pub fn live_count(&self) -> Result<usize, ReportError> {
        Ok(usize::from(self.lock()?.live.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(site: &str, date: &str) -> ReportSnapshot {
        ReportSnapshot {
            site_name: site.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn filename_uses_site_and_us_date() {
        assert_eq!(
            report_filename(&snapshot("North Plant", "2024-03-05")),
            "North_Plant_Water_Treatment_Report_03-05-2024.pdf"
        );
        assert_eq!(
            report_filename(&snapshot("", "2024-03-05")),
            "Site_Water_Treatment_Report_03-05-2024.pdf"
        );
        assert_eq!(
            report_filename(&snapshot("East   Boiler\tHouse", "2024-03-05")),
            "East_Boiler_House_Water_Treatment_Report_03-05-2024.pdf"
        );
    }

    #[test]
    fn filename_with_leading_whitespace() {
        assert_eq!(
            report_filename(&snapshot("  Mill", "")),
            "_Mill_Water_Treatment_Report_.pdf"
        );
    }

    #[test]
    fn filename_is_a_single_path_component() {
        assert_eq!(
            report_filename(&snapshot("Plant A/B", "2024-03-05")),
            "Plant_A_B_Water_Treatment_Report_03-05-2024.pdf"
        );
        assert_eq!(
            report_filename(&snapshot("../Escaped", "2024-03-05")),
            ".._Escaped_Water_Treatment_Report_03-05-2024.pdf"
        );
        assert_eq!(
            report_filename(&snapshot(r"C:\Sites\Mill", "2024/03/05")),
            "C__Sites_Mill_Water_Treatment_Report_2024_03_05.pdf"
        );
    }

    #[test]
    fn poisoned_registry_reports_errors() {
        let registry = Arc::new(PreviewRegistry::new(Arc::new(ReportEngine::builder().build())));
        let poisoner = Arc::clone(&registry);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the preview lock");
        })
        .join();

        assert!(matches!(registry.live_count(), Err(ReportError::Export(_))));
        assert!(matches!(
            registry.preview(&ReportSnapshot::default()),
            Err(ReportError::Export(_))
        ));
    }
}
