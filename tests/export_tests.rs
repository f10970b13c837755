mod common;

use common::fixtures::*;
use common::{GeneratedPdf, TestResult};
use fieldreport::{PreviewRegistry, ReportEngine, ReportError, report_filename};
use std::sync::Arc;

#[test]
fn test_save_to_file_uses_report_filename() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir()?;

    let path = common::engine().save_to_file(&north_plant(), dir.path())?;
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("North_Plant_Water_Treatment_Report_03-05-2024.pdf")
    );

    let pdf = GeneratedPdf::from_bytes(std::fs::read(&path)?)?;
    assert_pdf_contains_text!(pdf, "North Plant");

    // Only the finished file remains.
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_save_creates_missing_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let nested = dir.path().join("reports").join("2024");
    let path = common::engine().save_to_file(&blank_snapshot(), &nested)?;
    assert!(path.starts_with(&nested));
    assert_eq!(
        report_filename(&blank_snapshot()),
        "Site_Water_Treatment_Report_03-05-2024.pdf"
    );
    assert!(path.is_file());
    Ok(())
}

#[test]
fn test_save_overwrites_previous_export() -> TestResult {
    let dir = tempfile::tempdir()?;
    let engine = common::engine();
    let mut snapshot = north_plant();
    let first = engine.save_to_file(&snapshot, dir.path())?;
    snapshot.general_notes = long_notes(5);
    let second = engine.save_to_file(&snapshot, dir.path())?;

    assert_eq!(first, second);
    let pdf = GeneratedPdf::from_bytes(std::fs::read(&second)?)?;
    assert_pdf_contains_text!(pdf, "Visit note 5");
    Ok(())
}

#[test]
fn test_unauthorized_save_writes_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let engine = ReportEngine::builder().with_authorization(false).build();
    let result = engine.save_to_file(&north_plant(), dir.path());
    assert!(matches!(result, Err(ReportError::Unauthorized)));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn test_previews_keep_one_live_handle() -> TestResult {
    let registry = PreviewRegistry::new(Arc::new(common::engine()));
    assert_eq!(registry.live_count()?, 0);

    let first = registry.preview(&north_plant())?;
    let second = registry.preview(&north_plant())?;
    let third = registry.preview(&blank_snapshot())?;
    assert_eq!(registry.live_count()?, 1);
    assert_ne!(first, second);
    assert!(third.url().starts_with("blob:fieldreport/"));

    assert!(matches!(registry.bytes(first.url()), Err(ReportError::Export(_))));
    assert!(matches!(registry.release(&second), Err(ReportError::Export(_))));

    let bytes = registry.bytes(third.url())?;
    let pdf = GeneratedPdf::from_bytes(bytes.to_vec())?;
    assert_pdf_contains_text!(pdf, "Site Name");

    registry.release(&third)?;
    assert_eq!(registry.live_count()?, 0);
    assert!(registry.release(&third).is_err());
    Ok(())
}

#[test]
fn test_concurrent_previews() -> TestResult {
    let registry = Arc::new(PreviewRegistry::new(Arc::new(common::engine())));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.preview(&north_plant()).map(|h| h.url().to_string()))
        })
        .collect();

    let mut urls = Vec::new();
    for handle in handles {
        urls.push(handle.join().map_err(|_| "preview thread panicked")??);
    }
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), 4);
    assert_eq!(registry.live_count()?, 1);
    Ok(())
}

#[test]
fn test_unauthorized_preview_is_refused() -> TestResult {
    let engine = ReportEngine::builder().with_authorization(false).build();
    let registry = PreviewRegistry::new(Arc::new(engine));
    assert!(matches!(
        registry.preview(&north_plant()),
        Err(ReportError::Unauthorized)
    ));
    assert_eq!(registry.live_count()?, 0);
    Ok(())
}

#[test]
fn test_site_name_with_separators_saves_inside_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("reports");
    let engine = common::engine();

    let mut snapshot = north_plant();
    snapshot.site_name = "Plant A/B".into();
    let path = engine.save_to_file(&snapshot, &out)?;
    assert_eq!(path.parent(), Some(out.as_path()));
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("Plant_A_B_Water_Treatment_Report_03-05-2024.pdf")
    );

    snapshot.site_name = "../Escaped".into();
    let path = engine.save_to_file(&snapshot, &out)?;
    assert_eq!(path.parent(), Some(out.as_path()));
    assert!(path.is_file());

    // Nothing was written next to the output directory.
    let outside: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(Result::ok)
        .map(|entry| entry.file_name())
        .collect();
    assert_eq!(outside, vec![std::ffi::OsString::from("reports")]);
    assert_eq!(std::fs::read_dir(&out)?.count(), 2);
    Ok(())
}
