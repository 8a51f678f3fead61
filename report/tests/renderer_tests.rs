mod common;

use std::fs;

use chrono::TimeDelta;

use market::{MarketSnapshot, analyze};
use report::archive::archive_file_name;
use report::{RenderError, ReportPaths, ReportRenderer, Reporter};

#[test]
fn writes_identical_latest_and_archive_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::with_default_retention(ReportPaths::under(dir.path()));
    renderer.ensure_directories().unwrap();
    let (snapshot, summary) = common::sample();
    let generated_at = common::captured_at();

    let artifact = renderer.render(&snapshot, &summary, generated_at).unwrap();

    assert_eq!(artifact.generated_at, generated_at);
    assert_eq!(artifact.latest_path, dir.path().join("latest_report.pdf"));
    assert_eq!(
        artifact.archive_path,
        dir.path()
            .join("archive")
            .join("crypto_analysis_20261016_120000.pdf")
    );

    let latest = fs::read(&artifact.latest_path).unwrap();
    let archived = fs::read(&artifact.archive_path).unwrap();
    assert!(latest.starts_with(b"%PDF"));
    assert_eq!(latest, archived);
}

#[test]
fn latest_is_overwritten_and_archive_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::with_default_retention(ReportPaths::under(dir.path()));
    let (snapshot, summary) = common::sample();
    let first = common::captured_at();
    let second = first + TimeDelta::minutes(5);

    renderer.render(&snapshot, &summary, first).unwrap();
    renderer.render(&snapshot, &summary, second).unwrap();

    let archive = dir.path().join("archive");
    assert_eq!(fs::read_dir(&archive).unwrap().count(), 2);
    assert!(archive.join(archive_file_name(first)).exists());
    assert!(archive.join(archive_file_name(second)).exists());
    assert_eq!(
        fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .count(),
        1
    );
}

#[test]
fn same_second_render_keeps_existing_archive_entry() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = ReportRenderer::with_default_retention(ReportPaths::under(dir.path()));
    let (snapshot, summary) = common::sample();
    let at = common::captured_at();

    let first = renderer.render(&snapshot, &summary, at).unwrap();
    let archived = fs::read(&first.archive_path).unwrap();

    let smaller = MarketSnapshot::new(snapshot.top(2).to_vec(), at).unwrap();
    let smaller_summary = analyze(&smaller);
    let second = renderer.render(&smaller, &smaller_summary, at).unwrap();

    assert_eq!(second.archive_path, first.archive_path);
    assert_eq!(fs::read(&second.archive_path).unwrap(), archived);
    assert_eq!(fs::read_dir(dir.path().join("archive")).unwrap().count(), 1);
    assert_ne!(fs::read(&second.latest_path).unwrap(), archived);
}

#[test]
fn failed_latest_write_keeps_preexisting_archive_entry() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths::under(dir.path());
    let renderer = ReportRenderer::with_default_retention(paths.clone());
    renderer.ensure_directories().unwrap();
    let at = common::captured_at();

    let existing = paths.archive_dir.join(archive_file_name(at));
    fs::write(&existing, b"earlier report").unwrap();
    fs::create_dir(&paths.latest).unwrap();
    fs::write(paths.latest.join("keep"), b"x").unwrap();

    let (snapshot, summary) = common::sample();
    assert!(renderer.render(&snapshot, &summary, at).is_err());

    assert_eq!(fs::read(&existing).unwrap(), b"earlier report");
}

#[test]
fn rendering_prunes_expired_archive_entries() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths::under(dir.path());
    let renderer = ReportRenderer::new(paths.clone(), TimeDelta::days(7));
    renderer.ensure_directories().unwrap();
    let now = common::captured_at();

    let expired = paths.archive_dir.join(archive_file_name(now - TimeDelta::days(8)));
    let kept = paths.archive_dir.join(archive_file_name(now - TimeDelta::days(3)));
    let odd = paths.archive_dir.join("crypto_analysis_garbage.pdf");
    for p in [&expired, &kept, &odd] {
        fs::write(p, b"old").unwrap();
    }

    let (snapshot, summary) = common::sample();
    renderer.render(&snapshot, &summary, now).unwrap();

    assert!(!expired.exists());
    assert!(kept.exists());
    assert!(odd.exists());
}

#[test]
fn failed_latest_write_leaves_no_orphan_archive() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths::under(dir.path());
    let renderer = ReportRenderer::with_default_retention(paths.clone());
    renderer.ensure_directories().unwrap();

    // Occupy the latest slot with a non-empty directory.
    fs::create_dir(&paths.latest).unwrap();
    fs::write(paths.latest.join("keep"), b"x").unwrap();

    let (snapshot, summary) = common::sample();
    let err = renderer
        .render(&snapshot, &summary, common::captured_at())
        .unwrap_err();

    assert!(matches!(err, RenderError::Io(_)));
    assert_eq!(fs::read_dir(&paths.archive_dir).unwrap().count(), 0);
    assert!(paths.latest.join("keep").exists());
}
