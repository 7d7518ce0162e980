//! Scanner integration tests
//!
//! Drives the full scan pipeline against temporary directory trees with a
//! fake prober standing in for ffprobe.

mod common;

use common::{
    h264_aac_mp4, h264_aac_mpegts, h264_mp3_mp4, hevc_ac3_mkv, mpeg4_aac_avi, FakeProber,
    MediaTree,
};
use playscan::config::ScanConfig;
use playscan::report;
use playscan::scanner::{Reason, ScanError, ScanEvent, Scanner};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn library() -> (MediaTree, FakeProber) {
    let tree = MediaTree::new();
    tree.touch("Movies/Alpha (2001)/alpha.mp4");
    tree.touch("Movies/Beta (2002)/beta.MKV");
    tree.touch("Movies/Beta (2002)/beta.srt");
    tree.touch("Movies/Gamma (1999)/gamma.avi");
    tree.touch("Shows/Delta/S01E01.mp4");
    tree.touch("Shows/Delta/S01E02.ts");
    tree.touch("Shows/Delta/S01E03.m2ts");
    tree.touch("Shows/Delta/folder.jpg");
    tree.touch("notes.txt");

    let prober = FakeProber::new()
        .with("alpha.mp4", h264_aac_mp4())
        .with("beta.MKV", hevc_ac3_mkv())
        .with("gamma.avi", mpeg4_aac_avi())
        .with("S01E01.mp4", h264_mp3_mp4())
        .with("S01E02.ts", h264_aac_mpegts());
    // S01E03.m2ts has no canned result, so it fails like a corrupt file.

    (tree, prober)
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/")
}

#[test]
fn test_partitions_files_into_buckets() {
    let (tree, prober) = library();
    let scanner = Scanner::new(Box::new(prober));

    let report = scanner.scan(tree.root()).unwrap();

    let compatible: Vec<_> = report
        .compatible
        .iter()
        .map(|e| relative(tree.root(), &e.path))
        .collect();
    assert_eq!(compatible, ["Movies/Alpha (2001)/alpha.mp4"]);
    assert!(report.compatible.iter().all(|e| e.reason == Reason::Compatible));

    // ffprobe names Matroska "matroska,webm", which none of the container
    // substrings match.
    let needs: Vec<_> = report
        .needs_conversion
        .iter()
        .map(|e| (relative(tree.root(), &e.path), e.reason.to_string()))
        .collect();
    let expected = [
        (
            "Movies/Beta (2002)/beta.MKV",
            "Uncommon container: matroska,webm",
        ),
        (
            "Movies/Gamma (1999)/gamma.avi",
            "Unsupported video codec: mpeg4",
        ),
        ("Shows/Delta/S01E01.mp4", "Unsupported audio codec: mp3"),
        ("Shows/Delta/S01E02.ts", "Uncommon container: mpegts"),
    ];
    let expected: Vec<_> = expected
        .iter()
        .map(|(p, r)| (p.to_string(), r.to_string()))
        .collect();
    assert_eq!(needs, expected);

    assert_eq!(
        report.unprocessed,
        vec![tree.root().join("Shows/Delta/S01E03.m2ts")]
    );
}

#[test]
fn test_total_equals_sum_of_buckets() {
    let (tree, prober) = library();
    let report = Scanner::new(Box::new(prober)).scan(tree.root()).unwrap();

    assert_eq!(report.total(), 6);
    assert_eq!(
        report.total(),
        report.compatible.len() + report.needs_conversion.len() + report.unprocessed.len()
    );
}

#[test]
fn test_only_video_extensions_are_probed() {
    let (tree, prober) = library();
    let calls = prober.call_log();

    Scanner::new(Box::new(prober)).scan(tree.root()).unwrap();

    let probed = calls.lock().unwrap().clone();
    assert_eq!(probed.len(), 6);
    for path in &probed {
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(
            !name.ends_with(".srt") && !name.ends_with(".jpg") && !name.ends_with(".txt"),
            "probed non-video file {name}"
        );
    }
}

#[test]
fn test_every_file_lands_in_exactly_one_bucket() {
    let (tree, prober) = library();
    let calls = prober.call_log();

    let report = Scanner::new(Box::new(prober)).scan(tree.root()).unwrap();

    let mut seen: Vec<PathBuf> = report
        .compatible
        .iter()
        .chain(&report.needs_conversion)
        .map(|e| e.path.clone())
        .chain(report.unprocessed.iter().cloned())
        .collect();
    seen.sort();

    let mut probed = calls.lock().unwrap().clone();
    probed.sort();
    assert_eq!(seen, probed);
}

#[test]
fn test_missing_root_fails_before_probing() {
    let prober = FakeProber::new().with("alpha.mp4", h264_aac_mp4());
    let calls = prober.call_log();

    let result = Scanner::new(Box::new(prober)).scan(Path::new("/no/such/path"));

    match result {
        Err(ScanError::DirectoryNotFound { path }) => {
            assert_eq!(path, PathBuf::from("/no/such/path"))
        }
        other => panic!("expected DirectoryNotFound, got {other:?}"),
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn test_file_as_root_is_not_a_directory() {
    let tree = MediaTree::new();
    let file = tree.touch("movie.mp4");

    let result = Scanner::new(Box::new(FakeProber::new())).scan(&file);
    assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
}

#[test]
fn test_empty_directory_yields_empty_report() {
    let tree = MediaTree::new();
    let report = Scanner::new(Box::new(FakeProber::new()))
        .scan(tree.root())
        .unwrap();

    assert_eq!(report.total(), 0);
}

#[test]
fn test_dotfile_with_video_suffix_is_scanned() {
    let tree = MediaTree::new();
    tree.touch("Movies/.mp4");
    tree.touch("Movies/.nfo");

    let prober = FakeProber::new().with(".mp4", h264_aac_mp4());
    let report = Scanner::new(Box::new(prober)).scan(tree.root()).unwrap();

    assert_eq!(report.total(), 1);
    assert_eq!(report.compatible[0].path, tree.root().join("Movies/.mp4"));
}

#[test]
fn test_probe_failure_never_classified() {
    let tree = MediaTree::new();
    tree.touch("broken.mkv");

    let report = Scanner::new(Box::new(FakeProber::new()))
        .scan(tree.root())
        .unwrap();

    assert!(report.compatible.is_empty());
    assert!(report.needs_conversion.is_empty());
    assert_eq!(report.unprocessed, vec![tree.root().join("broken.mkv")]);
}

#[test]
fn test_progress_events_in_scan_order() {
    let (tree, prober) = library();
    let events: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&events);

    let scanner = Scanner::new(Box::new(prober)).with_progress(Box::new(move |event| {
        let line = match event {
            ScanEvent::Analyzing(path) => format!("analyzing {}", path.display()),
            ScanEvent::ProbeFailed { path, .. } => format!("failed {}", path.display()),
        };
        sink.lock().unwrap().push(line);
    }));
    scanner.scan(tree.root()).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 7);
    let first = tree.root().join("Movies/Alpha (2001)/alpha.mp4");
    assert_eq!(events[0], format!("analyzing {}", first.display()));
    let failed = tree.root().join("Shows/Delta/S01E03.m2ts");
    assert_eq!(events[5], format!("analyzing {}", failed.display()));
    assert_eq!(events[6], format!("failed {}", failed.display()));
}

#[test]
fn test_parallel_scan_matches_sequential() {
    let (tree, prober) = library();
    let sequential = Scanner::new(Box::new(prober)).scan(tree.root()).unwrap();

    let (_, prober) = library();
    let parallel = Scanner::new(Box::new(prober))
        .with_config(ScanConfig {
            jobs: 4,
            follow_links: false,
        })
        .scan(tree.root())
        .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_report_renders_scan_results() {
    let (tree, prober) = library();
    let scan = Scanner::new(Box::new(prober)).scan(tree.root()).unwrap();

    let mut buf = Vec::new();
    report::write_text(&scan, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("Total video files found: 6"));
    assert!(text.contains("Files likely Direct Play compatible: 1"));
    assert!(text.contains("Files likely need conversion (or transcode): 4"));
    assert!(text.contains("Files that could not be processed: 1"));
    let unprocessed = tree.root().join("Shows/Delta/S01E03.m2ts");
    assert!(text.contains(&format!("- {}\n", unprocessed.display())));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_follow_config() {
    let tree = MediaTree::new();
    let outside = MediaTree::new();
    outside.touch("linked.mp4");
    std::os::unix::fs::symlink(outside.root(), tree.root().join("elsewhere")).unwrap();

    let prober = || FakeProber::new().with("linked.mp4", h264_aac_mp4());

    let report = Scanner::new(Box::new(prober())).scan(tree.root()).unwrap();
    assert_eq!(report.total(), 0);

    let report = Scanner::new(Box::new(prober()))
        .with_config(ScanConfig {
            jobs: 1,
            follow_links: true,
        })
        .scan(tree.root())
        .unwrap();
    assert_eq!(report.compatible.len(), 1);
}
