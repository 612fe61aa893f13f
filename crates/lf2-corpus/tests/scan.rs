//! Pool behaviour over a small on-disk corpus.

use std::fs;
use std::path::{Path, PathBuf};

use lf2_core::StreamItem;
use lf2_corpus::{discover, scan_corpus, CorpusConfig, CorpusError};
use lf2_replay::{decision_hash, DecodeConfig};
use lf2_test_utils::{random_decisions, ContainerBuilder};

fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, bytes).unwrap();
    path
}

/// Three decodable files, one truncated, one with a bad header.
fn mixed_corpus(dir: &Path) -> Vec<PathBuf> {
    let good = ContainerBuilder::new(4, 1).direct(&[1, 2, 3, 4]);
    let mut truncated = ContainerBuilder::new(4, 1).direct(&[1, 2, 3, 4]).build();
    truncated.pop();
    let mut bad = ContainerBuilder::new(1, 1).build();
    bad[0] = b'X';
    vec![
        write(dir, "a.lf2", &good.build()),
        write(dir, "b.lf2", &truncated),
        write(dir, "c.lf2", &bad),
        write(dir, "sub/d.LF2", &good.build()),
        write(dir, "sub/e.lf2", &ContainerBuilder::new(1, 1).matched(0, 3).build()),
    ]
}

#[test]
fn mixed_corpus_reports_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let written = mixed_corpus(dir.path());
    let paths = discover(dir.path()).unwrap();
    assert_eq!(paths, written);

    let report = scan_corpus(paths.clone(), &CorpusConfig::default()).unwrap();
    assert_eq!(report.len(), 5);
    let order: Vec<_> = report.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(order, paths);

    assert_eq!(report.complete_count(), 3);
    assert_eq!(report.truncated_count(), 1);
    assert_eq!(report.failed_count(), 1);

    let b = report.get(&paths[1]).unwrap().as_ref().unwrap();
    assert_eq!(b.truncation.unwrap().item, StreamItem::Literal);
    assert_eq!(b.emitted, 3);

    assert!(matches!(
        report.get(&paths[2]).unwrap(),
        Err(CorpusError::InvalidFormat { .. })
    ));

    // One match of length 3 against a 1-pixel image is clipped to 1 byte.
    let e = report.get(&paths[4]).unwrap().as_ref().unwrap();
    assert_eq!((e.matches, e.match_bytes, e.emitted), (1, 3, 1));
}

#[test]
fn worker_count_does_not_change_results() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..12u64 {
        let decisions = random_decisions(i, 200);
        let file = ContainerBuilder::new(1, 1).decisions(decisions).build();
        write(dir.path(), &format!("f{i:02}.lf2"), &file);
    }
    let paths = discover(dir.path()).unwrap();

    let run = |workers| {
        let config = CorpusConfig {
            worker_count: Some(workers),
            decode: DecodeConfig::unbounded(),
            ..Default::default()
        };
        scan_corpus(paths.clone(), &config)
            .unwrap()
            .summaries()
            .map(|(p, s)| (p.clone(), s.trace_hash, s.emitted))
            .collect::<Vec<_>>()
    };
    let serial = run(1);
    assert_eq!(serial.len(), 12);
    assert_eq!(run(4), serial);
    assert_eq!(run(64), serial);

    let expected = decision_hash(random_decisions(0, 200));
    assert_eq!(serial[0].1, expected);
}

#[test]
fn duplicates_scanned_once() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.lf2", &ContainerBuilder::new(1, 1).direct(&[7]).build());
    let b = write(dir.path(), "b.lf2", &ContainerBuilder::new(1, 1).direct(&[8]).build());
    let report = scan_corpus(vec![b.clone(), a.clone(), b.clone()], &CorpusConfig::default()).unwrap();
    let order: Vec<_> = report.iter().map(|(p, _)| p.clone()).collect();
    assert_eq!(order, [b, a]);
}

#[test]
fn report_entries_can_be_taken_by_value() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.lf2", &ContainerBuilder::new(2, 1).direct(&[3, 4]).build());
    let b = write(dir.path(), "b.lf2", b"not a container");
    let entries = scan_corpus(vec![a.clone(), b.clone()], &CorpusConfig::default())
        .unwrap()
        .into_entries();
    let keys: Vec<_> = entries.keys().cloned().collect();
    assert_eq!(keys, [a.clone(), b.clone()]);
    assert_eq!(entries[&a].as_ref().unwrap().emitted, 2);
    assert!(matches!(entries[&b], Err(CorpusError::InvalidFormat { .. })));
}

#[test]
fn missing_files_do_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "ok.lf2", &ContainerBuilder::new(1, 1).direct(&[1]).build());
    let missing = dir.path().join("missing.lf2");
    let report = scan_corpus(vec![missing.clone(), good.clone()], &CorpusConfig::default()).unwrap();
    assert!(matches!(report.get(&missing), Some(Err(CorpusError::Io { .. }))));
    assert!(report.get(&good).unwrap().is_ok());
}

#[test]
fn empty_input_gives_empty_report() {
    let report = scan_corpus(Vec::new(), &CorpusConfig::default()).unwrap();
    assert!(report.is_empty());
}

#[test]
fn invalid_config_is_rejected_up_front() {
    let config = CorpusConfig {
        max_file_bytes: 0,
        ..Default::default()
    };
    assert!(scan_corpus(vec![PathBuf::from("x.lf2")], &config).is_err());
}
