//! LF2 trace dump: replay a container and print its decisions.
//!
//! Demonstrates:
//!   1. Parsing a container header and palette
//!   2. Replaying the stream into a full decision trace
//!   3. Printing each decision with the dictionary bytes that preceded it
//!   4. Replaying a second time and comparing the two traces
//!   5. Scanning a whole directory with the worker pool
//!
//! Run with:
//!   cargo run --example trace_dump                 # built-in sample
//!   cargo run --example trace_dump -- c01.lf2 40   # first 40 decisions
//!   cargo run --example trace_dump -- game/cg      # corpus summary
//!
//! Set `RUST_LOG=debug` to see the library's tracing output.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lf2::prelude::*;
use lf2_test_utils::ContainerBuilder;
use tracing_subscriber::EnvFilter;

// ---- Defaults ---------------------------------------------------------

const DEFAULT_SHOWN: usize = 24;
const TAIL_BYTES: usize = 8;

// ---- Sample container -------------------------------------------------

/// A 16x4 gradient with runs, built from explicit decisions.
fn sample_container() -> Vec<u8> {
    let palette = (0..16u8)
        .map(|i| Rgb {
            r: i * 16,
            g: 255 - i * 16,
            b: 128,
        })
        .collect();
    let mut builder = ContainerBuilder::new(16, 4).palette(palette).transparent_index(0);
    for row in 0..4u8 {
        let start = (0x0fee + row as usize * 16) & 0x0fff;
        builder = builder.direct(&[row, row + 1]).matched(start, 14);
    }
    builder.build()
}

// ---- Output -----------------------------------------------------------

fn describe(record: &TraceRecord) -> String {
    let tail: Vec<String> = record
        .before
        .tail(TAIL_BYTES)
        .map(|b| format!("{b:02x}"))
        .collect();
    let what = match record.decision {
        Decision::Direct { value } => format!("Direct  value=0x{value:02x}"),
        Decision::Match { position, length } => {
            format!("Match   pos=0x{position:03x} len={length:2}")
        }
    };
    format!(
        "@{:>6}  {what:<28} cursor=0x{:03x} tail=[{}]",
        record.stream_offset,
        record.before.cursor(),
        tail.join(" ")
    )
}

fn dump_file(name: &str, bytes: &[u8], shown: usize) -> Result<()> {
    let (container, replay) = decode_file(bytes, &DecodeConfig::default(), DecisionTrace::new())
        .with_context(|| format!("{name}: not an LF2 container"))?;

    println!("=== {name} ===");
    println!(
        "  {}x{} at ({}, {}), {} palette entries, transparent index {}",
        container.width,
        container.height,
        container.x_offset,
        container.y_offset,
        container.palette.len(),
        container.transparent_index,
    );
    println!(
        "  stream: {} bytes at offset 0x{:x}",
        replay.stream_len,
        container.compressed_data_offset()
    );
    println!();

    for record in replay.trace.iter().take(shown) {
        println!("  {}", describe(record));
    }
    if replay.trace.len() > shown {
        println!("  ... {} more", replay.trace.len() - shown);
    }
    println!();

    let direct = replay.trace.decisions().filter(|d| d.is_direct()).count();
    println!(
        "  {} decisions ({} direct, {} match), {} bytes emitted, {} trailing stream bytes",
        replay.trace.len(),
        direct,
        replay.trace.len() - direct,
        replay.output.len(),
        replay.trailing_bytes(),
    );
    match replay.error() {
        Some(err) => println!("  TRUNCATED: {err}"),
        None => println!("  complete"),
    }

    let image = IndexedImage::from_output(&container, &replay.output);
    let opaque = image.pixels.iter().filter(|&&i| !image.is_transparent(i)).count();
    println!("  image: {} of {} pixels opaque", opaque, image.pixels.len());

    // Determinism: a second pass must make the same decisions.
    let (_, again) = decode_file(bytes, &DecodeConfig::default(), DecisionLog::new())?;
    let report = compare_decisions(replay.trace.decisions(), again.trace.decisions());
    if !report.is_identical() {
        bail!("{name}: second replay diverged at {:?}", report.first);
    }
    println!(
        "  replayed twice, identical (hash 0x{:016x})",
        decision_hash(again.trace.decisions())
    );
    Ok(())
}

fn scan_dir(dir: &Path) -> Result<()> {
    let paths = discover(dir).with_context(|| format!("reading {}", dir.display()))?;
    if paths.is_empty() {
        bail!("no .lf2 files under {}", dir.display());
    }
    let report = scan_corpus(paths, &CorpusConfig::default())?;

    for (path, outcome) in &report {
        let name = path.strip_prefix(dir).unwrap_or(path.as_path()).display();
        match outcome {
            Ok(s) => println!(
                "{name:<40} {:>5}x{:<5} {:>8} decisions  {:016x}{}",
                s.container.width,
                s.container.height,
                s.decisions(),
                s.trace_hash,
                if s.is_complete() { "" } else { "  TRUNCATED" },
            ),
            Err(e) => println!("{name:<40} error: {e}"),
        }
    }
    println!();
    println!(
        "{} files: {} complete, {} truncated, {} failed",
        report.len(),
        report.complete_count(),
        report.truncated_count(),
        report.failed_count(),
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let target = args.next();
    let shown = match args.next() {
        Some(n) => n.parse().context("decision count must be a number")?,
        None => DEFAULT_SHOWN,
    };

    match target.map(PathBuf::from) {
        None => dump_file("sample", &sample_container(), shown),
        Some(path) if path.is_dir() => scan_dir(&path),
        Some(path) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            dump_file(&path.display().to_string(), &bytes, shown)
        }
    }
}
