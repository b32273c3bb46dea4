//! Example: canopy openness for a directory of binary sky masks.
//!
//! Every file with the chosen extension is decoded as 8-bit grayscale. The
//! masks must already be binarized: any non-zero pixel is sky, zero is
//! canopy. File names of the form `Plot.Subplot.Date.Exposure[.Focus].ext`
//! are split into metadata fields.
//!
//! Results are written as JSON; set `RUST_LOG=debug` for per-image logs.
//!
//! Run from the workspace root:
//!   cargo run -p canopy-openness --example openness_batch -- --help
//!   cargo run -p canopy-openness --example openness_batch -- --input data/masks

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use canopy_openness::{
    BatchConfig, BatchItem, BatchRecord, BorderMode, CircleConfig, ImageView, Normalization,
    OpennessConfig, run_batch,
};
use clap::{Parser, ValueEnum};
use image::ImageReader;
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Estimate canopy openness for a directory of binary fisheye masks")]
struct Args {
    /// Directory containing the masks
    #[arg(long)]
    input: PathBuf,

    /// File extension to pick up (case-insensitive)
    #[arg(long, default_value = "png")]
    ext: String,

    /// Pixels trimmed from the default radius (half the image height)
    #[arg(long, default_value_t = 0.0)]
    margin: f64,

    /// Manual center x; 0 keeps the computed value
    #[arg(long)]
    cx: Option<f64>,

    /// Manual center y; 0 keeps the computed value
    #[arg(long)]
    cy: Option<f64>,

    /// Manual radius; 0 keeps the computed value
    #[arg(long)]
    radius: Option<f64>,

    /// Policy for ring samples that leave the image
    #[arg(long, value_enum, default_value_t = BorderArg::Clamp)]
    border: BorderArg,

    /// Leave the zenith ring out of the normalizing area
    #[arg(long)]
    exclude_zenith: bool,

    /// Output JSON path (default: <input>/openness.json)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BorderArg {
    Clamp,
    Skip,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CircleDto {
    cx: f64,
    cy: f64,
    r: f64,
}

#[derive(Serialize)]
struct RecordDto {
    file: String,
    plot: Option<String>,
    subplot: Option<String>,
    date: Option<String>,
    exposure: Option<String>,
    focus: Option<String>,
    circle: Option<CircleDto>,
    gap_fractions: Option<Vec<f64>>,
    openness: Option<f64>,
    error: Option<String>,
}

impl From<&BatchRecord> for RecordDto {
    fn from(rec: &BatchRecord) -> Self {
        let meta = rec.metadata.as_ref();
        let ok = rec.outcome.as_ref().ok();
        Self {
            file: rec.name.clone(),
            plot: meta.map(|m| m.plot.clone()),
            subplot: meta.map(|m| m.subplot.clone()),
            date: meta.map(|m| m.date.clone()),
            exposure: meta.map(|m| m.exposure.clone()),
            focus: meta.and_then(|m| m.focus.clone()),
            circle: ok.map(|r| CircleDto {
                cx: r.circle.center_x,
                cy: r.circle.center_y,
                r: r.circle.radius,
            }),
            gap_fractions: ok.map(|r| r.profile.as_slice().to_vec()),
            openness: ok.map(|r| r.openness),
            error: rec.outcome.as_ref().err().map(|e| e.to_string()),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

struct LoadedMask {
    name: String,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RecordDto {
    /// Record for a file that never reached the batch driver.
    fn unreadable(file: String, error: String) -> Self {
        Self {
            file,
            plot: None,
            subplot: None,
            date: None,
            exposure: None,
            focus: None,
            circle: None,
            gap_fractions: None,
            openness: None,
            error: Some(error),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn list_masks(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn load_mask(path: &Path) -> Result<LoadedMask> {
    let gray = ImageReader::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .into_luma8();

    Ok(LoadedMask {
        name: file_name(path),
        width: gray.width() as usize,
        height: gray.height() as usize,
        pixels: gray.into_raw(),
    })
}

/// Decodes every path; unreadable files become failed records instead of
/// aborting the run.
fn load_masks(paths: &[PathBuf]) -> (Vec<LoadedMask>, Vec<RecordDto>) {
    let mut masks = Vec::with_capacity(paths.len());
    let mut failed = Vec::new();
    for path in paths {
        match load_mask(path) {
            Ok(mask) => masks.push(mask),
            Err(e) => {
                tracing::warn!(file = %path.display(), "skipping mask: {e:#}");
                failed.push(RecordDto::unreadable(file_name(path), format!("{e:#}")));
            }
        }
    }
    (masks, failed)
}

/// Wraps decoded masks as batch items; masks whose buffer does not match
/// their size are reported alongside the decode failures.
fn batch_items<'a>(masks: &'a [LoadedMask], failed: &mut Vec<RecordDto>) -> Vec<BatchItem<'a>> {
    let mut items = Vec::with_capacity(masks.len());
    for m in masks {
        match ImageView::from_slice(m.width, m.height, m.width, &m.pixels) {
            Ok(image) => items.push(BatchItem {
                name: &m.name,
                image,
            }),
            Err(e) => {
                tracing::warn!(file = %m.name, "skipping mask: {e}");
                failed.push(RecordDto::unreadable(m.name.clone(), e.to_string()));
            }
        }
    }
    items
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| args.input.join("openness.json"));

    let paths = list_masks(&args.input, &args.ext)?;
    if paths.is_empty() {
        bail!("no .{} files in {}", args.ext, args.input.display());
    }

    let (masks, mut unreadable) = load_masks(&paths);
    let items = batch_items(&masks, &mut unreadable);
    println!(
        "loaded {} of {} masks from {}",
        items.len(),
        paths.len(),
        args.input.display()
    );

    let cfg = BatchConfig {
        openness: OpennessConfig {
            circle: CircleConfig {
                margin_px: args.margin,
                center_x: args.cx,
                center_y: args.cy,
                radius: args.radius,
            },
            border: match args.border {
                BorderArg::Clamp => BorderMode::Clamp,
                BorderArg::Skip => BorderMode::Skip,
            },
            normalization: if args.exclude_zenith {
                Normalization::ExcludeZenith
            } else {
                Normalization::FullHemisphere
            },
        },
        parse_metadata: true,
    };

    let t0 = Instant::now();
    let report = run_batch(&items, &cfg);
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    for rec in &report.records {
        match &rec.outcome {
            Ok(r) => println!("  {}: openness {:.4}", rec.name, r.openness),
            Err(e) => println!("  {}: failed ({e})", rec.name),
        }
    }
    for dto in &unreadable {
        println!("  {}: unreadable", dto.file);
    }
    println!(
        "{} ok, {} failed, {} unreadable in {elapsed_ms:.2} ms",
        report.succeeded(),
        report.failed(),
        unreadable.len()
    );
    if let Some(mean) = report.mean_openness() {
        println!("mean openness: {mean:.4}");
    }

    let mut dtos: Vec<RecordDto> = report.records.iter().map(RecordDto::from).collect();
    dtos.append(&mut unreadable);
    dtos.sort_by(|a, b| a.file.cmp(&b.file));
    let out_file = std::fs::File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    serde_json::to_writer_pretty(out_file, &dtos)
        .with_context(|| format!("writing JSON to {}", out_path.display()))?;

    println!("results written to {}", out_path.display());
    Ok(())
}
