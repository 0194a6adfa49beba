//! Cross-checking and timing of the filters against `imageproc`.
//!
//! Every filter variant is run on an 8-bit image (or a copy of it scaled by
//! 1.1 into a wider sample type), compared against the `imageproc` median or
//! box filter, and timed over repeated calls. Only the interior region, at
//! least `r` pixels away from every edge, is compared: `imageproc` pads by
//! replicating the edge while this crate reflects, and both agree wherever
//! the window stays inside the image.

use crate::boxmean::BoxMeanFilter;
use crate::config::FilterConfig;
use crate::enums::{FilterMethod, SampleType};
use crate::filter::WindowFilter;
use crate::grid::SampleGrid;
use crate::median8::TwoLevelMedianFilter;
use crate::medianhist::HistogramMedianFilter;
use crate::mediansort::LocalSortMedianFilter;
use crate::sample::Sample;

use anyhow::{anyhow, Result};
use chrono::Local;
use image::GrayImage;
use imageproc::filter::{box_filter, median_filter};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use string_builder::Builder;
use tracing::{info, warn};

/// Scale applied to 8-bit samples when synthesizing non 8-bit grids.
pub const SYNTHETIC_SCALE: f64 = 1.1;

// imageproc truncates after each of its two box passes
const MEAN_TOLERANCE: f64 = 2.0;
const MEDIAN_TOLERANCE: f64 = 0.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "CORRECT"),
            Verdict::Wrong => write!(f, "WRONG"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantTiming {
    pub method: FilterMethod,
    pub seconds: f64,
}

/// One line of the benchmark log.
#[derive(Debug, Clone, Serialize)]
pub struct BenchRecord {
    pub timestamp: String,
    pub family: String,
    pub sample_type: SampleType,
    pub window: usize,
    pub verdict: Verdict,
    pub runs: usize,
    pub max_diff: f64,
    pub timings: Vec<VariantTiming>,
    pub reference_seconds: f64,
}

impl BenchRecord {
    pub fn csv_header() -> &'static str {
        "timestamp,family,type,window,verdict,runs,max_diff,timings,reference"
    }

    pub fn to_csv_line(&self) -> String {
        let mut b = Builder::default();
        b.append(format!("{},", self.timestamp));
        b.append(format!("{},", self.family));
        b.append(format!("{},", self.sample_type));
        b.append(format!("{} * {},", self.window, self.window));
        b.append(format!("{},", self.verdict));
        b.append(format!("{},", self.runs));
        b.append(format!("{},", self.max_diff));

        let timings: Vec<String> = self
            .timings
            .iter()
            .map(|t| format!("{}={:.6}", t.method, t.seconds))
            .collect();
        b.append(format!("{},", timings.join(" ")));
        b.append(format!("{:.6}", self.reference_seconds));

        b.string().unwrap_or_default()
    }
}

/// What to run. Radii larger than the image allows are skipped.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub radii: Vec<usize>,
    pub runs: usize,
    pub gate: f64,
    pub sample_types: Vec<SampleType>,
    pub methods: Vec<FilterMethod>,
    pub save_dir: Option<PathBuf>,
}

impl Default for BenchOptions {
    fn default() -> Self {
        BenchOptions {
            radii: vec![1, 2, 3, 5, 7],
            runs: 3,
            gate: crate::config::DEFAULT_GATE,
            sample_types: vec![SampleType::U8],
            methods: FilterMethod::all().to_vec(),
            save_dir: None,
        }
    }
}

pub fn reference_median(image: &GrayImage, radius: usize) -> GrayImage {
    median_filter(image, radius as u32, radius as u32)
}

pub fn reference_mean(image: &GrayImage, radius: usize) -> GrayImage {
    box_filter(image, radius as u32, radius as u32)
}

/// Reference for gates other than the median, which `imageproc` does not
/// offer: the sorted window filter run on the 8-bit grid.
pub fn reference_rank(base: &SampleGrid<u8>, config: FilterConfig) -> Result<GrayImage> {
    let out = LocalSortMedianFilter::with_config(config).apply(base)?;
    Ok(out.to_image_luma8())
}

/// Largest absolute difference over the interior region between `ours`,
/// divided back by `scale` and rounded, and the 8-bit reference.
pub fn interior_max_diff<T: Sample>(
    ours: &SampleGrid<T>,
    reference: &GrayImage,
    radius: usize,
    scale: f64,
) -> f64 {
    let (width, height) = ours.dimensions();
    let mut max_diff = 0.0_f64;
    for y in radius..height.saturating_sub(radius) {
        for x in radius..width.saturating_sub(radius) {
            let v = (ours[(x, y)].to_f64() / scale).round();
            let r = reference.get_pixel(x as u32, y as u32)[0] as f64;
            max_diff = max_diff.max((v - r).abs());
        }
    }
    max_diff
}

/// Builds a grid of `T` from an 8-bit grid, scaled by `scale`.
pub fn synthesize<T: Sample>(base: &SampleGrid<u8>, scale: f64) -> Result<SampleGrid<T>> {
    Ok(base.map(|v| T::from_mean(v as f64 * scale))?)
}

fn time_runs<F>(runs: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..runs {
        f()?;
    }
    Ok(start.elapsed().as_secs_f64())
}

fn median_variants<T: Sample>(
    config: FilterConfig,
    methods: &[FilterMethod],
) -> Vec<(FilterMethod, Box<dyn WindowFilter<T>>)> {
    let mut variants: Vec<(FilterMethod, Box<dyn WindowFilter<T>>)> = vec![];
    if methods.contains(&FilterMethod::Histogram) {
        variants.push((
            FilterMethod::Histogram,
            Box::new(HistogramMedianFilter::with_config(config)) as Box<dyn WindowFilter<T>>,
        ));
    }
    if methods.contains(&FilterMethod::LocalSort) {
        variants.push((
            FilterMethod::LocalSort,
            Box::new(LocalSortMedianFilter::with_config(config)) as Box<dyn WindowFilter<T>>,
        ));
    }
    variants
}

fn median_variants_u8(
    config: FilterConfig,
    methods: &[FilterMethod],
) -> Vec<(FilterMethod, Box<dyn WindowFilter<u8>>)> {
    let mut variants: Vec<(FilterMethod, Box<dyn WindowFilter<u8>>)> = vec![];
    if methods.contains(&FilterMethod::TwoLevel) {
        variants.push((
            FilterMethod::TwoLevel,
            Box::new(TwoLevelMedianFilter::with_config(config)) as Box<dyn WindowFilter<u8>>,
        ));
    }
    variants.extend(median_variants::<u8>(config, methods));
    variants
}

struct CheckContext<'a> {
    base: &'a SampleGrid<u8>,
    image: &'a GrayImage,
    radius: usize,
    options: &'a BenchOptions,
}

// Checks every variant against the reference, then times them all if they agree
fn check_and_time<T: Sample>(
    ctx: &CheckContext,
    family: &str,
    sample_type: SampleType,
    variants: Vec<(FilterMethod, Box<dyn WindowFilter<T>>)>,
    reference: &dyn Fn() -> Result<GrayImage>,
    tolerance: f64,
) -> Result<BenchRecord> {
    let scale = if sample_type == SampleType::U8 {
        1.0
    } else {
        SYNTHETIC_SCALE
    };
    let grid: SampleGrid<T> = synthesize(ctx.base, scale)?;
    let expected = reference()?;

    let mut max_diff = 0.0_f64;
    let mut outputs = vec![];
    for (method, filter) in variants.iter() {
        let out = filter.apply(&grid)?;
        let diff = interior_max_diff(&out, &expected, ctx.radius, scale);
        if diff > tolerance {
            warn!(
                "{} {} filter on {} differs from reference by {}",
                family, method, sample_type, diff
            );
        }
        max_diff = max_diff.max(diff);
        outputs.push((*method, out));
    }

    let window = ctx.radius * 2 + 1;
    let verdict = if max_diff <= tolerance {
        Verdict::Correct
    } else {
        Verdict::Wrong
    };

    let mut timings = vec![];
    let mut reference_seconds = 0.0;
    if verdict == Verdict::Correct {
        if let Some(dir) = &ctx.options.save_dir {
            for (method, out) in outputs.iter() {
                let bytes: SampleGrid<u8> = out.map(|v| u8::from_mean(v.to_f64() / scale))?;
                let path = dir.join(format!("{}_{}_{}.png", window, method, sample_type));
                bytes.save(&path)?;
            }
        }

        for (method, filter) in variants.iter() {
            let mut dest = SampleGrid::new_with_fill(grid.width(), grid.height(), grid[(0, 0)])?;
            let seconds = time_runs(ctx.options.runs, || Ok(filter.filter(&grid, &mut dest)?))?;
            timings.push(VariantTiming {
                method: *method,
                seconds,
            });
        }
        reference_seconds = time_runs(ctx.options.runs, || {
            reference()?;
            Ok(())
        })?;
    }

    Ok(BenchRecord {
        timestamp: Local::now().to_rfc3339(),
        family: family.to_owned(),
        sample_type,
        window,
        verdict,
        runs: ctx.options.runs,
        max_diff,
        timings,
        reference_seconds,
    })
}

fn run_for_type<T: Sample>(
    ctx: &CheckContext,
    sample_type: SampleType,
    config: FilterConfig,
    median: Vec<(FilterMethod, Box<dyn WindowFilter<T>>)>,
) -> Result<Vec<BenchRecord>> {
    let mut records = vec![];
    let radius = ctx.radius;

    if !median.is_empty() {
        let record = if config.gate() == crate::config::DEFAULT_GATE {
            check_and_time(
                ctx,
                "median filter",
                sample_type,
                median,
                &|| Ok(reference_median(ctx.image, radius)),
                MEDIAN_TOLERANCE,
            )?
        } else {
            check_and_time(
                ctx,
                "rank filter",
                sample_type,
                median,
                &|| reference_rank(ctx.base, config),
                MEDIAN_TOLERANCE,
            )?
        };
        records.push(record);
    }

    if ctx.options.methods.contains(&FilterMethod::Mean) {
        let mean: Vec<(FilterMethod, Box<dyn WindowFilter<T>>)> = vec![(
            FilterMethod::Mean,
            Box::new(BoxMeanFilter::with_config(config)) as Box<dyn WindowFilter<T>>,
        )];
        records.push(check_and_time(
            ctx,
            "mean filter",
            sample_type,
            mean,
            &|| Ok(reference_mean(ctx.image, radius)),
            MEAN_TOLERANCE,
        )?);
    }
    Ok(records)
}

/// Runs every configured radius and sample type over `image`, returning one
/// record per filter family, sample type and radius.
pub fn run(image: &GrayImage, options: &BenchOptions) -> Result<Vec<BenchRecord>> {
    if options.runs == 0 {
        return Err(anyhow!("At least one timed run is required"));
    }
    let base = SampleGrid::from_image_luma8(image)?;
    let limit = base.width().min(base.height());
    let mut records = vec![];

    for radius in options.radii.iter().copied() {
        if radius == 0 || radius >= limit {
            warn!("Skipping radius {}: image is {}x{}", radius, base.width(), base.height());
            continue;
        }
        let config = FilterConfig::with_gate(radius, options.gate)?;
        let ctx = CheckContext {
            base: &base,
            image,
            radius,
            options,
        };

        for sample_type in options.sample_types.iter().copied() {
            let batch = match sample_type {
                SampleType::U8 => run_for_type::<u8>(
                    &ctx,
                    sample_type,
                    config,
                    median_variants_u8(config, &options.methods),
                )?,
                SampleType::U16 => run_for_type::<u16>(
                    &ctx,
                    sample_type,
                    config,
                    median_variants(config, &options.methods),
                )?,
                SampleType::F32 => run_for_type::<f32>(
                    &ctx,
                    sample_type,
                    config,
                    median_variants(config, &options.methods),
                )?,
                SampleType::F64 => run_for_type::<f64>(
                    &ctx,
                    sample_type,
                    config,
                    median_variants(config, &options.methods),
                )?,
            };
            for record in batch.iter() {
                info!("{}", record.to_csv_line());
            }
            records.extend(batch);
        }
    }
    Ok(records)
}
