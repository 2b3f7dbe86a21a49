use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    config::SealOptions,
    foundation::error::{SealError, SealResult},
    generator::SealGenerator,
    text::fonts::FontSet,
};

/// Output stem used when there are no names to render.
pub const DEFAULT_STEM: &str = "seal";

const NAME_SEPARATORS: [char; 5] = [',', '，', '、', '\n', '\r'];
const UNSAFE_FILE_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Split a list of company names. ASCII and full-width commas, the ideographic enumeration comma
/// and line breaks all separate names; surrounding whitespace and empty entries are dropped.
pub fn parse_names(text: &str) -> Vec<String> {
    text.split(NAME_SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// File stem for `name` with path separators, reserved and control characters replaced by `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_control() || UNSAFE_FILE_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();
    let stem = stem.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if stem.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        stem.to_string()
    }
}

pub fn output_path_for(out_dir: &Path, name: &str) -> PathBuf {
    out_dir.join(format!("{}.png", sanitize_file_stem(name)))
}

/// One render of the batch: the company override (none for the default render) and its target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchJob {
    pub company: Option<String>,
    pub output_path: PathBuf,
}

/// Jobs for `names`. No names yields exactly one default-configuration job. Names that sanitize
/// to the same stem get a numeric suffix so no output overwrites another.
pub fn plan_jobs(names: &[String], out_dir: &Path) -> Vec<BatchJob> {
    if names.is_empty() {
        return vec![BatchJob {
            company: None,
            output_path: output_path_for(out_dir, DEFAULT_STEM),
        }];
    }

    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let stem = sanitize_file_stem(name);
            let mut unique = stem.clone();
            let mut n = 2;
            while !seen.insert(unique.clone()) {
                unique = format!("{stem}-{n}");
                n += 1;
            }
            BatchJob {
                company: Some(name.clone()),
                output_path: out_dir.join(format!("{unique}.png")),
            }
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub out_dir: PathBuf,
    /// Render jobs on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Worker count for the parallel pool; `None` lets rayon decide.
    pub threads: Option<usize>,
}

/// Render every job of `names` with `base` options. Returns written paths in job order.
///
/// Any failed job fails the batch; in parallel mode the remaining jobs still run to completion.
#[tracing::instrument(skip(base, fonts, names), fields(names = names.len(), parallel = opts.parallel))]
pub fn run_batch(
    base: &SealOptions,
    fonts: Arc<FontSet>,
    names: &[String],
    opts: &BatchOptions,
) -> SealResult<Vec<PathBuf>> {
    let jobs = plan_jobs(names, &opts.out_dir);
    let run = |job: &BatchJob| -> SealResult<PathBuf> {
        let job_opts = SealOptions {
            company: job.company.clone().or_else(|| base.company.clone()),
            ..base.clone()
        };
        SealGenerator::with_fonts(&job_opts, Arc::clone(&fonts))?.generate(&job.output_path)
    };

    if !opts.parallel || jobs.len() < 2 {
        return jobs.iter().map(run).collect();
    }

    let pool = build_thread_pool(opts.threads)?;
    let results: Vec<SealResult<PathBuf>> = pool.install(|| jobs.par_iter().map(run).collect());
    results.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> SealResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(SealError::validation("batch threads must be >= 1 when set"));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SealError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
