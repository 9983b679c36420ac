use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::{Error, Result};
use crate::preview::PreviewWriter;
use crate::transform::swap_time_and_width;
use crate::workers::build_pool;
use crate::y4m;

/// Suffix appended to the input path when no output path is given.
const OUTPUT_SUFFIX: &str = ".1";

/// Parameters for the transform pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Worker threads per stage, or None to let rayon decide.
    pub threads: Option<usize>,
    /// Output path, or None for `<input>.1`.
    pub output: Option<PathBuf>,
    /// Directory to write luma previews of the output frames, or None to skip.
    pub preview_dir: Option<PathBuf>,
}

/// Pipeline milestones, reported once each in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Transform,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "File read complete"),
            Stage::Transform => write!(f, "File transform complete"),
            Stage::Write => write!(f, "Done!"),
        }
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub output: PathBuf,
    pub input_frames: usize,
    pub output_frames: usize,
    pub output_width: u32,
    pub output_height: u32,
}

/// `input` with the literal suffix `.1` appended.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}

/// Read `input`, swap its time and width axes, and write the result.
///
/// `on_stage` is called after each of the read, transform and write stages.
pub fn run_pipeline(
    input: &Path,
    config: &PipelineConfig,
    mut on_stage: impl FnMut(Stage),
) -> Result<PipelineSummary> {
    let output = config
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    info!(?input, ?output, threads = ?config.threads, "pipeline starting");

    let pool = build_pool(config.threads)?;

    let (header, clip) = y4m::read_file(input, &pool)?;
    if clip.is_empty() {
        error!(?input, "input has no frames");
        return Err(Error::EmptyInput);
    }
    info!(
        frames = clip.frames(),
        width = header.width,
        height = header.height,
        input_framerate = %header.framerate,
        "input decoded"
    );
    on_stage(Stage::Read);

    let swapped = swap_time_and_width(&clip, &pool)?;
    on_stage(Stage::Transform);

    if let Some(dir) = &config.preview_dir {
        PreviewWriter::create(dir)?.save_clip(&swapped)?;
    }

    y4m::write_file(&swapped, &output, &pool)?;
    on_stage(Stage::Write);

    let summary = PipelineSummary {
        output,
        input_frames: clip.frames(),
        output_frames: swapped.frames(),
        output_width: swapped.width(),
        output_height: swapped.height(),
    };
    info!(?summary, "pipeline complete");
    Ok(summary)
}
