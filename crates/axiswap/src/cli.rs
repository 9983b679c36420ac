use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "axiswap",
    version,
    about = "Swap the time and horizontal axes of a 4:2:0 Y4M clip"
)]
pub struct Cli {
    /// Path to the input .y4m file. Output goes to <INPUT>.1 unless --output is set.
    pub input: PathBuf,

    /// Write the result here instead of <INPUT>.1.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads for decode, transform and encode (default: one per core).
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Directory to save grayscale luma previews of the output frames.
    #[arg(long)]
    pub preview_dir: Option<PathBuf>,
}
