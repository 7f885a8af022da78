use std::path::PathBuf;
use std::process;
use structopt::StructOpt;
use memeify::presets::{Overrides, Quality};
use memeify::{Error, Job};

#[derive(Debug, StructOpt)]
#[structopt(name = "memeify", about = "2000s meme video quality ruiner")]
struct Opt {
    /// Path to input video file (positional)
    #[structopt(name = "INPUT", parse(from_os_str))]
    input_pos: Option<PathBuf>,
    /// Path to input video file (flag, takes precedence over the positional)
    #[structopt(short = "i", long = "input", visible_alias = "in", parse(from_os_str))]
    input: Option<PathBuf>,
    /// Path to output video file (default: <input>_out.mp4)
    #[structopt(short = "o", long = "output", visible_alias = "out", parse(from_os_str))]
    output: Option<PathBuf>,
    /// Quality level preset
    #[structopt(short = "q", long = "quality", default_value = "medium", possible_values = Quality::NAMES)]
    quality: Quality,
    /// Custom resolution (e.g. 320x240)
    #[structopt(long = "res")]
    res: Option<String>,
    /// Custom framerate (e.g. 12)
    #[structopt(long = "fps")]
    fps: Option<String>,
    /// Custom video bitrate (e.g. 100k)
    #[structopt(long = "vbit")]
    vbit: Option<String>,
    /// Custom audio bitrate (e.g. 32k)
    #[structopt(long = "abit")]
    abit: Option<String>,
}

/// Assembles the job, or `None` when no non-empty input was given.
fn job(opt: Opt) -> Option<Job> {
    let input = opt.input
        .or(opt.input_pos)
        .filter(|input| !input.as_os_str().is_empty())?;

    Some(Job {
        output: opt.output.unwrap_or_else(|| memeify::default_output(&input)),
        input,
        quality: opt.quality,
        overrides: Overrides {
            resolution: opt.res,
            fps: opt.fps,
            video_bitrate: opt.vbit,
            audio_bitrate: opt.abit,
        },
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let job = match job(Opt::from_args()) {
        Some(job) => job,
        None => {
            Opt::clap().print_help().ok();
            println!();
            process::exit(1);
        }
    };

    match memeify::convert(&job) {
        Ok(_) => println!("\nSuccess! Your video is now properly ruined."),
        Err(e @ Error::ToolNotFound { .. }) => {
            eprintln!("\n{}\n", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("\nError: {}", e);
            process::exit(1);
        }
    }
}
