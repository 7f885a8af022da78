#[macro_use] extern crate snafu;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use log::info;
use snafu::ResultExt;

pub mod filter;
pub mod locate;
pub mod presets;
pub mod reencode;

use locate::{Locator, ToolLocation};
use presets::{EffectiveConfig, Overrides, Quality};
use reencode::{Runner, Status};

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

#[cfg(target_os = "windows")]
const INSTALL_COMMAND: &str = "winget install ffmpeg";
#[cfg(target_os = "macos")]
const INSTALL_COMMAND: &str = "brew install ffmpeg";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const INSTALL_COMMAND: &str = "sudo apt install ffmpeg";

const RULE: &str = "============================================================";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Input file '{}' not found.", input.display()))]
    MissingInput {
        input: PathBuf,
    },
    #[snafu(display("{}", install_guidance(install)))]
    ToolNotFound {
        install: &'static str,
    },
    #[snafu(display("Could not run {}: {}", tool, source))]
    Spawn {
        tool: ToolLocation,
        source: io::Error,
    },
    #[snafu(display("ffmpeg exited unsuccessfully ({})", status))]
    ConversionFailed {
        status: Status,
    },
}

fn install_guidance(install: &str) -> String {
    format!(
        "{rule}\n\
         ERROR: FFMPEG NOT FOUND\n\
         {rule}\n\
         Reason: This program requires 'ffmpeg' to process video files, but it\n        \
         could not be found in the system PATH or common locations.\n\
         \n\
         Solution: Please install ffmpeg with your package manager, e.g.:\n\
         \n          \
         {install}\n\
         \n\
         Note: You may need to restart your terminal after installation.\n\
         {rule}",
        rule = RULE,
        install = install,
    )
}

/// One conversion request.
#[derive(Debug, Clone)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub quality: Quality,
    pub overrides: Overrides,
}

impl Job {
    /// A job writing to the default output path next to `input`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let output = default_output(&input);

        Job {
            input,
            output,
            quality: Quality::default(),
            overrides: Overrides::default(),
        }
    }
}

/// `clip.mov` becomes `clip_out.mp4`, in the same directory.
pub fn default_output(input: &Path) -> PathBuf {
    let mut name = input.file_stem().map(OsString::from).unwrap_or_default();
    name.push("_out.mp4");

    input.with_file_name(name)
}

pub struct Converter<R = reencode::System> {
    locator: Locator,
    runner: R,
}

impl Converter {
    /// Looks for ffmpeg on this host and runs it as a child process.
    pub fn system() -> Self {
        Converter::new(Locator::system(), reencode::System)
    }
}

impl<R: Runner> Converter<R> {
    pub fn new(locator: Locator, runner: R) -> Self {
        Converter { locator, runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Degrades `job.input` into `job.output`.
    ///
    /// Nothing is spawned when the input is missing or ffmpeg cannot be
    /// found. A failed run may leave a partial output file behind.
    pub fn convert(&mut self, job: &Job) -> Result<EffectiveConfig> {
        let Job { input, output, quality, overrides } = job;

        ensure!(input.exists(), MissingInput { input });

        let tool = match self.locator.locate() {
            Some(tool) => tool,
            None => return ToolNotFound { install: INSTALL_COMMAND }.fail(),
        };

        let settings = EffectiveConfig::new(*quality, overrides);
        info!("Effective settings for {} quality: {:?}", quality, settings);

        println!("Using ffmpeg at: {}", tool);
        println!("Converting '{}' to '{}' with {} quality...", input.display(), output.display(), quality);
        println!("Settings: {}", settings);

        let args = reencode::arguments(&reencode::Config {
            input,
            output,
            settings: &settings,
        });

        let status = self.runner.run(&tool, &args)
            .context(Spawn { tool: tool.clone() })?;

        ensure!(status.success(), ConversionFailed { status });

        Ok(settings)
    }
}

/// Converts with the host's ffmpeg.
pub fn convert(job: &Job) -> Result<EffectiveConfig> {
    Converter::system().convert(job)
}
