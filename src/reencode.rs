use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};
use log::debug;

use crate::filter::{self, FilterConfig};
use crate::locate::ToolLocation;
use crate::presets::EffectiveConfig;

pub const VIDEO_CODEC: &str = "libx264";
pub const AUDIO_CODEC: &str = "libmp3lame";
pub const BUFFER_SIZE: &str = "500k";
pub const SAMPLE_RATE: &str = "22050";
pub const CHANNELS: &str = "1";

pub struct Config<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub settings: &'a EffectiveConfig,
}

/// Arguments for a single ffmpeg run, in the order ffmpeg receives them.
pub fn arguments(config: &Config) -> Vec<OsString> {
    let Config { input, output, settings } = config;
    let mut args: Vec<OsString> = vec![];

    args.push("-i".into());
    args.push(input.as_os_str().into());

    args.push("-vf".into());
    args.push(filter::generate(FilterConfig {
        fps: &settings.fps,
        resolution: &settings.resolution,
    }).into());

    args.push("-vcodec".into());
    args.push(VIDEO_CODEC.into());
    args.push("-b:v".into());
    args.push(settings.video_bitrate.as_str().into());
    args.push("-maxrate".into());
    args.push(settings.video_bitrate.as_str().into());
    args.push("-bufsize".into());
    args.push(BUFFER_SIZE.into());

    args.push("-acodec".into());
    args.push(AUDIO_CODEC.into());
    args.push("-b:a".into());
    args.push(settings.audio_bitrate.as_str().into());
    args.push("-ar".into());
    args.push(SAMPLE_RATE.into());
    args.push("-ac".into());
    args.push(CHANNELS.into());

    args.push("-y".into());
    args.push(output.as_os_str().into());

    args
}

/// Renders an invocation for display. Arguments containing spaces are quoted.
pub fn command_line(tool: &ToolLocation, args: &[OsString]) -> String {
    let mut line = tool.to_string();

    for arg in args {
        let arg = arg.to_string_lossy();
        line.push(' ');

        if arg.contains(' ') {
            line.push('"');
            line.push_str(&arg);
            line.push('"');
        } else {
            line.push_str(&arg);
        }
    }

    line
}

/// Exit status of the external tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    code: Option<i32>,
}

impl Status {
    pub fn from_code(code: i32) -> Self {
        Status { code: Some(code) }
    }

    /// A run that ended without an exit code, e.g. killed by a signal.
    pub fn terminated() -> Self {
        Status { code: None }
    }

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for Status {
    fn from(status: ExitStatus) -> Self {
        Status { code: status.code() }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated without an exit code"),
        }
    }
}

/// Runs the external tool to completion.
pub trait Runner {
    fn run(&mut self, tool: &ToolLocation, args: &[OsString]) -> io::Result<Status>;
}

/// Spawns the tool as a child process with inherited stdio, so ffmpeg's
/// own progress and diagnostics reach the terminal.
#[derive(Debug)]
pub struct System;

impl Runner for System {
    fn run(&mut self, tool: &ToolLocation, args: &[OsString]) -> io::Result<Status> {
        debug!("Executing: {}", command_line(tool, args));

        let status = Command::new(tool.program())
            .args(args)
            .status()?;

        Ok(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{Overrides, Quality};

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn argument_order() {
        let settings = EffectiveConfig::new(Quality::Low, &Overrides::default());
        let args = arguments(&Config {
            input: Path::new("in put.mov"),
            output: Path::new("out.mp4"),
            settings: &settings,
        });

        assert_eq!(strings(&args), vec![
            "-i", "in put.mov",
            "-vf", "fps=8,scale=176x144:flags=neighbor",
            "-vcodec", "libx264",
            "-b:v", "30k",
            "-maxrate", "30k",
            "-bufsize", "500k",
            "-acodec", "libmp3lame",
            "-b:a", "8k",
            "-ar", "22050",
            "-ac", "1",
            "-y", "out.mp4",
        ]);
    }

    #[test]
    fn paths_stay_single_arguments() {
        let settings = EffectiveConfig::new(Quality::Medium, &Overrides::default());
        let args = arguments(&Config {
            input: Path::new("a; rm -rf ~.mov"),
            output: Path::new("$(whoami).mp4"),
            settings: &settings,
        });

        assert_eq!(args[1], OsString::from("a; rm -rf ~.mov"));
        assert_eq!(args.last(), Some(&OsString::from("$(whoami).mp4")));
    }

    #[test]
    fn rendered_command_line() {
        let tool = ToolLocation::new("/opt/my tools/ffmpeg");
        let args = vec![OsString::from("-i"), OsString::from("my clip.mov"), OsString::from("-y")];

        assert_eq!(command_line(&tool, &args), r#""/opt/my tools/ffmpeg" -i "my clip.mov" -y"#);
    }

    #[test]
    fn status_display() {
        assert!(Status::from_code(0).success());
        assert!(!Status::from_code(1).success());
        assert!(!Status::terminated().success());
        assert_eq!(Status::from_code(1).to_string(), "exit code 1");
    }
}
