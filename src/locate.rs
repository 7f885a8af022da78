use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use log::{debug, info, warn};

const FFMPEG: &str = "ffmpeg";

#[cfg(target_os = "windows")]
const KNOWN_PATHS: &[&str] = &[
    r"C:\Program Files\DownloadHelper CoApp\ffmpeg.exe",
    r"C:\Program Files\ffmpeg\bin\ffmpeg.exe",
    r"C:\ffmpeg\bin\ffmpeg.exe",
    r"C:\Program Data\chocolatey\bin\ffmpeg.exe",
];
#[cfg(not(target_os = "windows"))]
const KNOWN_PATHS: &[&str] = &[
    "/usr/local/bin/ffmpeg",
    "/opt/homebrew/bin/ffmpeg",
    "/usr/bin/ffmpeg",
    "/snap/bin/ffmpeg",
];

/// How to invoke the external tool: a bare command name resolved through
/// `PATH`, or a path to the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocation(PathBuf);

impl ToolLocation {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        ToolLocation(location.into())
    }

    /// The unquoted program to hand to the child process.
    pub fn program(&self) -> &OsStr {
        self.0.as_os_str()
    }
}

impl fmt::Display for ToolLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let location = self.0.to_string_lossy();

        if location.contains(' ') {
            write!(f, "\"{}\"", location)
        } else {
            f.write_str(&location)
        }
    }
}

pub trait ToolProbe {
    fn probe(&self) -> Option<ToolLocation>;
}

/// Finds the tool by running it as a bare command.
///
/// Any outcome of the run counts as found, whatever the exit status.
/// Only a missing executable counts as not found.
pub struct SearchPath {
    command: String,
}

impl SearchPath {
    pub fn new(command: impl Into<String>) -> Self {
        SearchPath { command: command.into() }
    }
}

impl ToolProbe for SearchPath {
    fn probe(&self) -> Option<ToolLocation> {
        debug!("Probing '{} -version'", self.command);

        let result = Command::new(&self.command)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(_) => Some(ToolLocation::new(&self.command)),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Probing '{}' failed ({}), assuming it is installed", self.command, e);
                Some(ToolLocation::new(&self.command))
            }
        }
    }
}

/// Finds the tool at a fixed location on disk.
pub struct KnownPath {
    path: PathBuf,
}

impl KnownPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        KnownPath { path: path.into() }
    }
}

impl ToolProbe for KnownPath {
    fn probe(&self) -> Option<ToolLocation> {
        debug!("Checking {}", self.path.display());

        if self.path.exists() {
            Some(ToolLocation::new(&self.path))
        } else {
            None
        }
    }
}

/// An ordered list of probes. The first probe that finds the tool wins.
pub struct Locator {
    probes: Vec<Box<dyn ToolProbe>>,
}

impl Locator {
    pub fn new(probes: Vec<Box<dyn ToolProbe>>) -> Self {
        Locator { probes }
    }

    /// `ffmpeg` on `PATH`, then the usual install locations for this platform.
    pub fn system() -> Self {
        let mut probes: Vec<Box<dyn ToolProbe>> = vec![Box::new(SearchPath::new(FFMPEG))];
        probes.extend(KNOWN_PATHS.iter().map(|path| Box::new(KnownPath::new(*path)) as Box<dyn ToolProbe>));

        Locator::new(probes)
    }

    pub fn locate(&self) -> Option<ToolLocation> {
        let location = self.probes.iter().find_map(|probe| probe.probe());

        match &location {
            Some(location) => info!("Found ffmpeg at {}", location),
            None => info!("ffmpeg not found after {} probes", self.probes.len()),
        }

        location
    }
}
