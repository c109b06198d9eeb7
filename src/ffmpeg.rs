//! FFmpeg console verbosity.
//!
//! FFmpeg writes its own warnings to stderr independently of the `log`
//! crate. Corrupt or truncated inputs can make it very chatty during a long
//! extraction, so the level is exposed here and on the command line.

use std::str::FromStr;

use ffmpeg_next::util::log::Level;

/// FFmpeg internal log level, from silent to most verbose.
///
/// Each level maps to one of FFmpeg's `AV_LOG_*` constants and hides every
/// message less severe than itself.
///
/// # Ordering (most verbose → most quiet)
///
/// `Trace` > `Debug` > `Verbose` > `Info` > `Warning` > `Error` > `Fatal` > `Panic` > `Quiet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// Nothing at all.
    Quiet,
    /// Only conditions after which FFmpeg aborts the process.
    Panic,
    /// Unrecoverable errors that leave the context unusable.
    Fatal,
    /// Recoverable errors, such as a corrupt packet.
    Error,
    /// Warnings. FFmpeg's default.
    Warning,
    /// Informational messages, including stream summaries.
    Info,
    /// More detailed informational messages.
    Verbose,
    /// Debugging output.
    Debug,
    /// Everything, down to per-packet tracing.
    Trace,
}

impl FfmpegLogLevel {
    fn to_ffmpeg_level(self) -> Level {
        match self {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Panic => Level::Panic,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Verbose => Level::Verbose,
            FfmpegLogLevel::Debug => Level::Debug,
            FfmpegLogLevel::Trace => Level::Trace,
        }
    }
}

impl FromStr for FfmpegLogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quiet" => Ok(FfmpegLogLevel::Quiet),
            "panic" => Ok(FfmpegLogLevel::Panic),
            "fatal" => Ok(FfmpegLogLevel::Fatal),
            "error" => Ok(FfmpegLogLevel::Error),
            "warning" | "warn" => Ok(FfmpegLogLevel::Warning),
            "info" => Ok(FfmpegLogLevel::Info),
            "verbose" => Ok(FfmpegLogLevel::Verbose),
            "debug" => Ok(FfmpegLogLevel::Debug),
            "trace" => Ok(FfmpegLogLevel::Trace),
            other => Err(format!(
                "unsupported log level '{other}' (quiet, panic, fatal, error, warning, info, verbose, debug, trace)"
            )),
        }
    }
}

/// Set what FFmpeg prints to stderr. Does not affect `log` output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level.to_ffmpeg_level());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_levels() {
        assert_eq!("quiet".parse(), Ok(FfmpegLogLevel::Quiet));
        assert_eq!("WARN".parse(), Ok(FfmpegLogLevel::Warning));
        assert_eq!(" trace ".parse(), Ok(FfmpegLogLevel::Trace));
        assert!("loud".parse::<FfmpegLogLevel>().is_err());
    }
}
