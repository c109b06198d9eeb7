use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use framedump::{
    ExtractOptions, ExtractionReport, FfmpegLogLevel, FrameExtractor, ImageFormat,
    ProgressCallback, ProgressInfo, SourceName, frame_file_name,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framedump -i clip.mp4 -o frames -f jpg\n  framedump -i clip.mkv -o frames -f png --no-imported-copy --json\n  framedump -i clip.mp4 -o frames -f jpg --quality 80 --log-level quiet";

#[derive(Debug, Parser)]
#[command(
    name = "framedump",
    version,
    about = "Import a video file and save all its frames to a folder",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video file.
    #[arg(short, long)]
    input: PathBuf,

    /// Output folder (created if missing).
    #[arg(short, long)]
    output: PathBuf,

    /// Output format (jpg or png).
    #[arg(short, long)]
    format: String,

    /// JPEG quality, 1-100.
    #[arg(long, default_value_t = framedump::DEFAULT_JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Do not create the `<name>_imported<ext>` video next to the frames.
    #[arg(long)]
    no_imported_copy: bool,

    /// Hide the progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Print every saved frame.
    #[arg(long)]
    verbose: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<FfmpegLogLevel>,

    /// Print a JSON summary instead of the success message.
    #[arg(long)]
    json: bool,
}

/// Drives an indicatif bar whose length follows the container's frame
/// count and grows when decoding runs past it.
struct TerminalProgress {
    bar: ProgressBar,
    saved_frames: Option<(SourceName, ImageFormat, PathBuf)>,
}

impl TerminalProgress {
    fn new(cli: &Cli) -> Self {
        let bar = if cli.no_progress {
            ProgressBar::hidden()
        } else {
            ProgressBar::no_length()
        };

        let saved_frames = if cli.verbose {
            ImageFormat::parse(&cli.format)
                .map(|format| (SourceName::from_path(&cli.input), format, cli.output.clone()))
        } else {
            None
        };

        Self { bar, saved_frames }
    }

    fn style(known_length: bool) -> ProgressStyle {
        let template = if known_length {
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta})"
        } else {
            "{spinner:.green} [{elapsed_precise}] {pos} frames"
        };
        ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        match info.total {
            Some(total) => {
                let length = total.max(info.current);
                if self.bar.length() != Some(length) {
                    if self.bar.length().is_none() {
                        self.bar.set_style(Self::style(true));
                    }
                    self.bar.set_length(length);
                }
            }
            None if self.bar.length().is_none() => self.bar.set_style(Self::style(false)),
            None => {}
        }
        self.bar.set_position(info.current);

        if let (Some((name, format, output)), Some(frame_index)) =
            (&self.saved_frames, info.current_frame)
        {
            let path = output.join(frame_file_name(&name.video_name, frame_index, *format));
            self.bar
                .println(format!("saved frame {frame_index} -> {}", path.display()));
        }
    }
}

fn report_json(report: &ExtractionReport) -> serde_json::Value {
    json!({
        "frames_written": report.frames_written,
        "output_dir": report.output_dir.display().to_string(),
        "imported_copy": report.imported_copy.as_ref().map(|path| path.display().to_string()),
        "video": {
            "width": report.metadata.width,
            "height": report.metadata.height,
            "fps": report.metadata.frames_per_second,
            "frame_count": report.metadata.frame_count,
            "codec": report.metadata.codec,
        },
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        framedump::set_ffmpeg_log_level(level);
    }

    let progress = Arc::new(TerminalProgress::new(&cli));
    let options = ExtractOptions::new()
        .with_progress(progress.clone())
        .with_jpeg_quality(cli.quality)
        .with_imported_copy(!cli.no_imported_copy);

    let result = FrameExtractor::new(options).extract(&cli.input, &cli.output, &cli.format);
    match &result {
        Ok(_) => progress.bar.finish_and_clear(),
        Err(_) => progress.bar.abandon(),
    }
    let report = result?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Video imported successfully! {} frame(s) written to {}",
                report.frames_written,
                report.output_dir.display()
            )
            .green()
        );
        if report.imported_copy.is_none() && !cli.no_imported_copy {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                "the imported video copy could not be created".yellow()
            );
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
