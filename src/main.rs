mod cli;

use playscan::{
    config, report,
    scanner::{self, ScanEvent, Scanner},
};
use playscan_probe::{tools, FfprobeProber};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "playscan=debug,playscan_probe=debug".to_string()
        } else {
            "playscan=warn,playscan_probe=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config::validate_config(&config)?;

    if cli.check_tools {
        return Ok(check_tools(config.probe.ffprobe_path.as_deref()));
    }

    // With --json, stdout carries only the report; chatter goes to stderr.
    let console = Console { to_stderr: cli.json };

    let directory = match &cli.directory {
        Some(dir) => dir.clone(),
        None => prompt_for_directory(&console)?,
    };

    // A bad root is reported before the probe tool is even looked up.
    if let Err(e) = scanner::ensure_directory(&directory) {
        eprintln!("Error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    let ffprobe = tools::get_tool_path("ffprobe", config.probe.ffprobe_path.as_deref())
        .context("ffprobe is required to analyze media files")?;
    tracing::debug!("Using ffprobe at {:?}", ffprobe);
    let prober = FfprobeProber::new(ffprobe).with_timeout(config.probe.timeout());

    let scanner = Scanner::new(Box::new(prober))
        .with_config(config.scan.clone())
        .with_progress(Box::new(move |event| console.progress(event)));

    console.line(&format!("\nScanning directory: {}", directory.display()));
    console.line(
        "This may take some time depending on the number and size of video files...\n",
    );

    let report = scanner.scan(&directory)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        report::write_json(&report, &mut out)?;
    } else {
        report::write_text(&report, &mut out)?;
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}

/// Where user-facing progress lines are printed.
#[derive(Clone, Copy)]
struct Console {
    to_stderr: bool,
}

impl Console {
    fn line(&self, text: &str) {
        if self.to_stderr {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    fn progress(&self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::Analyzing(path) => self.line(&format!("Analyzing: {}", path.display())),
            ScanEvent::ProbeFailed { path, error } => {
                self.line(&format!("Error processing {}: {}", path.display(), error))
            }
        }
    }
}

fn prompt_for_directory(console: &Console) -> Result<PathBuf> {
    let prompt = "Enter the directory to scan: ";
    if console.to_stderr {
        eprint!("{}", prompt);
        io::stderr().flush()?;
    } else {
        print!("{}", prompt);
        io::stdout().flush()?;
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read directory from stdin")?;

    Ok(PathBuf::from(line.trim()))
}

fn check_tools(configured: Option<&Path>) -> ExitCode {
    println!("Checking external tools...\n");

    let tool = tools::check_ffprobe(configured);
    let status = if tool.available { "✓" } else { "✗" };

    print!("{} {}", status, tool.name);
    if let Some(ref version) = tool.version {
        print!(" ({})", version);
    }
    if let Some(ref path) = tool.path {
        print!(" - {}", path.display());
    }
    println!();

    println!();
    if tool.available {
        println!("All required tools are available!");
        ExitCode::SUCCESS
    } else {
        println!("ffprobe is missing. Install FFmpeg to enable scanning.");
        ExitCode::FAILURE
    }
}
