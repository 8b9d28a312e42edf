mod cli;

use clipmate::{config, cut, detect, error::CutError};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use clipmate_av::check_tools;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "clipmate=trace,clipmate_av=trace".to_string()
        } else {
            "clipmate=info,clipmate_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Detect {
            video,
            preset,
            output,
        } => detect_video(&video, &preset, output.as_deref(), cli.config.as_deref()),
        Commands::Cut {
            video,
            report,
            output,
        } => cut_video(&video, &report, output.as_deref(), cli.config.as_deref()),
        Commands::Probe { file, json } => probe_file(&file, json),
        Commands::CheckTools => check_external_tools(),
        Commands::Version => {
            println!("clipmate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn detect_video(
    video: &Path,
    preset_name: &str,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = match config::load_config_or_default(config_path) {
        Ok(config) => config,
        Err(e) => return fail_message(&format!("{:#}", e)),
    };
    let preset = config::Preset::from_name(preset_name);

    let report = match detect::run_detection(video, preset, &config.detection) {
        Ok(report) => report,
        Err(e) => return fail(&e),
    };

    match output {
        Some(path) => {
            if let Err(e) = report.save(path) {
                return fail_message(&format!("{:#}", e));
            }
            tracing::info!("Report written to {:?}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn cut_video(
    video: &Path,
    report: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = match config::load_config_or_default(config_path) {
        Ok(config) => config,
        Err(e) => return fail_message(&format!("{:#}", e)),
    };

    match cut::run_cut(video, report, output, &config.detection) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => fail(&e),
    }
}

/// Print the structured error value and exit non-zero.
fn fail(error: &CutError) -> Result<()> {
    emit_error(error.to_json())
}

fn fail_message(message: &str) -> Result<()> {
    emit_error(serde_json::json!({
        "status": "error",
        "message": message,
    }))
}

fn emit_error(value: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    std::process::exit(1);
}

fn probe_file(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let info = clipmate_av::probe_video(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("File: {}", file.display());
        println!("Resolution: {}", info.resolution);
        println!("Frame rate: {:.2} fps", info.fps);
        let secs = info.duration as u64;
        println!(
            "Duration: {:02}:{:02}:{:02}",
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        );
        println!("Size: {:.2} MB", info.size_mb);
    }

    Ok(())
}

fn check_external_tools() -> Result<()> {
    println!("Checking external tools...\n");

    let tools = check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }
        if let Some(ref path) = tool.path {
            print!(" at {}", path.display());
        }
        println!();
    }

    if all_ok {
        println!("\nAll tools available.");
        Ok(())
    } else {
        anyhow::bail!("Some required tools are missing")
    }
}
