//! # CLI Module
//!
//! Command-line interface for the photo authenticity checker.
//!
//! ## Usage
//! ```bash
//! # Analyze an image with the default strategy
//! photo-verify analyze ~/Pictures/holiday.png
//!
//! # Use the remote fallback chain through a local proxy
//! photo-verify analyze photo.jpg --strategy remote --endpoint http://localhost:3000/api/hf
//!
//! # JSON output
//! photo-verify analyze photo.jpg --output json
//!
//! # Just show intake insights
//! photo-verify inspect photo.jpg
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_authenticity_checker::core::classifier::{
    Classifier, ContentSignalClassifier, FilenameHeuristic, RemoteConfig,
    RemoteFallbackClassifier,
};
use photo_authenticity_checker::core::orchestrator::AnalysisSession;
use photo_authenticity_checker::core::presenter::{CountUp, Tone, VerdictPresentation};
use photo_authenticity_checker::error::Result;
use photo_authenticity_checker::events::{AnalysisEvent, Event, EventChannel};
use std::path::PathBuf;
use std::thread;

/// Photo Authenticity Checker - REAL or FAKE, with reasons
#[derive(Parser, Debug)]
#[command(name = "photo-verify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze an image and print the verdict
    Analyze {
        /// Image file to analyze
        image: PathBuf,

        /// Classifier strategy to use
        #[arg(short, long, default_value = "filename")]
        strategy: Strategy,

        /// Base URL of the inference proxy (remote strategy)
        #[arg(long)]
        endpoint: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Skip the simulated processing delays
        #[arg(long)]
        instant: bool,

        /// Verbose output (per-class scores, model id)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show intake insights for an image without analyzing it
    Inspect {
        /// Image file to inspect
        image: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Local display-name heuristic (default)
    Filename,
    /// Sequential fallback across hosted classifiers
    Remote,
    /// Capture-signal heuristic (EXIF + canvas shape)
    Signals,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    photo_authenticity_checker::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            image,
            strategy,
            endpoint,
            output,
            instant,
            verbose,
        } => run_analyze(image, strategy, endpoint, output, instant, verbose),
        Commands::Inspect { image, output } => run_inspect(image, output),
    }
}

fn build_classifier(
    strategy: Strategy,
    endpoint: Option<String>,
    instant: bool,
) -> Result<Box<dyn Classifier>> {
    Ok(match strategy {
        Strategy::Filename => {
            if instant {
                Box::new(FilenameHeuristic::with_delays(
                    std::time::Duration::ZERO,
                    std::time::Duration::ZERO,
                ))
            } else {
                Box::new(FilenameHeuristic::new())
            }
        }
        Strategy::Remote => {
            let mut config = RemoteConfig::default();
            if let Some(endpoint) = endpoint {
                config.base_url = endpoint;
            }
            Box::new(RemoteFallbackClassifier::new(config)?)
        }
        Strategy::Signals => Box::new(ContentSignalClassifier::new()),
    })
}

fn run_analyze(
    image: PathBuf,
    strategy: Strategy,
    endpoint: Option<String>,
    output: OutputFormat,
    instant: bool,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Authenticity Checker").bold().cyan(),
            style("v0.1.0").dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let classifier = build_classifier(strategy, endpoint, instant)?;
    let mut session = AnalysisSession::new(classifier);

    let (sender, receiver) = EventChannel::new();

    // Spinner mirrors the status narration
    let spinner = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    let spinner_clone = spinner.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Analysis(AnalysisEvent::StatusChanged { message }) => {
                    if let Some(ref pb) = spinner_clone {
                        pb.set_message(message);
                    }
                }
                Event::Analysis(AnalysisEvent::ProviderSkipped { provider, reason }) => {
                    if let Some(ref pb) = spinner_clone {
                        pb.set_message(format!("{} unavailable ({}), trying next...", provider, reason));
                    }
                }
                Event::Analysis(AnalysisEvent::Completed { .. })
                | Event::Analysis(AnalysisEvent::Error { .. })
                | Event::Analysis(AnalysisEvent::Cancelled) => {
                    if let Some(ref pb) = spinner_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    // Intake
    if let Err(e) = session.select_path(&image, &sender) {
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        drop(sender);
        event_thread.join().ok();
        term.write_line(&format!("{} {}", style("✗").red().bold(), e)).ok();
        std::process::exit(1);
    }

    // Analysis
    let outcome = session.analyze(&sender).map(|_| ());
    drop(sender);
    event_thread.join().ok();

    match outcome {
        Ok(()) => {}
        Err(_) => {
            let message = session
                .user_error()
                .unwrap_or("Analysis failed. Please try again.")
                .to_string();
            term.write_line(&format!("{} {}", style("✗").red().bold(), message))
                .ok();
            std::process::exit(1);
        }
    }

    let verdict = session.verdict().expect("analysis succeeded");
    let insights = session.asset().expect("asset selected").insights();

    match output {
        OutputFormat::Pretty => {
            print_pretty_verdict(&term, &session, verbose);
        }
        OutputFormat::Json => {
            let presentation = VerdictPresentation::from_verdict(verdict);
            let payload = serde_json::json!({
                "verdict": verdict,
                "presentation": presentation,
                "insights": insights,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn print_pretty_verdict(term: &Term, session: &AnalysisSession, verbose: bool) {
    let verdict = session.verdict().expect("verdict present");
    let asset = session.asset().expect("asset present");
    let presentation = VerdictPresentation::from_verdict(verdict);

    term.write_line("").ok();

    let badge = match presentation.tone {
        Tone::Favorable => style(format!(" {} ", presentation.label)).black().on_green(),
        Tone::Unfavorable => style(format!(" {} ", presentation.label)).white().on_red(),
    };
    term.write_line(&format!("  {} {}", badge, style(&presentation.headline).bold()))
        .ok();
    term.write_line(&format!("  {}", style(&presentation.subline).dim()))
        .ok();
    term.write_line("").ok();

    // Count the confidence up to its final value
    let plan = CountUp::new(presentation.confidence_percent);
    for frame in plan.frames() {
        term.clear_line().ok();
        term.write_str(&format!("  Confidence: {}%", style(frame).bold().cyan()))
            .ok();
        std::thread::sleep(plan.step_interval());
    }
    term.write_line("").ok();
    term.write_line(&format!("  Band: {:?}", presentation.band)).ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} {}",
        style("Analysis:").bold(),
        verdict.details.analysis
    ))
    .ok();

    let insights = asset.insights();
    term.write_line(&format!(
        "  {} {} · {} · {}",
        style("Image:").bold(),
        insights.file_name,
        insights.format,
        insights.size_display
    ))
    .ok();
    if let (Some(dims), Some(mp)) = (&insights.dimensions, &insights.megapixels) {
        term.write_line(&format!("  {} {} ({})", style("Dimensions:").bold(), dims, mp))
            .ok();
    }

    if verbose {
        term.write_line("").ok();
        term.write_line(&format!(
            "  {} {} via {}",
            style("Model:").dim(),
            verdict.details.model,
            verdict.details.method
        ))
        .ok();
        term.write_line(&format!(
            "  {} fake {:.1}% / real {:.1}%",
            style("Scores:").dim(),
            verdict.details.fake_score * 100.0,
            verdict.details.real_score * 100.0
        ))
        .ok();
        if let Some(camera) = asset.capture().camera_display() {
            term.write_line(&format!("  {} {}", style("Camera:").dim(), camera))
                .ok();
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style("This analysis should be one factor among several; results may not be 100% accurate.")
            .dim()
    ))
    .ok();
}

fn run_inspect(image: PathBuf, output: OutputFormat) -> Result<()> {
    let term = Term::stderr();

    let mut session = AnalysisSession::new(Box::new(ContentSignalClassifier::new()));
    let (sender, _receiver) = EventChannel::new();

    if let Err(e) = session.select_path(&image, &sender) {
        term.write_line(&format!("{} {}", style("✗").red().bold(), e)).ok();
        std::process::exit(1);
    }

    let asset = session.asset().expect("asset selected");
    let insights = asset.insights();

    match output {
        OutputFormat::Pretty => {
            term.write_line(&format!("{}", style("Image Insights").bold().underlined()))
                .ok();
            term.write_line("").ok();
            term.write_line(&format!("  File Name    {}", insights.file_name)).ok();
            term.write_line(&format!("  Format       {}", insights.format)).ok();
            term.write_line(&format!("  File Size    {}", insights.size_display)).ok();
            if let Some(dims) = &insights.dimensions {
                term.write_line(&format!("  Dimensions   {}", dims)).ok();
            }
            if let Some(ratio) = &insights.aspect_ratio {
                term.write_line(&format!("  Aspect Ratio {}", ratio)).ok();
            }
            if let Some(mp) = &insights.megapixels {
                term.write_line(&format!("  Resolution   {}", mp)).ok();
            }
            if let Some(camera) = asset.capture().camera_display() {
                term.write_line(&format!("  Camera       {}", camera)).ok();
            }
            if let Some(software) = &asset.capture().software {
                term.write_line(&format!("  Software     {}", software)).ok();
            }
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "insights": insights,
                "capture": asset.capture(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_default()
            );
        }
    }

    Ok(())
}
