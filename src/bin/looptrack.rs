use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "looptrack", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Replay a timed command script and print engine events as JSON lines.
    Simulate(SimulateArgs),
    /// Print the measured layout, timeline labels and resting times.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Script JSON: slide sizes, container, run length and timed commands.
    #[arg(long)]
    script: PathBuf,

    /// Engine config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tick rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Comma-separated slide sizes in pixels.
    #[arg(long, value_delimiter = ',', required = true)]
    sizes: Vec<f64>,

    /// Viewport length in pixels.
    #[arg(long)]
    container: f64,

    /// Engine config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
struct Script {
    sizes: Vec<f64>,
    container: f64,
    /// Seconds of wall-clock time to simulate.
    duration: f64,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, serde::Deserialize)]
struct Step {
    at: f64,
    #[serde(flatten)]
    command: looptrack::Command,
}

#[derive(serde::Serialize)]
struct Line<'a> {
    t: f64,
    #[serde(flatten)]
    event: &'a looptrack::TrackEvent,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Simulate(args) => cmd_simulate(args),
        Cmd::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<looptrack::TrackConfig> {
    match path {
        Some(path) => looptrack::TrackConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display())),
        None => Ok(looptrack::TrackConfig::default()),
    }
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    let f = File::open(path).with_context(|| format!("open script '{}'", path.display()))?;
    let script: Script =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse script JSON")?;
    Ok(script)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    let config = read_config(args.config.as_deref())?;
    let mut script = read_script(&args.script)?;
    script.steps.sort_by(|a, b| a.at.total_cmp(&b.at));

    let mut engine = looptrack::TrackEngine::new(config, &script.sizes, script.container, 0.0)
        .with_context(|| "build engine")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, 0.0, &engine.tick(0.0))?;

    let frames = (script.duration * args.fps).ceil().max(0.0) as u64;
    let mut steps = script.steps.into_iter().peekable();
    for k in 1..=frames {
        let t = k as f64 / args.fps;
        while let Some(step) = steps.next_if(|s| s.at <= t) {
            match engine.dispatch(step.command, step.at) {
                Ok(events) => emit(&mut out, step.at, &events)?,
                Err(err) => {
                    tracing::warn!(at = step.at, %err, "command rejected");
                    let line = serde_json::json!({ "t": step.at, "rejected": err.to_string() });
                    writeln!(out, "{line}")?;
                }
            }
        }
        emit(&mut out, t, &engine.tick(t))?;
    }

    out.flush()?;
    Ok(())
}

fn emit(
    out: &mut impl std::io::Write,
    t: f64,
    events: &[looptrack::TrackEvent],
) -> anyhow::Result<()> {
    for event in events {
        serde_json::to_writer(&mut *out, &Line { t, event })?;
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let engine = looptrack::TrackEngine::new(config, &args.sizes, args.container, 0.0)
        .with_context(|| "build engine")?;
    let nav = engine.navigator();
    let targets: Vec<f64> = (0..nav.len()).map(|i| nav.target_time(i)).collect();

    let report = serde_json::json!({
        "layout": engine.layout(),
        "duration": engine.timeline().duration(),
        "labels": engine.timeline().labels(),
        "targets": targets,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
