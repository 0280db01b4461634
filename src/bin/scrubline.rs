use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use scrubline::{
    AnimationEngine, FrameInput, FrameOutput, PathSampler, PhaseRunner, SceneConfig,
    ScrollController as _, SimulatedScroll, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "scrubline", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and validate a scene file.
    Validate(ValidateArgs),
    /// Evaluate a scene against a list of scroll positions.
    Eval(EvalArgs),
    /// Sample a motion path by arc length.
    Sample(SampleArgs),
    /// Run the scene's demo phases with a simulated scroller.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ViewportArgs {
    /// Viewport width in CSS px.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in CSS px.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Input kind used for smoothing.
    #[arg(long, value_enum, default_value_t = InputChoice::Pointer)]
    input: InputChoice,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll positions, one frame each.
    #[arg(long, value_delimiter = ',', required = true)]
    scroll: Vec<f64>,

    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// SVG path data.
    #[arg(long)]
    path: String,

    /// Number of intervals; `steps + 1` samples are printed.
    #[arg(long, default_value_t = 10)]
    steps: u32,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON with a `demo` phase list.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Stop after this many frames even if the demo has not finished.
    #[arg(long, default_value_t = 10_000)]
    max_frames: u32,

    #[command(flatten)]
    viewport: ViewportArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputChoice {
    Pointer,
    Touch,
}

impl From<InputChoice> for scrubline::InputKind {
    fn from(c: InputChoice) -> Self {
        match c {
            InputChoice::Pointer => Self::Pointer,
            InputChoice::Touch => Self::Touch,
        }
    }
}

#[derive(serde::Serialize)]
struct PathSampleRow {
    progress: f64,
    x: f64,
    y: f64,
    angle_deg: f64,
}

#[derive(serde::Serialize)]
struct PathReport {
    length: f64,
    samples: Vec<PathSampleRow>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_scene(path: &Path) -> anyhow::Result<SceneConfig> {
    let scene = SceneConfig::from_path(path)?;
    scene
        .validate()
        .with_context(|| format!("validate scene '{}'", path.display()))?;
    Ok(scene)
}

fn build_engine(scene: &SceneConfig, args: &ViewportArgs) -> anyhow::Result<AnimationEngine> {
    let mut engine = scene.build()?;
    engine.set_input(args.input.into());
    Ok(engine)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("write JSON to stdout")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let timelines: usize = scene.sections.iter().map(|s| s.timelines.len()).sum();
    eprintln!(
        "ok: {} section(s), {} timeline(s), {} demo phase(s)",
        scene.sections.len(),
        timelines,
        scene.demo.len()
    );
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let mut engine = build_engine(&scene, &args.viewport)?;
    let viewport = Viewport::new(args.viewport.width, args.viewport.height);

    let mut frames: Vec<FrameOutput> = Vec::with_capacity(args.scroll.len());
    for (i, scroll_y) in args.scroll.iter().copied().enumerate() {
        let out = engine.frame(FrameInput {
            scroll_y,
            viewport,
            now_ms: i as f64 * args.viewport.frame_ms,
        })?;
        frames.push(out);
    }
    print_json(&frames)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let sampler = PathSampler::from_svg(&args.path)?;
    let steps = args.steps.max(1);
    let samples = (0..=steps)
        .map(|i| {
            let progress = f64::from(i) / f64::from(steps);
            let s = sampler.sample(progress);
            PathSampleRow {
                progress,
                x: s.point.x,
                y: s.point.y,
                angle_deg: s.angle_deg,
            }
        })
        .collect();
    print_json(&PathReport {
        length: sampler.length(),
        samples,
    })
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let sequence = scene
        .demo_sequence()?
        .with_context(|| format!("scene '{}' has no demo phases", args.in_path.display()))?;
    let mut engine = build_engine(&scene, &args.viewport)?;
    let viewport = Viewport::new(args.viewport.width, args.viewport.height);

    let mut scroll = SimulatedScroll::new(0.0);
    let mut runner = PhaseRunner::new(sequence);
    runner.start(0.0, &scroll);

    let mut frames = Vec::new();
    for i in 0..args.max_frames {
        let now_ms = f64::from(i) * args.viewport.frame_ms;
        let tick = runner.tick(now_ms, &mut scroll);
        frames.push(engine.frame(FrameInput {
            scroll_y: scroll.scroll_y(),
            viewport,
            now_ms,
        })?);
        if tick.state != scrubline::phases::RunnerState::Running {
            break;
        }
    }
    print_json(&frames)
}
