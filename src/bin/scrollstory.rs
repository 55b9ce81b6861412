use std::{
    collections::BTreeMap,
    fmt,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use scrollstory::{
    ActFrame, ActOrchestrator, Captions, ContainerId, ContentCatalog, ContentKey, Host, Progress,
    ReducedMotion, SegmentTableDef, SimulatedPage, StoryData, engine::signals::discontinuities,
    story,
};

#[derive(Parser, Debug)]
#[command(name = "scrollstory", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an act at evenly spaced progress values and print one JSON frame per line.
    Sample(SampleArgs),
    /// Check every continuous signal for jumps at segment boundaries.
    Verify(VerifyArgs),
    /// Validate a segment table JSON file.
    Check(CheckArgs),
    /// Scroll a simulated page through an act and print the frames it produces.
    Scroll(ScrollArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long, value_enum)]
    act: ActChoice,

    /// Number of intervals; `steps + 1` frames are printed.
    #[arg(long, default_value_t = 20)]
    steps: u32,

    #[arg(long)]
    reduced_motion: bool,

    /// Story data JSON overriding the built-in tables.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Content catalog JSON; adds the copy of the mounted sections to each frame.
    #[arg(long)]
    content: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct VerifyArgs {
    /// Act to check; all acts when omitted.
    #[arg(long, value_enum)]
    act: Option<ActChoice>,

    /// Distance before each boundary to sample.
    #[arg(long, default_value_t = 1e-9)]
    epsilon: f64,

    /// Largest acceptable jump.
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,

    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Segment table JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ScrollArgs {
    #[arg(long, value_enum)]
    act: ActChoice,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    viewport: f64,

    /// Height of the act container in pixels.
    #[arg(long, default_value_t = 12_000.0)]
    container_height: f64,

    /// Scroll distance between frames in pixels.
    #[arg(long, default_value_t = 600.0)]
    step: f64,

    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ActChoice {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[value(name = "3")]
    Three,
}

impl ActChoice {
    const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Verify(args) => cmd_verify(args),
        Command::Check(args) => cmd_check(args),
        Command::Scroll(args) => cmd_scroll(args),
    }
}

fn load_data(path: Option<&PathBuf>) -> anyhow::Result<StoryData> {
    match path {
        Some(p) => StoryData::from_path(p)
            .with_context(|| format!("load story data '{}'", p.display())),
        None => Ok(StoryData::default()),
    }
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "--steps must be at least 1");
    let data = load_data(args.data.as_ref())?;
    let content = args
        .content
        .as_ref()
        .map(|p| {
            ContentCatalog::from_path(p)
                .with_context(|| format!("load content catalog '{}'", p.display()))
        })
        .transpose()?;
    let motion = ReducedMotion(args.reduced_motion);
    let content = content.as_ref();
    let mut out = io::stdout().lock();
    match args.act {
        ActChoice::One => {
            let mut act = story::act1::build(&data)?;
            sample(&mut act, args.steps, motion, content, &mut out)
        }
        ActChoice::Two => {
            let mut act = story::act2::build(&data)?;
            sample(&mut act, args.steps, motion, content, &mut out)
        }
        ActChoice::Three => {
            let mut act = story::act3::build()?;
            sample(&mut act, args.steps, motion, content, &mut out)
        }
    }
}

#[derive(serde::Serialize)]
struct SampleLine<'a, S, V> {
    #[serde(flatten)]
    frame: &'a ActFrame<S, V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    copy: Option<BTreeMap<ContentKey, &'a str>>,
}

fn sample<S, C, V>(
    act: &mut ActOrchestrator<S, C, V>,
    steps: u32,
    motion: ReducedMotion,
    content: Option<&ContentCatalog>,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: Clone + PartialEq + fmt::Debug + serde::Serialize + Captions,
    V: Clone + serde::Serialize,
{
    for i in 0..=steps {
        let p = Progress::new(f64::from(i) / f64::from(steps));
        let frame = act.step(p, motion);
        let line = SampleLine {
            frame: &frame,
            copy: content.map(|c| c.captions(frame.sections.iter().map(|s| &s.id))),
        };
        serde_json::to_writer(&mut *out, &line).context("serialize frame")?;
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let data = load_data(args.data.as_ref())?;
    let acts = match args.act {
        Some(a) => vec![a],
        None => ActChoice::ALL.to_vec(),
    };

    let mut failed = 0usize;
    for choice in acts {
        failed += match choice {
            ActChoice::One => verify(&story::act1::build(&data)?, &args),
            ActChoice::Two => verify(&story::act2::build(&data)?, &args),
            ActChoice::Three => verify(&story::act3::build()?, &args),
        };
    }
    if failed > 0 {
        anyhow::bail!("{failed} discontinuities above tolerance {}", args.tolerance);
    }
    Ok(())
}

fn verify<S, C, V>(act: &ActOrchestrator<S, C, V>, args: &VerifyArgs) -> usize
where
    S: Clone + PartialEq + fmt::Debug,
    V: Clone + scrollstory::Signals,
{
    let bad = discontinuities(
        act.table(),
        act.resolver(),
        act.carry(),
        args.epsilon,
        args.tolerance,
    );
    let boundaries = act.table().boundaries().count();
    if bad.is_empty() {
        println!("{}: ok ({boundaries} boundaries)", act.name());
    } else {
        for j in &bad {
            println!(
                "{}: jump of {:e} in '{}' at {} ({} -> {})",
                act.name(),
                j.size(),
                j.signal,
                j.boundary,
                j.before,
                j.after
            );
        }
    }
    bad.len()
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let table = SegmentTableDef::from_path(&args.in_path)
        .and_then(SegmentTableDef::build)
        .with_context(|| format!("check segment table '{}'", args.in_path.display()))?;
    println!("ok: {} segments", table.len());
    for seg in table.iter() {
        println!("  {:>2} {:<20} [{}, {})", seg.index, seg.id, seg.start, seg.end);
    }
    Ok(())
}

fn cmd_scroll(args: ScrollArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0.0, "--step must be positive");
    anyhow::ensure!(
        args.container_height > args.viewport,
        "--container-height must exceed --viewport"
    );
    let data = StoryData::default();
    let motion = ReducedMotion(args.reduced_motion);

    let mut page = SimulatedPage::new(args.viewport);
    page.push_spacer(args.viewport);
    let container = page.push_container(args.container_height);
    page.push_spacer(args.viewport);

    let mut out = io::stdout().lock();
    match args.act {
        ActChoice::One => {
            let mut act = story::act1::build(&data)?;
            scroll(&mut act, &mut page, container, &args, motion, &mut out)
        }
        ActChoice::Two => {
            let mut act = story::act2::build(&data)?;
            scroll(&mut act, &mut page, container, &args, motion, &mut out)
        }
        ActChoice::Three => {
            let mut act = story::act3::build()?;
            scroll(&mut act, &mut page, container, &args, motion, &mut out)
        }
    }
}

fn scroll<S, C, V>(
    act: &mut ActOrchestrator<S, C, V>,
    page: &mut SimulatedPage,
    container: ContainerId,
    args: &ScrollArgs,
    motion: ReducedMotion,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: Clone + PartialEq + fmt::Debug + serde::Serialize,
    V: Clone + serde::Serialize,
{
    act.attach(page, container);
    let max = page.max_scroll();
    let mut y = 0.0;
    loop {
        page.scroll_to(y);
        act.on_scroll(page);
        page.take_frames();
        if let Some(frame) = act.on_frame(&*page, motion) {
            write!(out, "{{\"scroll_y\":{},\"frame\":", page.scroll_y())?;
            serde_json::to_writer(&mut *out, &frame).context("serialize frame")?;
            writeln!(out, "}}")?;
        }
        if y >= max {
            break;
        }
        y = (y + args.step).min(max);
    }
    act.detach(page);
    tracing::debug!(listeners = page.listener_count(), "scroll finished");
    Ok(())
}
