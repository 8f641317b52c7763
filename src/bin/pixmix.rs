use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pixmix", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene's shader graph to a PNG.
    Render(RenderArgs),
    /// Write a scene's shader graph in the binary persisted form.
    Flatten(FlattenArgs),
    /// Decode a persisted shader graph and print its tree.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the scene width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the scene height.
    #[arg(long)]
    height: Option<u32>,

    /// Render rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for parallel rendering (defaults to rayon's choice).
    #[arg(long)]
    threads: Option<usize>,

    /// Pixels per pipeline batch.
    #[arg(long)]
    lane_width: Option<usize>,

    /// Build pipelines without the gradient capability.
    #[arg(long)]
    no_gradients: bool,

    /// Write straight-alpha pixels instead of premultiplied ones.
    #[arg(long)]
    unpremultiply: bool,
}

#[derive(Parser, Debug)]
struct FlattenArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output binary path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Persisted shader graph.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Flatten(args) => cmd_flatten(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn read_scene(path: &Path) -> anyhow::Result<pixmix::Scene> {
    pixmix::Scene::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let input = scene.build().context("build shader graph")?;

    let mut opts = pixmix::RenderOpts {
        parallel: args.parallel,
        threads: args.threads,
        ..pixmix::RenderOpts::default()
    };
    if let Some(lane_width) = args.lane_width {
        opts.raster.lane_width = lane_width;
    }
    if args.no_gradients {
        opts.raster.caps.gradients = false;
    }

    let width = args.width.unwrap_or(scene.width());
    let height = args.height.unwrap_or(scene.height());
    let mut frame = pixmix::render_rgba8(&input, &scene.paint(), width, height, &opts)?;

    if args.unpremultiply {
        for px in frame.data.chunks_exact_mut(4) {
            unpremultiply_rgba8(px);
        }
        frame.premultiplied = false;
    }

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn unpremultiply_rgba8(px: &mut [u8]) {
    let a = px[3];
    if a == 0 || a == 255 {
        return;
    }
    for c in &mut px[..3] {
        let v = (u16::from(*c) * 255 + u16::from(a) / 2) / u16::from(a);
        *c = v.min(255) as u8;
    }
}

fn cmd_flatten(args: FlattenArgs) -> anyhow::Result<()> {
    let scene = read_scene(&args.in_path)?;
    let input = scene.build().context("build shader graph")?;
    let bytes = pixmix::serialize_shader(&input);

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} bytes)", args.out.display(), bytes.len());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let input = pixmix::deserialize_shader(&bytes)
        .with_context(|| format!("decode shader graph '{}'", args.in_path.display()))?;

    print!("{}", input.describe_tree());
    Ok(())
}
