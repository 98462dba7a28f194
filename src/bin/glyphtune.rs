use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use glyphtune::server::{AppState, create_router};
use glyphtune::{Config, EmbedOpts, FfmpegTools, embed_into_file};

#[derive(Parser, Debug)]
#[command(name = "glyphtune", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the embed web service (requires `ffmpeg` on PATH).
    Serve(ServeArgs),
    /// Embed a glyph script into a local audio file.
    Embed(EmbedArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Listen address, e.g. 127.0.0.1:5000. Overrides GLYPHTUNE_LISTEN.
    #[arg(long)]
    listen: Option<String>,
}

#[derive(Parser, Debug)]
struct EmbedArgs {
    /// Input audio file (any format ffmpeg can read).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Glyph script file (comma-separated lines).
    #[arg(long)]
    script: PathBuf,

    /// Output Ogg/Opus path.
    #[arg(long)]
    out: PathBuf,

    /// TITLE tag for the output file.
    #[arg(long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Embed(args) => cmd_embed(args),
    }
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }

    let tools = FfmpegTools::new(&config.ffmpeg_path, &config.ffprobe_path)
        .context("resolve ffmpeg tools")?;
    tracing::info!(ffmpeg = %tools.ffmpeg_path().display(), "resolved external tools");

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("parse listen address '{}'", config.listen_addr))?;

    let app = create_router(AppState { tools }, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind '{addr}'"))?;

    tracing::info!(%addr, "glyphtune listening");
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}

fn cmd_embed(args: EmbedArgs) -> anyhow::Result<()> {
    let config = Config::from_env();
    let tools = FfmpegTools::new(&config.ffmpeg_path, &config.ffprobe_path)
        .context("resolve ffmpeg tools")?;

    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read glyph script '{}'", args.script.display()))?;

    let opts = EmbedOpts {
        title: args.title,
        source_extension: None,
    };
    embed_into_file(&tools, &args.in_path, &script, &opts, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
