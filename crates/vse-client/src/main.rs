use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use vse_client::{copy_selected, ApiClient, FormState, Orchestrator, DEFAULT_API_URL};
use vse_models::{media_type_for_filename, VideoAsset, MAX_SCRIPT_CLIPS, MAX_VIDEOS};

#[derive(Parser)]
#[command(name = "vse", version)]
#[command(about = "Turn short videos into viral marketing scripts")]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "VSE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the backend is up
    Health,

    /// Transcribe up to three videos
    Transcribe {
        /// Gemini API key used for the transcription calls
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        gemini_key: String,

        /// Video file (repeat for up to three)
        #[arg(long = "video", required = true)]
        videos: Vec<PathBuf>,
    },

    /// Write both script variations from clip transcripts
    Scripts {
        /// Clip transcript (repeat, two or three)
        #[arg(long = "clip", required = true)]
        clips: Vec<String>,

        #[command(flatten)]
        output: ScriptOutput,
    },

    /// Transcribe videos, then write both script variations
    Run {
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        gemini_key: String,

        #[arg(long = "video", required = true)]
        videos: Vec<PathBuf>,

        #[command(flatten)]
        output: ScriptOutput,
    },
}

#[derive(clap::Args)]
struct ScriptOutput {
    /// Product URL or name to sell
    #[arg(long)]
    product: String,

    /// Variation to copy: 0 = Your Vision, 1 = AI Optimized
    #[arg(long, default_value_t = 0)]
    select: usize,

    /// Write the selected script here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", style("✗").red().bold(), message);
    std::process::exit(1);
}

async fn load_video(path: &Path) -> Result<VideoAsset> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());
    let media_type = media_type_for_filename(&filename);

    Ok(VideoAsset::new(data, Some(media_type), filename))
}

async fn load_videos(mut state: FormState, paths: &[PathBuf]) -> Result<FormState> {
    if paths.len() > MAX_VIDEOS {
        bail!("At most {} videos may be uploaded", MAX_VIDEOS);
    }

    for (slot, path) in paths.iter().enumerate() {
        state = state.with_video(slot, load_video(path).await?);
    }
    Ok(state)
}

async fn transcribe(orchestrator: &Orchestrator, state: FormState) -> FormState {
    let count = state.selected_videos().len();
    let spinner = create_spinner(&format!("Processing {} video(s)...", count));
    let state = orchestrator.process_videos(state).await;

    match &state.error {
        Some(error) => {
            spinner.finish_and_clear();
            fail(error);
        }
        None => spinner.finish_with_message(format!(
            "{} {}",
            style("✓").green().bold(),
            state.notice.as_deref().unwrap_or_default()
        )),
    }

    for (i, clip) in state.clips.iter().enumerate().filter(|(_, c)| !c.is_empty()) {
        println!("\n{}\n{}", style(format!("Clip {}", i + 1)).cyan().bold(), clip);
    }

    state
}

async fn write_scripts(
    orchestrator: &Orchestrator,
    state: FormState,
    output: &ScriptOutput,
) -> Result<()> {
    let state = state.with_product_link(output.product.clone());

    let spinner = create_spinner("Generating script variations...");
    let state = orchestrator.generate_scripts(state).await;

    if let Some(error) = &state.error {
        spinner.finish_and_clear();
        fail(error);
    }
    spinner.finish_with_message(format!("{} Scripts generated", style("✓").green().bold()));

    let state = state.select_variation(output.select);
    for (i, variation) in state.scripts.iter().flatten().enumerate() {
        let marker = if i == state.selected_variation { "▶" } else { " " };
        eprintln!(
            "{} {} {}",
            style(marker).yellow(),
            style(variation.mode.label()).bold(),
            style(variation.mode.description()).dim()
        );
    }

    let Some(script) = copy_selected(&state) else {
        fail("No script was generated");
    };

    match &output.out {
        Some(path) => {
            tokio::fs::write(path, &script)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Script saved to {}",
                style("✓").green().bold(),
                style(path.display()).dim()
            );
        }
        None => println!("\n{}", script),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let orchestrator = Orchestrator::new(ApiClient::new(cli.api_url.clone())?);

    eprintln!(
        "\n{}  {}\n",
        style("vse").cyan().bold(),
        style("Viral Script Engine").dim()
    );

    match cli.command {
        Command::Health => {
            let api = orchestrator.api();
            let health = api
                .health()
                .await
                .with_context(|| format!("Backend at {} is unreachable", api.base_url()))?;
            println!(
                "{} {} v{}",
                style("✓").green().bold(),
                health.status,
                health.version
            );
        }
        Command::Transcribe { gemini_key, videos } => {
            let state = load_videos(FormState::new().with_api_key(gemini_key), &videos).await?;
            transcribe(&orchestrator, state).await;
        }
        Command::Scripts { clips, output } => {
            if clips.len() > MAX_SCRIPT_CLIPS {
                bail!("At most {} clips may be supplied", MAX_SCRIPT_CLIPS);
            }
            let state = clips
                .into_iter()
                .enumerate()
                .fold(FormState::new(), |state, (slot, clip)| state.with_clip(slot, clip));
            write_scripts(&orchestrator, state, &output).await?;
        }
        Command::Run {
            gemini_key,
            videos,
            output,
        } => {
            let state = load_videos(FormState::new().with_api_key(gemini_key), &videos).await?;
            let state = transcribe(&orchestrator, state).await;
            write_scripts(&orchestrator, state, &output).await?;
        }
    }

    Ok(())
}
