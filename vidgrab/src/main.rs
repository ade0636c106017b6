mod render;
mod resolver;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidgrab_engine::{
    format_bytes, Artifact, ArtifactSink, CancelToken, Endpoints, Format, FormatKind,
    Orchestrator, Session, TransferEngine, TransferOutcome,
};

use resolver::Resolver;

/// Resolve a video's renditions and download one, or a muxed video+audio
/// pair, through a vidgrab helper server.
#[derive(Debug, Parser)]
#[command(name = "vidgrab", version, about)]
struct Cli {
    /// Source video URL
    url: String,

    /// Helper server base URL
    #[arg(long, env = "VIDGRAB_SERVER", default_value = "http://localhost:14032")]
    server: String,

    /// Index of the rendition to download (as shown in the listing)
    #[arg(long, conflicts_with_all = ["video", "audio"])]
    format: Option<usize>,

    /// Video rendition index for a combined download
    #[arg(long, requires = "audio")]
    video: Option<usize>,

    /// Audio rendition index for a combined download
    #[arg(long, requires = "video")]
    audio: Option<usize>,

    /// Only list the available renditions
    #[arg(long)]
    list: bool,

    /// Output directory for the downloaded artifact
    #[arg(long, short, default_value = ".")]
    output: PathBuf,

    /// Artifact base name (defaults to the resolved title)
    #[arg(long)]
    name: Option<String>,

    /// Hide renditions without a codec from the listing
    #[arg(long)]
    hide_no_codec: bool,
}

struct DirectorySink {
    dir: PathBuf,
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, artifact: &Artifact) -> io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.data)?;
        Ok(path)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidgrab=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let resolver = Resolver::new(&cli.server);
    let info = resolver
        .resolve(&cli.url)
        .await
        .context("failed to resolve formats")?;
    let title = info.title.unwrap_or_else(|| "download".to_string());

    // Listing order: largest rendition first.
    let mut formats = info.formats;
    formats.sort_by(|a, b| b.filesize.unwrap_or(0).cmp(&a.filesize.unwrap_or(0)));
    if cli.hide_no_codec {
        formats.retain(Format::has_codec);
    }

    if cli.list || (cli.format.is_none() && cli.video.is_none()) {
        render::format_listing(&title, &formats);
        return Ok(());
    }

    let base_name = cli.name.unwrap_or(title);
    let mut session = Session::new(cli.url.clone(), base_name);

    let orchestrator = Orchestrator::new(
        TransferEngine::new(),
        Endpoints::from_base(&cli.server),
        DirectorySink {
            dir: cli.output.clone(),
        },
    );

    let cancel = CancelToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("cancellation requested");
            ctrl_c.cancel();
        }
    });

    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(render::progress_bar(progress_rx));

    let outcome = if let Some(index) = cli.format {
        let format = pick(&formats, index)?.clone();
        let file_name = format!("{}.{}", session.title(), format.extension);
        orchestrator
            .start_single(&session, &format, &file_name, cancel, progress_tx)
            .await?
    } else {
        let (Some(video_index), Some(audio_index)) = (cli.video, cli.audio) else {
            anyhow::bail!("pick a rendition with --format, or --video together with --audio");
        };
        session.select(FormatKind::Video, pick(&formats, video_index)?.clone())?;
        session.select(FormatKind::Audio, pick(&formats, audio_index)?.clone())?;
        orchestrator
            .start_combine(&session, None, cancel, progress_tx)
            .await?
    };

    reporter.await?;

    match outcome {
        TransferOutcome::Completed(artifact) => {
            println!(
                "saved {} ({})",
                artifact.file_name,
                format_bytes(artifact.data.len() as u64)
            );
            Ok(())
        }
        TransferOutcome::Cancelled => {
            println!("download cancelled");
            Ok(())
        }
        TransferOutcome::Failed(failure) => Err(failure.into()),
    }
}

fn pick(formats: &[Format], index: usize) -> anyhow::Result<&Format> {
    formats
        .get(index)
        .with_context(|| format!("no rendition with index {index}"))
}
