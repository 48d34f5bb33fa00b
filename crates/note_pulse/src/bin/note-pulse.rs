use std::path::PathBuf;

use clap::{Parser, Subcommand};
use note_pulse::{
    audio, openai::OpenAIClient, segmenter, tracing::init_tracing_subscriber, NotesPipelineBuilder,
    PipelineReport,
};

#[derive(Parser)]
#[command(
    name = "note-pulse",
    about = "Chunked long-media transcription and study-notes pipeline"
)]
struct Cli {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_key: String,

    /// Audio chunk duration in seconds
    #[arg(long, default_value_t = audio::DEFAULT_CHUNK_DURATION_SEC)]
    chunk_duration: u16,

    /// Character budget per transcript segment sent for formatting
    #[arg(long, default_value_t = segmenter::DEFAULT_CHAR_BUDGET)]
    segment_budget: usize,

    /// Directory the transcript and notes files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract, chunk and transcribe the media file
    Transcribe {
        /// Path to the input media file
        media: PathBuf,
    },
    /// Transcribe and format the transcript into study notes
    Notes {
        /// Path to the input media file
        media: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    //XXX: handles both transcription and note formatting; hence cloned
    let openai = OpenAIClient::new(&cli.openai_key);

    let pipeline = NotesPipelineBuilder::new(&cli.output_dir)
        .transcriber(openai.clone())
        .formatter(openai)
        .chunk_duration(cli.chunk_duration)
        .segment_budget(cli.segment_budget)
        .build();

    let report = match cli.command {
        Command::Transcribe { media } => {
            anyhow::ensure!(media.exists(), "media file not found: {}", media.display());
            tracing::info!(media = %media.display(), "Transcribing media...");
            pipeline.transcribe_media(&media).await?
        }
        Command::Notes { media } => {
            anyhow::ensure!(media.exists(), "media file not found: {}", media.display());
            tracing::info!(media = %media.display(), "Running full notes pipeline...");
            pipeline.run(&media).await?
        }
    };

    report_outcome(&report);

    Ok(())
}

fn report_outcome(report: &PipelineReport) {
    tracing::info!(
        transcript = %report.transcript_path.display(),
        chunks = report.chunk_count,
        "Transcript written"
    );
    if let Some(notes_path) = &report.notes_path {
        tracing::info!(
            notes = %notes_path.display(),
            segments = report.segment_count,
            "Formatted notes written"
        );
    }
}
