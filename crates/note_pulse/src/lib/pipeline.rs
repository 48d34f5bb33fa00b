pub mod builder;

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use tempfile::TempDir;

use crate::{
    audio,
    error::{FormattingError, PipelineError, TranscriptionError},
    pipeline::builder::{ChunkingConfig, SegmentingConfig},
    segmenter, NotesFormatter, Transcriber,
};

const TRANSCRIPT_FILE_NAME: &str = "transcription.txt";
const NOTES_FILE_NAME: &str = "formatted_notes.txt";

// The core chunked transcription-and-notes pipeline
#[derive(Debug)]
pub struct NotesPipeline<T, F>
where
    T: Transcriber + Send + Sync + 'static,
    F: NotesFormatter + Send + Sync + 'static,
{
    output_dir: PathBuf,
    scratch_root: Option<PathBuf>,
    transcriber: T,
    formatter: F,
    chunking: ChunkingConfig,
    segmenting: SegmentingConfig,
}

/// What a run produced: durable output paths plus the chunk/segment
/// bookkeeping the run went through.
#[derive(Debug)]
pub struct PipelineReport {
    pub transcript_path: PathBuf,
    pub notes_path: Option<PathBuf>,
    pub chunk_count: usize,
    pub segment_count: usize,
}

impl<T, F> NotesPipeline<T, F>
where
    T: Transcriber + Send + Sync + 'static,
    F: NotesFormatter + Send + Sync + 'static,
{
    /// Runs stages 1-3 only: extract, chunk, transcribe. The counterpart
    /// of the transcript-only mode of the pipeline.
    #[tracing::instrument(skip(self))]
    pub async fn transcribe_media(
        &self,
        media_path: &Path,
    ) -> Result<PipelineReport, PipelineError> {
        let scratch = Scratch::new(self.scratch_root.as_deref())?;

        let (transcript_path, chunk_count) =
            self.produce_transcript(media_path, scratch.path()).await?;

        Ok(PipelineReport {
            transcript_path,
            notes_path: None,
            chunk_count,
            segment_count: 0,
        })
    }

    /// Runs the full pipeline: extract, chunk, transcribe, segment, format.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, media_path: &Path) -> Result<PipelineReport, PipelineError> {
        let scratch = Scratch::new(self.scratch_root.as_deref())?;

        let (transcript_path, chunk_count) =
            self.produce_transcript(media_path, scratch.path()).await?;

        let transcript_text =
            std::fs::read_to_string(&transcript_path).map_err(FormattingError::Io)?;
        let segments = segmenter::split_transcript(&transcript_text, self.segmenting.char_budget);
        tracing::info!(segments = segments.len(), "Split transcript into segments");

        let notes_path = self.output_dir.join(NOTES_FILE_NAME);
        self.format_segments(&segments, &notes_path).await?;
        tracing::info!(notes = %notes_path.display(), "Formatted notes saved");

        Ok(PipelineReport {
            transcript_path,
            notes_path: Some(notes_path),
            chunk_count,
            segment_count: segments.len(),
        })
    }

    async fn produce_transcript(
        &self,
        media_path: &Path,
        scratch: &Path,
    ) -> Result<(PathBuf, usize), PipelineError> {
        std::fs::create_dir_all(&self.output_dir)?;

        let audio_path = scratch.join("audio.wav");
        audio::extract_audio(media_path, &audio_path)?;
        tracing::info!(audio = %audio_path.display(), "Extracted audio track");

        let chunks = audio::split_wav(
            &audio_path,
            &scratch.join("chunks"),
            self.chunking.chunk_duration_sec,
        )?;
        tracing::info!(chunks = chunks.len(), "Split audio into chunks");

        let transcript_path = self.output_dir.join(TRANSCRIPT_FILE_NAME);
        self.transcribe_chunks(&chunks, &transcript_path).await?;
        tracing::info!(transcript = %transcript_path.display(), "Transcription saved");

        Ok((transcript_path, chunks.len()))
    }

    /// Transcribes chunks strictly in order, one line per chunk. Each line
    /// is synced to disk as it lands so a mid-run crash keeps the lines
    /// already transcribed.
    #[tracing::instrument(skip_all)]
    async fn transcribe_chunks(
        &self,
        chunks: &[PathBuf],
        transcript_path: &Path,
    ) -> Result<(), TranscriptionError> {
        let mut transcript = File::create(transcript_path)?;

        for (index, chunk) in chunks.iter().enumerate() {
            tracing::info!(chunk = index + 1, total = chunks.len(), "Transcribing chunk");
            let response = self
                .transcriber
                .transcribe(chunk)
                .await
                .map_err(|e| TranscriptionError::Service(format!("{e:?}")))?;

            transcript.write_all(response.text.as_bytes())?;
            transcript.write_all(b"\n")?;
            transcript.sync_data()?;
        }

        Ok(())
    }

    /// Formats segments strictly in order. Unlike the transcript, notes
    /// are buffered and written in one shot at the end of the stage.
    #[tracing::instrument(skip_all)]
    async fn format_segments(
        &self,
        segments: &[String],
        notes_path: &Path,
    ) -> Result<(), FormattingError> {
        let mut notes = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            tracing::info!(
                segment = index + 1,
                total = segments.len(),
                "Formatting segment"
            );
            let note = self
                .formatter
                .format_notes(segment)
                .await
                .map_err(|e| FormattingError::Service(format!("{e:?}")))?;
            notes.push(note.content);
        }

        std::fs::write(notes_path, notes.iter().join("\n\n"))?;
        Ok(())
    }
}

/// Per-run scratch space for the intermediate audio artifacts. The
/// directory name is unique per run, so concurrent pipelines sharing a
/// scratch root never collide on chunk files.
struct Scratch {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Scratch {
    fn new(root: Option<&Path>) -> std::io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("note-pulse-");

        let dir = match root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        let path = dir.path().to_path_buf();

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(e) = dir.close() {
                tracing::warn!(error = ?e, path = ?self.path, "Failed to clean up scratch directory");
            } else {
                tracing::info!(path = ?self.path, "Cleaned up scratch directory");
            }
        }
    }
}
