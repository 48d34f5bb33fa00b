use std::path::PathBuf;

use crate::{audio, segmenter, NotesFormatter, NotesPipeline, Transcriber};

#[derive(Debug)]
pub struct ChunkingConfig {
    pub chunk_duration_sec: u16,
}

#[derive(Debug)]
pub struct SegmentingConfig {
    pub char_budget: usize,
}

pub struct NotesPipelineBuilder<T = (), F = ()> {
    output_dir: PathBuf,
    scratch_root: Option<PathBuf>,
    transcriber: T,
    formatter: F,
    chunking: ChunkingConfig,
    segmenting: SegmentingConfig,
}

impl NotesPipelineBuilder {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            scratch_root: None,
            transcriber: (),
            formatter: (),
            chunking: ChunkingConfig {
                chunk_duration_sec: audio::DEFAULT_CHUNK_DURATION_SEC,
            },
            segmenting: SegmentingConfig {
                char_budget: segmenter::DEFAULT_CHAR_BUDGET,
            },
        }
    }
}

impl<T, F> NotesPipelineBuilder<T, F> {
    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> NotesPipelineBuilder<T2, F> {
        NotesPipelineBuilder {
            output_dir: self.output_dir,
            scratch_root: self.scratch_root,
            transcriber,
            formatter: self.formatter,
            chunking: self.chunking,
            segmenting: self.segmenting,
        }
    }

    pub fn formatter<F2: NotesFormatter + Send + Sync + 'static>(
        self,
        formatter: F2,
    ) -> NotesPipelineBuilder<T, F2> {
        NotesPipelineBuilder {
            output_dir: self.output_dir,
            scratch_root: self.scratch_root,
            transcriber: self.transcriber,
            formatter,
            chunking: self.chunking,
            segmenting: self.segmenting,
        }
    }

    /// Parent directory for the per-run scratch directories. Defaults to
    /// the system temp directory.
    pub fn scratch_root(mut self, scratch_root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(scratch_root.into());
        self
    }

    pub fn chunk_duration(mut self, chunk_duration_sec: u16) -> Self {
        self.chunking = ChunkingConfig { chunk_duration_sec };
        self
    }

    pub fn segment_budget(mut self, char_budget: usize) -> Self {
        self.segmenting = SegmentingConfig { char_budget };
        self
    }
}

impl<T, F> NotesPipelineBuilder<T, F>
where
    T: Transcriber + Send + Sync + 'static,
    F: NotesFormatter + Send + Sync + 'static,
{
    pub fn build(self) -> NotesPipeline<T, F> {
        NotesPipeline {
            output_dir: self.output_dir,
            scratch_root: self.scratch_root,
            transcriber: self.transcriber,
            formatter: self.formatter,
            chunking: self.chunking,
            segmenting: self.segmenting,
        }
    }
}
