pub mod audio;
mod error;
mod llm;
mod pipeline;
pub mod segmenter;
pub mod tracing;

pub use error::{
    ChunkingError, ExtractionError, FormattingError, PipelineError, TranscriptionError,
};
pub use llm::openai;
pub use llm::{
    formatter::{FormattedNote, NotesFormatter},
    transcriber::{TranscribeResponse, Transcriber},
};
pub use pipeline::{builder::NotesPipelineBuilder, NotesPipeline, PipelineReport};
