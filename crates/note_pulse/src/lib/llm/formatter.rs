use std::{fmt::Debug, future::Future};

/// Chat-completion service boundary for turning one transcript segment
/// into formatted study notes.
pub trait NotesFormatter {
    const FORMATTER_MODEL: &'static str;

    type Error: Debug;

    fn format_notes(
        &self,
        segment: &str,
    ) -> impl Future<Output = Result<FormattedNote, Self::Error>> + Send;
}

#[derive(Debug)]
pub struct FormattedNote {
    pub content: String,
}
