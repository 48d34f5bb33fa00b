use std::sync::{Arc, Mutex};

use note_pulse::{FormattedNote, NotesFormatter};

#[derive(Clone)]
pub struct MockNotesFormatter {
    pub note: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockNotesFormatter {
    pub fn new(note: &str) -> Self {
        Self {
            note: note.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            note: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl NotesFormatter for MockNotesFormatter {
    const FORMATTER_MODEL: &'static str = "mock-gpt";

    type Error = anyhow::Error;

    async fn format_notes(&self, segment: &str) -> Result<FormattedNote, Self::Error> {
        self.calls.lock().unwrap().push(segment.to_string());

        if let Some(ref msg) = self.fail_with {
            anyhow::bail!("{}", msg);
        }

        Ok(FormattedNote {
            content: self.note.clone(),
        })
    }
}
