use crate::message::{Message, Sender};

/// Where the controller puts rendered entries.
pub trait TranscriptSink: Send {
    fn render(&mut self, text: &str, sender: Sender);
}

/// The visible conversation log. Append-only; the scroll anchor follows the
/// newest entry whenever something is rendered.
#[derive(Debug, Default)]
pub struct ChatLog {
    entries: Vec<Message>,
    scroll_anchor: usize,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Message] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry the view keeps in sight.
    pub fn scroll_anchor(&self) -> usize {
        self.scroll_anchor
    }

    pub fn is_at_latest(&self) -> bool {
        self.entries.is_empty() || self.scroll_anchor + 1 == self.entries.len()
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_anchor > 0 {
            self.scroll_anchor -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_anchor + 1 < self.entries.len() {
            self.scroll_anchor += 1;
        }
    }

    fn scroll_to_latest(&mut self) {
        self.scroll_anchor = self.entries.len().saturating_sub(1);
    }
}

impl TranscriptSink for ChatLog {
    fn render(&mut self, text: &str, sender: Sender) {
        self.entries.push(Message::new(text, sender));
        self.scroll_to_latest();
    }
}
