use unicode_width::UnicodeWidthStr;

/// The read/clear surface the submission controller needs from an input field.
pub trait InputSource: Send {
    fn value(&self) -> &str;
    fn clear(&mut self);
}

/// Single-line editable text buffer.
#[derive(Debug, Default)]
pub struct InputField {
    buffer: String,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Terminal columns taken by the current text.
    pub fn display_width(&self) -> u16 {
        u16::try_from(self.buffer.width()).unwrap_or(u16::MAX)
    }
}

impl InputSource for InputField {
    fn value(&self) -> &str {
        &self.buffer
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut field = InputField::new();
        for c in "hey".chars() {
            field.push(c);
        }
        field.backspace();
        assert_eq!(field.value(), "he");
        field.clear();
        assert!(field.is_empty());
        field.backspace();
        assert!(field.is_empty());
    }

    #[test]
    fn test_display_width_counts_columns() {
        let mut field = InputField::new();
        field.set("hi 👋");
        assert_eq!(field.display_width(), 5);
    }

    #[test]
    fn test_display_width_saturates() {
        let mut field = InputField::new();
        field.set("a".repeat(70_000));
        assert_eq!(field.display_width(), u16::MAX);
    }
}
