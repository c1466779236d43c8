const MAX_CODE_LEN: usize = 32;

/// Edit buffer behind the presentation code field on the stage screen.
pub struct CodeInput {
    pub buffer: String,
    cursor_position: usize,
}

impl Default for CodeInput {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeInput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_position: 0,
        }
    }

    /// Returns false when the character is not accepted into a code.
    pub fn handle_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return false;
        }
        if self.buffer.len() >= MAX_CODE_LEN {
            return false;
        }

        self.buffer.push(c);
        self.cursor_position = self.buffer.len();
        true
    }

    pub fn handle_backspace(&mut self) -> bool {
        if self.buffer.pop().is_some() {
            self.cursor_position = self.buffer.len();
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor_position = 0;
    }

    /// Replaces the buffer when it no longer mirrors `code`.
    pub fn sync(&mut self, code: &str) {
        if self.buffer != code {
            self.buffer = code.to_string();
            self.cursor_position = self.buffer.len();
        }
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }
}
