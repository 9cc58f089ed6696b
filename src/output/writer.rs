// Mon Oct 19 2026 - Alex

/// Line-oriented text buffer with block indentation.
pub struct SourceWriter {
    buffer: String,
    indent_level: usize,
    indent_width: usize,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> Self {
        Self::with_level(indent_width, 0)
    }

    pub fn with_level(indent_width: usize, indent_level: usize) -> Self {
        Self {
            buffer: String::new(),
            indent_level,
            indent_width,
        }
    }

    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent_level * self.indent_width {
                self.buffer.push(' ');
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    pub fn blank(&mut self) {
        self.buffer.push('\n');
    }

    /// Writes `header {` and indents what follows.
    pub fn open(&mut self, header: &str) {
        self.line(&format!("{} {{", header));
        self.indent_level += 1;
    }

    pub fn close(&mut self) {
        self.close_with("}");
    }

    pub fn close_with(&mut self, closer: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line(closer);
    }

    /// Appends pre-rendered text verbatim.
    pub fn raw(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}
