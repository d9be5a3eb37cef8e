//! Indentation-aware line buffer used by the dialects.

/// Accumulates lines of one artifact.
///
/// # Examples
///
/// ```
/// use apigen_codegen::writer::CodeWriter;
///
/// let mut writer = CodeWriter::new(2, 40);
/// writer.line("routes.get = function (arg) {");
/// writer.indented(|w| w.line("return arg;"));
/// writer.line("};");
///
/// assert_eq!(writer.lines()[1], "  return arg;");
/// ```
#[derive(Debug, Clone)]
pub struct CodeWriter {
    lines: Vec<String>,
    level: usize,
    indent: usize,
    wrap_width: usize,
}

impl CodeWriter {
    /// Creates a writer indenting by `indent` spaces per level and wrapping
    /// text at `wrap_width` columns.
    #[must_use]
    pub const fn new(indent: usize, wrap_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            level: 0,
            indent,
            wrap_width,
        }
    }

    fn margin(&self) -> String {
        " ".repeat(self.level * self.indent)
    }

    /// Emits one line at the current indentation. Empty text emits an empty
    /// line without trailing whitespace.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{text}", self.margin()));
        }
    }

    /// Emits an empty line.
    pub fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Emits pre-formatted text verbatim, one line per input line.
    pub fn raw(&mut self, text: &str) {
        self.lines
            .extend(text.lines().map(|line| line.trim_end().to_string()));
    }

    /// Runs `body` one indentation level deeper.
    pub fn indented<T>(&mut self, body: impl FnOnce(&mut Self) -> T) -> T {
        self.level += 1;
        let result = body(self);
        self.level -= 1;
        result
    }

    /// Emits `text` wrapped to the writer's width, every line starting with
    /// `prefix` at the current indentation.
    ///
    /// Blank lines in `text` are kept as paragraph breaks.
    pub fn wrapped(&mut self, text: &str, prefix: &str) {
        let lead = format!("{}{prefix}", self.margin());
        let width = self.wrap_width.max(lead.len() + 1);
        let options = textwrap::Options::new(width)
            .initial_indent(&lead)
            .subsequent_indent(&lead);

        for paragraph in text.lines() {
            if paragraph.trim().is_empty() {
                self.lines.push(lead.trim_end().to_string());
                continue;
            }
            self.lines.extend(
                textwrap::wrap(paragraph.trim(), &options)
                    .into_iter()
                    .map(|line| line.trim_end().to_string()),
            );
        }
    }

    /// The lines emitted so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the writer, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
