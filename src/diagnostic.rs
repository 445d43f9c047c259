use std::fmt;

/// A source span representing a range of bytes in an input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A label pointing to a specific span in the input line
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

/// A complete diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<String>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.notes.push(format!("help: {}", help.into()));
        self
    }
}

/// Computes the 1-based column of a byte offset in a single-line source.
pub fn column_at(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())].chars().count() + 1
}

/// Diagnostic renderer for Rust-like error output.
///
/// The engine consumes one line of input at a time, so the renderer deals
/// only in columns; there is no line-number bookkeeping.
pub struct DiagnosticRenderer<'a> {
    source: &'a str,
    source_name: &'a str,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a str, source_name: &'a str, use_color: bool) -> Self {
        Self {
            source,
            source_name,
            use_color,
        }
    }

    /// Render a diagnostic to a string
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        self.render_header(&mut output, diagnostic);

        let spanned: Vec<&Label> = diagnostic
            .labels
            .iter()
            .filter(|label| !label.span.is_dummy())
            .collect();

        if !spanned.is_empty() {
            let first = spanned[0];
            let col = column_at(self.source, first.span.start);
            output.push_str(&format!(
                "  {} {}:{}\n",
                self.style_blue("-->"),
                self.source_name,
                col
            ));
            output.push_str(&format!("   {}\n", self.style_blue("|")));
            output.push_str(&format!("   {} {}\n", self.style_blue("|"), self.source));

            for label in &spanned {
                self.render_underline(&mut output, label);
            }

            output.push_str(&format!("   {}\n", self.style_blue("|")));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  {} {}\n", self.style_blue("="), note));
        }

        output
    }

    fn render_header(&self, output: &mut String, diagnostic: &Diagnostic) {
        let severity_str = match diagnostic.severity {
            Severity::Error => self.style_red_bold("error"),
            Severity::Warning => self.style_yellow_bold("warning"),
        };

        if let Some(code) = &diagnostic.code {
            output.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                code,
                self.style_bold(&diagnostic.message)
            ));
        } else {
            output.push_str(&format!(
                "{}: {}\n",
                severity_str,
                self.style_bold(&diagnostic.message)
            ));
        }
    }

    fn render_underline(&self, output: &mut String, label: &Label) {
        let col_start = column_at(self.source, label.span.start);
        let col_end = column_at(self.source, label.span.end).max(col_start + 1);

        let mut underline = String::new();
        underline.push_str(&" ".repeat(col_start - 1));
        underline.push_str(&"^".repeat(col_end - col_start));

        output.push_str(&format!(
            "   {} {}",
            self.style_blue("|"),
            self.style_red(&underline)
        ));
        if !label.message.is_empty() {
            output.push(' ');
            output.push_str(&self.style_red(&label.message));
        }
        output.push('\n');
    }

    // Color helpers
    fn style_red(&self, s: &str) -> String {
        if self.use_color {
            format!("\x1b[31m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }

    fn style_red_bold(&self, s: &str) -> String {
        if self.use_color {
            format!("\x1b[1;31m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }

    fn style_yellow_bold(&self, s: &str) -> String {
        if self.use_color {
            format!("\x1b[1;33m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }

    fn style_blue(&self, s: &str) -> String {
        if self.use_color {
            format!("\x1b[34m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }

    fn style_bold(&self, s: &str) -> String {
        if self.use_color {
            format!("\x1b[1m{}\x1b[0m", s)
        } else {
            s.to_string()
        }
    }
}

/// Render multiple diagnostics against one input line
pub fn render_diagnostics(
    source: &str,
    source_name: &str,
    diagnostics: &[Diagnostic],
    use_color: bool,
) -> String {
    let renderer = DiagnosticRenderer::new(source, source_name, use_color);
    let mut output = String::new();

    for diagnostic in diagnostics {
        output.push_str(&renderer.render(diagnostic));
    }

    output
}
