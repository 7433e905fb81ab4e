//! Error types shared by the lexer, parser, evaluator, and cron bridge.

use std::fmt;

use thiserror::Error;

/// Half-open byte range `[start, end)` into the source expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span, used for errors at end of input.
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Machine-readable category of a [`ScheduleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lex,
    Parse,
    Eval,
    Cron,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lex => "lex",
            Self::Parse => "parse",
            Self::Eval => "eval",
            Self::Cron => "cron",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All errors produced by hron.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScheduleError {
    /// Bad character, unknown keyword, malformed time or timezone.
    #[error("{message}")]
    Lex {
        message: String,
        span: Span,
        input: String,
        suggestion: Option<String>,
    },

    /// Grammar violation, invalid calendar date, leftover input.
    #[error("{message}")]
    Parse {
        message: String,
        span: Span,
        input: String,
        suggestion: Option<String>,
    },

    /// Evaluation could not proceed, e.g. the timezone is not in the tz database.
    #[error("{message}")]
    Eval { message: String },

    /// Schedule shape has no cron equivalent, or a cron field is malformed.
    #[error("{message}")]
    Cron { message: String },
}

/// Result type for hron operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

impl ScheduleError {
    #[must_use]
    pub fn lex(message: impl Into<String>, span: Span, input: &str) -> Self {
        Self::Lex {
            message: message.into(),
            span,
            input: input.to_string(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn parse(message: impl Into<String>, span: Span, input: &str) -> Self {
        Self::Parse {
            message: message.into(),
            span,
            input: input.to_string(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn cron(message: impl Into<String>) -> Self {
        Self::Cron {
            message: message.into(),
        }
    }

    /// Attaches a suggested replacement. No-op for errors without a source span.
    #[must_use]
    pub fn with_suggestion(mut self, fix: impl Into<String>) -> Self {
        match &mut self {
            Self::Lex { suggestion, .. } | Self::Parse { suggestion, .. } => {
                *suggestion = Some(fix.into());
            }
            Self::Eval { .. } | Self::Cron { .. } => {}
        }
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex { .. } => ErrorKind::Lex,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Eval { .. } => ErrorKind::Eval,
            Self::Cron { .. } => ErrorKind::Cron,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Lex { message, .. }
            | Self::Parse { message, .. }
            | Self::Eval { message }
            | Self::Cron { message } => message,
        }
    }

    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Lex { span, .. } | Self::Parse { span, .. } => Some(*span),
            Self::Eval { .. } | Self::Cron { .. } => None,
        }
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Lex { suggestion, .. } | Self::Parse { suggestion, .. } => {
                suggestion.as_deref()
            }
            Self::Eval { .. } | Self::Cron { .. } => None,
        }
    }

    /// ## Summary
    /// Renders the error with the source line and a caret underline beneath the
    /// offending span, followed by the suggestion when one is present.
    ///
    /// ```text
    /// error: unknown keyword 'mondy'
    ///   every mondy at 09:00
    ///         ^^^^^ try: "monday"
    /// ```
    #[must_use]
    pub fn display_rich(&self) -> String {
        match self {
            Self::Lex {
                message,
                span,
                input,
                suggestion,
            }
            | Self::Parse {
                message,
                span,
                input,
                suggestion,
            } => {
                // Columns are characters, spans are bytes.
                let column = input.get(..span.start).map_or(span.start, |s| s.chars().count());
                let width = input
                    .get(span.start..span.end)
                    .map_or(span.len(), |s| s.chars().count());
                let padding = " ".repeat(column + 2);
                let underline = "^".repeat(width.max(1));
                let mut out = format!("error: {message}\n  {input}\n{padding}{underline}");
                if let Some(fix) = suggestion {
                    out.push_str(" try: \"");
                    out.push_str(fix);
                    out.push('"');
                }
                out
            }
            Self::Eval { message } | Self::Cron { message } => format!("error: {message}"),
        }
    }
}
