//! Display lines fed to the playback engine.

/// Presentation category of a boot line.
///
/// The engine never inspects it; hosts use it to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Ok,
    Warning,
    Error,
    Info,
    #[default]
    Plain,
}

impl Category {
    /// Short lowercase name (used in logs and headless output).
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ok => "ok",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Info => "info",
            Category::Plain => "plain",
        }
    }
}

/// One immutable line of boot output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub category: Category,
}

impl DisplayLine {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Category::Plain)
    }

    /// Blank spacer line.
    pub fn blank() -> Self {
        Self::plain("")
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
