use serde::{Deserialize, Serialize};

/// Comment syntax used for the generated-file header and end-of-line
/// descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentStyle {
    /// `// …` line comments (SCSS, Swift).
    Short,
    /// `<!-- … -->` comments (Android resource XML).
    Xml,
}

impl CommentStyle {
    /// Wrap a single line in this comment style.
    pub fn line(&self, text: &str) -> String {
        match self {
            Self::Short => format!("// {text}"),
            Self::Xml => format!("<!-- {text} -->"),
        }
    }
}

/// Header block stamped at the top of every generated file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Lines identifying the generator (tool name/version, license).
    pub lines: Vec<String>,
    /// Generation timestamp, included only when the build enables it so
    /// repeated builds stay byte-identical by default.
    pub timestamp: Option<String>,
}

impl FileHeader {
    pub fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            timestamp: None,
        }
    }

    /// Render the header in the given comment style, one comment per line.
    pub fn render(&self, style: CommentStyle) -> String {
        let mut out: Vec<String> = Vec::with_capacity(self.lines.len() + 2);
        out.push(style.line("Do not edit directly, this file was auto-generated."));
        if let Some(ts) = &self.timestamp {
            out.push(style.line(&format!("Generated on {ts}")));
        }
        for line in &self.lines {
            out.push(style.line(line));
        }
        out.join("\n")
    }
}
