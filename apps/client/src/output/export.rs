//! Download conversion: Markdown file, word-processor document, single-page PDF.
//!
//! Conversion itself is delegated to `docx-rs` and `printpdf`; this module
//! only lays the raw result text out for them.

use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use docx_rs::{Docx, Paragraph, Run};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::info;

use crate::errors::ClientError;
use crate::views::tabs::TabId;

// A4 portrait, fixed top margin, text flows downward until the bottom margin.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 5.0;
/// Rough Helvetica 11pt capacity of the 170 mm text column.
const MAX_LINE_CHARS: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Docx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Markdown, ExportFormat::Docx, ExportFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "docx" | "word" => Ok(ExportFormat::Docx),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ClientError::validation(format!(
                "Unknown download format '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Writes the file into `dir` and returns its path.
    pub async fn save_in(&self, dir: &Path) -> Result<PathBuf, ClientError> {
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes)
            .await
            .map_err(|e| ClientError::Export(format!("{}: {e}", path.display())))?;
        info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

pub fn export(tab: TabId, text: &str, format: ExportFormat) -> Result<ExportedFile, ClientError> {
    let bytes = match format {
        ExportFormat::Markdown => text.as_bytes().to_vec(),
        ExportFormat::Docx => to_docx(text)?,
        ExportFormat::Pdf => to_pdf(tab, text)?,
    };

    Ok(ExportedFile {
        file_name: format!("{}-result.{}", tab.as_str(), format.extension()),
        mime: format.mime(),
        bytes,
    })
}

fn to_docx(text: &str) -> Result<Vec<u8>, ClientError> {
    let docx = text.lines().fold(Docx::new(), |docx, line| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)))
    });

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ClientError::Export(e.to_string()))?;
    Ok(buf.into_inner())
}

fn to_pdf(tab: TabId, text: &str) -> Result<Vec<u8>, ClientError> {
    let title = format!("{} Result", tab.descriptor().label);
    let (doc, page, layer) =
        PdfDocument::new(title.as_str(), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ClientError::Export(e.to_string()))?;
    let layer = doc.get_page(page).get_layer(layer);

    let lines = layout_lines(text);
    for (i, line) in lines.iter().take(lines_per_page()).enumerate() {
        let y = PAGE_HEIGHT_MM - MARGIN_MM - i as f32 * LINE_HEIGHT_MM;
        layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
    }

    doc.save_to_bytes()
        .map_err(|e| ClientError::Export(e.to_string()))
}

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize
}

/// Splits the raw text into printable lines, wrapping on whitespace. Words
/// longer than a line (URLs, hashes) are cut at the line width.
fn layout_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for source in text.lines() {
        if source.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in source.split_whitespace().flat_map(line_sized_chunks) {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > MAX_LINE_CHARS && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    lines
}

fn line_sized_chunks(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(MAX_LINE_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Ada Lovelace\n\n## Experience\n- Wrote the first program";

    #[test]
    fn test_markdown_export_is_raw_text() {
        let file = export(TabId::Generate, SAMPLE, ExportFormat::Markdown).unwrap();
        assert_eq!(file.file_name, "generate-result.md");
        assert_eq!(file.mime, "text/markdown");
        assert_eq!(file.bytes, SAMPLE.as_bytes());
    }

    #[test]
    fn test_docx_export_is_a_zip_package() {
        let file = export(TabId::CoverLetter, SAMPLE, ExportFormat::Docx).unwrap();
        assert_eq!(file.file_name, "cover-letter-result.docx");
        assert!(file.bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_pdf_export_has_pdf_header() {
        let file = export(TabId::Score, SAMPLE, ExportFormat::Pdf).unwrap();
        assert_eq!(file.mime, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_lines_wrap_on_whitespace() {
        let long = "word ".repeat(60);
        let lines = layout_lines(&long);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= MAX_LINE_CHARS));
        assert_eq!(lines.join(" ").split_whitespace().count(), 60);
    }

    #[test]
    fn test_overlong_word_is_cut_at_line_width() {
        let url = format!("https://example.com/{}", "a".repeat(150));
        let lines = layout_lines(&format!("See {url} now"));
        assert!(lines.iter().all(|l| l.chars().count() <= MAX_LINE_CHARS));
        assert_eq!(lines.concat().replace(' ', ""), format!("See{url}now"));
        assert_eq!(lines[0], "See");
        assert_eq!(lines[1].chars().count(), MAX_LINE_CHARS);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        assert_eq!(layout_lines("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("odt".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn test_save_in_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = export(TabId::Linkedin, "About me", ExportFormat::Markdown).unwrap();
        let path = file.save_in(dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "linkedin-result.md");
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "About me");
    }
}
