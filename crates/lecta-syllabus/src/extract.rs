//! Text extraction from uploaded syllabus documents.
//!
//! PDFs go through the poppler `pdftotext` tool as a subprocess; DOCX
//! files are zip archives whose `word/document.xml` carries the text in
//! `<w:t>` runs.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{SyllabusError, SyllabusResult};

// `<w:t>` or `<w:t xml:space="...">`, but never `<w:tab/>`
static TEXT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>").expect("valid regex"));

/// Extract plain text from a syllabus document, dispatching on extension.
pub async fn extract_text(path: &Path) -> SyllabusResult<String> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => extract_pdf(path).await?,
        "docx" => extract_docx(path.to_path_buf()).await?,
        other => return Err(SyllabusError::UnsupportedFormat(other.to_string())),
    };

    if text.trim().is_empty() {
        return Err(SyllabusError::EmptyDocument);
    }

    info!(
        "Extracted {} chars of syllabus text from {}",
        text.len(),
        path.display()
    );
    Ok(text)
}

/// Run `pdftotext <file> -` and capture stdout.
async fn extract_pdf(path: &Path) -> SyllabusResult<String> {
    debug!("Running pdftotext on {}", path.display());

    let output = tokio::process::Command::new("pdftotext")
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .await
        .map_err(|e| SyllabusError::extraction_failed(format!("failed to spawn pdftotext: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SyllabusError::extraction_failed(format!(
            "pdftotext exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Pull paragraph text out of the DOCX main document part.
async fn extract_docx(path: PathBuf) -> SyllabusResult<String> {
    // zip reads are synchronous; keep them off the async runtime
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::open(&path)?;
        let mut archive = zip::ZipArchive::new(file)?;

        let mut document_xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|_| SyllabusError::extraction_failed("no word/document.xml in archive"))?
            .read_to_string(&mut document_xml)?;

        Ok(docx_paragraphs(&document_xml).join("\n"))
    })
    .await
    .map_err(|e| SyllabusError::extraction_failed(format!("extraction task panicked: {e}")))?
}

/// Split the document XML into paragraphs and join the text runs of each.
fn docx_paragraphs(document_xml: &str) -> Vec<String> {
    document_xml
        .split("</w:p>")
        .filter_map(|paragraph| {
            let text: String = TEXT_RUN_RE
                .captures_iter(paragraph)
                .map(|c| unescape_xml(&c[1]))
                .collect();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

fn unescape_xml(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_docx(dir: &Path, name: &str, document_xml: &str) -> PathBuf {
        let path = dir.join(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn docx_paragraphs_join_runs_and_split_on_paragraph_end() {
        let xml = r#"<w:document><w:body>
            <w:p><w:r><w:t>Week 1: </w:t></w:r><w:r><w:t xml:space="preserve">Introduction</w:t></w:r></w:p>
            <w:p><w:r><w:t>Week 2: Pointers &amp; Memory</w:t></w:r></w:p>
            <w:p></w:p>
        </w:body></w:document>"#;

        let paragraphs = docx_paragraphs(xml);
        assert_eq!(
            paragraphs,
            vec![
                "Week 1: Introduction".to_string(),
                "Week 2: Pointers & Memory".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn extract_docx_reads_document_part() {
        let tmp = TempDir::new().unwrap();
        let path = write_docx(
            tmp.path(),
            "syllabus.docx",
            "<w:p><w:r><w:t>Operating Systems</w:t></w:r></w:p>",
        );

        let text = extract_text(&path).await.unwrap();
        assert_eq!(text, "Operating Systems");
    }

    #[tokio::test]
    async fn unknown_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("syllabus.txt");
        tokio::fs::write(&path, "text").await.unwrap();

        let err = extract_text(&path).await.unwrap_err();
        assert!(matches!(err, SyllabusError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[tokio::test]
    async fn docx_without_text_is_empty_document() {
        let tmp = TempDir::new().unwrap();
        let path = write_docx(tmp.path(), "empty.docx", "<w:p></w:p>");

        let err = extract_text(&path).await.unwrap_err();
        assert!(matches!(err, SyllabusError::EmptyDocument));
    }

    #[tokio::test]
    #[ignore = "requires poppler pdftotext on PATH"]
    async fn extract_pdf_via_pdftotext() {
        let text = extract_text(Path::new("fixtures/sample.pdf")).await.unwrap();
        assert!(!text.is_empty());
    }
}
