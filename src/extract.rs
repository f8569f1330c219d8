// Text extraction boundary: plain text files are read directly, PDFs go
// through pdf-extract, and images are handed to an external tesseract
// binary. Everything downstream of this module works on plain strings.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};

const TEXT_EXTS: [&str; 4] = ["txt", "md", "csv", "json"];
const IMAGE_EXTS: [&str; 5] = ["png", "jpg", "jpeg", "tiff", "bmp"];

/// Whether a file extension is one the extractor knows how to handle.
pub fn supported_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    ext == "pdf" || TEXT_EXTS.contains(&ext.as_str()) || IMAGE_EXTS.contains(&ext.as_str())
}

/// Extract the raw text of a file. Fails with a human-readable message for
/// unsupported types or when extraction itself goes wrong.
pub fn extract_text(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    if TEXT_EXTS.contains(&ext.as_str()) {
        read_text_file(path)
    } else if ext == "pdf" {
        pdf_extract::extract_text(path).map_err(|e| anyhow!("PDF extraction failed: {}", e))
    } else if IMAGE_EXTS.contains(&ext.as_str()) {
        ocr_image(path)
    } else {
        Err(anyhow!("Unsupported file format: {}", ext))
    }
}

fn read_text_file(p: &Path) -> Result<String> {
    let mut s = String::new();
    let mut f = File::open(p)?;
    f.read_to_string(&mut s)?;
    Ok(s)
}

// OCR rides an external tesseract install. NOTEDROP_TESSERACT overrides
// the binary name, mainly for tests and unusual installs.
fn ocr_image(path: &Path) -> Result<String> {
    let binary =
        std::env::var("NOTEDROP_TESSERACT").unwrap_or_else(|_| String::from("tesseract"));
    let output = Command::new(&binary)
        .arg(path)
        .arg("stdout")
        .args(["-l", "eng"])
        .output()
        .map_err(|e| anyhow!("failed to invoke {}: {}", binary, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "OCR failed for {}: {}",
            path.display(),
            stderr.trim()
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_extract_text_from_txt() -> Result<()> {
        let dir = TempDir::new()?;
        let file_path = dir.path().join("notes.txt");
        let mut file = File::create(&file_path)?;
        writeln!(file, "Hello, World!")?;

        let content = extract_text(&file_path)?;
        assert_eq!(content, "Hello, World!\n");
        Ok(())
    }

    #[test]
    fn test_extract_text_rejects_unknown_extension() {
        let result = extract_text(Path::new("presentation.pptx"));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Unsupported file format"));
    }

    #[test]
    fn test_extract_text_rejects_missing_extension() {
        let result = extract_text(Path::new("README"));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_text_bad_pdf_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let pdf_path = dir.path().join("broken.pdf");
        std::fs::write(&pdf_path, b"%PDF-1.4 not really a pdf").unwrap();

        // Malformed PDFs must surface as an error, never a panic.
        let result = extract_text(&pdf_path);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_ocr_reports_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let img_path = dir.path().join("scan.png");
        std::fs::write(&img_path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        std::env::set_var("NOTEDROP_TESSERACT", "/nonexistent/tesseract-binary");
        let result = extract_text(&img_path);
        std::env::remove_var("NOTEDROP_TESSERACT");

        let err = result.unwrap_err().to_string();
        assert!(err.contains("failed to invoke"));
    }

    #[test]
    fn test_supported_extension() {
        assert!(supported_extension("pdf"));
        assert!(supported_extension("PNG"));
        assert!(supported_extension("md"));
        assert!(!supported_extension("exe"));
        assert!(!supported_extension(""));
    }
}
