use std::path::Path;
use thiserror::Error;

/// Longest filename we will store, in bytes
const MAX_FILENAME_LEN: usize = 255;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid file type. Only PDF files are allowed")]
    InvalidFileType,

    #[error("File size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("No selected file")]
    EmptyFilename,

    #[error("Hidden files (starting with '.') are not allowed")]
    HiddenFile,

    #[error("File appears to be empty")]
    EmptyFile,

    #[error("File content does not look like a PDF")]
    NotAPdf,
}

/// Validates file size against the configured limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ValidationError> {
    if size > max_size {
        return Err(ValidationError::FileTooLarge {
            size,
            max: max_size,
        });
    }
    Ok(())
}

/// Whether a filename passes the drop-zone filter: a `.pdf` extension,
/// case-insensitive. Content is not inspected here.
pub fn has_pdf_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Sanitizes a filename to prevent path traversal and injection attacks.
/// Returns the sanitized filename or an error if the name is invalid.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    // Get only the filename component (remove any path)
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        tracing::warn!("Path traversal attempt detected: {}", filename);
    }

    // Replace path separators and reserved characters, keep the rest
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_control()
                || c == '/'
                || c == '\\'
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Limit length safely for UTF-8
    let sanitized = if sanitized.len() > MAX_FILENAME_LEN {
        let mut end = MAX_FILENAME_LEN;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(ValidationError::HiddenFile);
    }

    Ok(sanitized)
}

/// Checks that the content actually is a PDF, not just named like one
pub fn verify_pdf_content(header: &[u8]) -> Result<(), ValidationError> {
    if header.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    match infer::get(header) {
        Some(kind) if kind.mime_type() == mime::APPLICATION_PDF.as_ref() => Ok(()),
        _ => Err(ValidationError::NotAPdf),
    }
}

/// Full validation pipeline for uploaded PDFs
pub fn validate_pdf_upload(
    filename: &str,
    content_type: Option<&str>,
    size: usize,
    header: &[u8],
    max_size: usize,
) -> Result<String, ValidationError> {
    // 1. Size check
    validate_file_size(size, max_size)?;

    // 2. Sanitize filename
    let sanitized = sanitize_filename(filename)?;

    // 3. Extension allowlist: PDF only
    if !has_pdf_extension(&sanitized) {
        return Err(ValidationError::InvalidFileType);
    }

    // 4. Declared MIME type, when the client sent one
    if let Some(ct) = content_type {
        let normalized = ct.split(';').next().unwrap_or("").trim().to_lowercase();
        if normalized != mime::APPLICATION_PDF.as_ref()
            && normalized != mime::APPLICATION_OCTET_STREAM.as_ref()
        {
            return Err(ValidationError::InvalidFileType);
        }
    }

    // 5. Magic bytes
    verify_pdf_content(header)?;

    Ok(sanitized)
}
