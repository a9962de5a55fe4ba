//! Upload acceptance rules.
//!
//! The studio only enforces the format whitelist and the size ceiling here;
//! word counting and content parsing are delegated to the file intake
//! collaborator behind [`crate::ports::FileIntakePort`].

use serde::{Deserialize, Serialize};

/// Accepted manuscript file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Docx,
    Doc,
    Pdf,
    Txt,
    Rtf,
    Odt,
}

impl FileFormat {
    /// Parse from a file extension, without the dot, any case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            "rtf" => Some(Self::Rtf),
            "odt" => Some(Self::Odt),
            _ => None,
        }
    }

    /// Parse from a file name (`novel.final.DOCX` → `Docx`).
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = name.rsplit_once('.').map(|(_, ext)| ext)?;
        Self::from_extension(ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Pdf => "pdf",
            Self::Txt => "txt",
            Self::Rtf => "rtf",
            Self::Odt => "odt",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A file offered for upload, before any acceptance checks ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub file_name: String,
    pub size_bytes: u64,
}

/// Why an offered file was turned away. No record is created in either case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum UploadValidationError {
    #[error("unsupported file format: .{extension}")]
    InvalidFile { extension: String },

    #[error("file is {size_bytes} bytes, over the {max_bytes} byte ceiling")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

/// Enforce the format whitelist and the size ceiling.
pub fn validate_upload(
    candidate: &UploadCandidate,
    max_bytes: u64,
) -> Result<FileFormat, UploadValidationError> {
    let format = FileFormat::from_file_name(&candidate.file_name).ok_or_else(|| {
        UploadValidationError::InvalidFile {
            extension: candidate
                .file_name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default(),
        }
    })?;

    if candidate.size_bytes > max_bytes {
        return Err(UploadValidationError::FileTooLarge {
            size_bytes: candidate.size_bytes,
            max_bytes,
        });
    }

    Ok(format)
}

/// Preflight verdicts reported back by the intake collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightChecks {
    pub format: bool,
    pub size: bool,
    pub readability: bool,
}

impl PreflightChecks {
    pub fn all_passed(self) -> bool {
        self.format && self.size && self.readability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u64 = 25 * 1024 * 1024;

    #[test]
    fn test_whitelisted_formats_parse() {
        for name in [
            "a.docx", "b.doc", "c.pdf", "d.txt", "e.rtf", "f.odt", "g.DOCX",
        ] {
            assert!(FileFormat::from_file_name(name).is_some(), "{name}");
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let candidate = UploadCandidate {
            file_name: "draft.epub".into(),
            size_bytes: 1024,
        };
        let err = validate_upload(&candidate, MAX).unwrap_err();
        assert_eq!(
            err,
            UploadValidationError::InvalidFile {
                extension: "epub".into()
            }
        );
    }

    #[test]
    fn test_missing_extension_rejected() {
        let candidate = UploadCandidate {
            file_name: "draft".into(),
            size_bytes: 1024,
        };
        assert!(matches!(
            validate_upload(&candidate, MAX),
            Err(UploadValidationError::InvalidFile { .. })
        ));
    }

    #[test]
    fn test_size_ceiling() {
        let candidate = UploadCandidate {
            file_name: "epic.docx".into(),
            size_bytes: MAX + 1,
        };
        let err = validate_upload(&candidate, MAX).unwrap_err();
        assert_eq!(
            err,
            UploadValidationError::FileTooLarge {
                size_bytes: MAX + 1,
                max_bytes: MAX
            }
        );

        // Exactly at the ceiling is fine
        let candidate = UploadCandidate {
            file_name: "epic.docx".into(),
            size_bytes: MAX,
        };
        assert_eq!(validate_upload(&candidate, MAX).unwrap(), FileFormat::Docx);
    }

    #[test]
    fn test_preflight_all_passed() {
        let checks = PreflightChecks {
            format: true,
            size: true,
            readability: false,
        };
        assert!(!checks.all_passed());
    }
}
