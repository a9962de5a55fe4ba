use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use iw_core::config::SimulationConfig;
use iw_core::manuscript::{FileFormat, PreflightChecks, UploadCandidate};
use iw_core::ports::{FileIntakeError, FileIntakePort, ParsedUpload};

/// Bytes-per-word heuristic for the simulated word count.
const BYTES_PER_WORD: u64 = 6;

/// Simulated file intake.
///
/// There is no real parser behind the product; the word count is derived
/// from the file size so it stays stable across retries of the same file.
pub struct SimulatedFileIntake {
    delay: Duration,
}

impl SimulatedFileIntake {
    pub fn new(simulation: &SimulationConfig) -> Self {
        Self {
            delay: Duration::from_millis(simulation.intake_delay_ms),
        }
    }
}

#[async_trait]
impl FileIntakePort for SimulatedFileIntake {
    async fn validate_and_parse(
        &self,
        upload: &UploadCandidate,
    ) -> Result<ParsedUpload, FileIntakeError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let format = FileFormat::from_file_name(&upload.file_name).ok_or_else(|| {
            FileIntakeError::Validation(format!("unrecognized format: {}", upload.file_name))
        })?;
        if upload.size_bytes == 0 {
            return Err(FileIntakeError::Unreadable);
        }

        let word_count = upload.size_bytes / BYTES_PER_WORD;
        debug!(file_name = %upload.file_name, word_count, "intake parsed upload");

        Ok(ParsedUpload {
            word_count,
            format,
            size_bytes: upload.size_bytes,
            preflight: PreflightChecks {
                format: true,
                size: true,
                readability: true,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intake() -> SimulatedFileIntake {
        SimulatedFileIntake::new(&SimulationConfig {
            intake_delay_ms: 0,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_word_count_is_deterministic_in_size() {
        let parsed = intake()
            .validate_and_parse(&UploadCandidate {
                file_name: "tide.docx".into(),
                size_bytes: 600_000,
            })
            .await
            .unwrap();
        assert_eq!(parsed.word_count, 100_000);
        assert_eq!(parsed.format, FileFormat::Docx);
        assert!(parsed.preflight.all_passed());
    }

    #[tokio::test]
    async fn test_empty_file_is_unreadable() {
        let err = intake()
            .validate_and_parse(&UploadCandidate {
                file_name: "tide.txt".into(),
                size_bytes: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FileIntakeError::Unreadable));
    }

    #[tokio::test]
    async fn test_unknown_extension_fails_validation() {
        let err = intake()
            .validate_and_parse(&UploadCandidate {
                file_name: "tide.pages".into(),
                size_bytes: 1_000,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FileIntakeError::Validation(_)));
    }
}
