use std::fs;
use std::path::Path;

use crate::consts::MAX_UPLOAD_BYTES;
use crate::errors::InputError;
use crate::utils::decode_text;

///
/// An annotation file selected for preview and analysis.
///
/// The whole file is held in memory: it is scanned locally and also sent
/// unmodified to the analysis service. Files above [`MAX_UPLOAD_BYTES`] are
/// rejected on construction.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl AnnotationFile {
    ///
    /// Build an upload from in-memory content.
    ///
    /// # Arguments
    /// - name: file name sent along with the content
    /// - bytes: raw content, plain or gzipped
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, InputError> {
        let name = name.into();
        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(InputError::FileTooLarge { path: name, size });
        }
        Ok(AnnotationFile { name, bytes })
    }

    ///
    /// Read an upload from disk, checking its size before reading it.
    ///
    /// # Arguments
    /// - path: path to the annotation file
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let metadata = fs::metadata(path)
            .map_err(|e| InputError::FileReadError(format!("{}: {}", path.display(), e)))?;
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(InputError::FileTooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.vcf".to_string());
        let bytes = fs::read(path)?;
        AnnotationFile::from_bytes(name, bytes)
    }

    /// The decoded text of the file.
    pub fn text(&self) -> Result<String, InputError> {
        decode_text(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
