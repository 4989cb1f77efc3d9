//! Upload form for importing a previously exported snapshot.

use actix_multipart::form::{MultipartForm, tempfile::TempFile};

#[derive(MultipartForm)]
pub struct ImportSnapshotForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

impl ImportSnapshotForm {
    /// Raw contents of the uploaded document.
    pub fn read_bytes(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.file.file.path())
    }
}
