//! Reading user-picked files for multipart uploads.

use std::path::Path;

use gigboard_application::UploadFile;

/// Reads a file and guesses its MIME type from the extension.
///
/// Unknown extensions are sent as `application/octet-stream`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub async fn read_upload_file(path: &Path) -> std::io::Result<UploadFile> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(UploadFile::new(filename, content_type, bytes))
}
