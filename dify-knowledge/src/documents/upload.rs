use std::path::Path;

use reqwest::{
    Body,
    multipart::{Form, Part},
};
use snafu::ResultExt;

use super::model::UploadData;
use crate::client::{BuildMultipartSnafu, Error, FileMetadataSnafu, OpenFileSnafu, SerializeDataSnafu};

const DATA_MEDIA_TYPE: &str = "text/plain";
const FALLBACK_FILE_NAME: &str = "upload";

/// Builds the two-part upload form: `data` carries the JSON settings, `file`
/// streams the file from disk.
///
/// The file is opened here and owned by the returned form, so the handle is
/// closed when the request that consumes the form finishes, whether it succeeded
/// or not. Open errors are returned before any request is made.
pub(crate) async fn upload_form(data: &UploadData<'_>, path: &Path) -> Result<Form, Error> {
    let data = serde_json::to_string(data).context(SerializeDataSnafu)?;
    let data_part = Part::text(data).mime_str(DATA_MEDIA_TYPE).context(BuildMultipartSnafu)?;

    let file = tokio::fs::File::open(path).await.context(OpenFileSnafu { path })?;
    let length = file.metadata().await.context(FileMetadataSnafu { path })?.len();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
    let media_type = mime_guess::from_path(path).first_or_octet_stream();
    tracing::debug!(file.size = length, file.media_type = %media_type, "upload file opened");

    let file_part = Part::stream_with_length(Body::from(file), length)
        .file_name(file_name)
        .mime_str(media_type.as_ref())
        .context(BuildMultipartSnafu)?;

    Ok(Form::new().part("data", data_part).part("file", file_part))
}
