//! Archive extraction handler.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;
use unzipd_archive::ArchiveExtractor;

use crate::extract::{Json, ValidateJson};
use crate::handler::request::UnzipRequest;
use crate::handler::response::{ErrorResponse, UnzipResponse};
use crate::handler::{ErrorKind, Result};
use crate::service::{ArchiveSource, ArchiveStore, ServiceState};

/// Tracing target for extraction requests.
const TRACING_TARGET: &str = "unzipd_server::handler::unzip";

/// Extracts every file of a ZIP archive.
///
/// The archive comes from inline base64 data or from the object store. The
/// password, when present, is used for encrypted entries. Extraction runs on
/// the blocking pool and either every file is returned or none is.
#[tracing::instrument(skip_all)]
async fn unzip(
    State(archive_store): State<ArchiveStore>,
    State(archive_extractor): State<ArchiveExtractor>,
    ValidateJson(request): ValidateJson<UnzipRequest>,
) -> Result<(StatusCode, Json<UnzipResponse>)> {
    let source = request.source()?;

    tracing::debug!(
        target: TRACING_TARGET,
        stored = matches!(source, ArchiveSource::Stored(_)),
        has_password = request.password().is_some(),
        "Extracting archive"
    );

    let archive = archive_store.resolve(source).await?;
    let integrity_check = request.integrity_check();
    let password = request.password();

    let entries = tokio::task::spawn_blocking(move || {
        archive_extractor.extract_verified(&archive, &integrity_check, password.as_ref())
    })
    .await
    .map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "Extraction task failed");
        ErrorKind::InternalServerError.with_message("Archive extraction was interrupted")
    })??;

    let response = UnzipResponse::from_entries(entries);

    tracing::info!(
        target: TRACING_TARGET,
        file_count = response.files.len(),
        total_size = response.total_size(),
        "Archive extracted"
    );

    Ok((StatusCode::OK, Json(response)))
}

fn unzip_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Extract a ZIP archive")
        .description(
            "Decrypts and decompresses a base64 ZIP archive (`filedata`) or a stored \
            archive (`fileId`) and returns every file entry as base64, in archive order. \
            Directories are skipped.",
        )
        .response::<200, Json<UnzipResponse>>()
        .response::<400, Json<ErrorResponse<'static>>>()
        .response::<413, Json<ErrorResponse<'static>>>()
        .response::<500, Json<ErrorResponse<'static>>>()
}

/// Returns routes for archive extraction.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route("/unzip", post_with(unzip, unzip_docs))
        .with_path_items(|item| item.tag("Archives"))
}
