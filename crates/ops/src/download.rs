//! Distribution listing, selection and verified download

use crate::query::fetch_document;
use crate::types::{DistListing, DistQuery, DownloadReport, DownloadSpec, PreparedDownload};
use crate::OpsCtx;
use spout_dist::{
    classify, select, CandidateEntry, Catalog, SelectionOutcome, SelectionRequest,
    SelectionWarning,
};
use spout_errors::{DistError, Error};
use spout_events::{AppEvent, EventEmitter, FailureContext, SelectionEvent};
use spout_index::PackageDocument;
use spout_net::{ChecksumSource, DownloadRequest, DownloadSession};
use std::path::{Path, PathBuf};

/// Resolves a choice when several distributions remain
pub trait DistChooser {
    /// Pick one of `offered` (1-based catalog indices)
    ///
    /// # Errors
    ///
    /// Returns an error when no choice can be made.
    fn choose(&self, release: &str, catalog: &Catalog, offered: &[usize]) -> Result<usize, Error>;
}

/// Chooser for non-interactive runs: ambiguity is an error
pub struct NoPrompt;

impl DistChooser for NoPrompt {
    fn choose(&self, release: &str, _catalog: &Catalog, offered: &[usize]) -> Result<usize, Error> {
        Err(DistError::AmbiguousSelection {
            release: release.to_string(),
            candidates: offered.len(),
        }
        .into())
    }
}

/// Chooser that always answers with the same index
pub struct FixedChoice(pub usize);

impl DistChooser for FixedChoice {
    fn choose(&self, _release: &str, _catalog: &Catalog, _offered: &[usize]) -> Result<usize, Error> {
        Ok(self.0)
    }
}

struct ResolvedRelease {
    package: String,
    version: String,
    catalog: Catalog,
}

async fn resolve_catalog(ctx: &OpsCtx, query: &DistQuery) -> Result<ResolvedRelease, Error> {
    let document: PackageDocument =
        fetch_document(ctx, &query.package, Some(query.release.as_str())).await?;
    let version = document.info.version.clone();
    let catalog = classify(document.files_for(&version).unwrap_or_default());

    ctx.emit(AppEvent::Selection(SelectionEvent::CatalogBuilt {
        release: format!("{} {version}", document.info.name),
        entries: catalog.len(),
        wheels: catalog.wheel_count(),
    }));

    Ok(ResolvedRelease {
        package: document.info.name,
        version,
        catalog,
    })
}

fn emit_warnings(ctx: &OpsCtx, warnings: &[SelectionWarning]) {
    for warning in warnings {
        match warning {
            SelectionWarning::TagPatternIgnored { pattern, requested } => {
                ctx.emit(AppEvent::Selection(SelectionEvent::TagPatternIgnored {
                    pattern: pattern.clone(),
                    requested: requested.clone(),
                }));
            }
        }
    }
}

fn no_match(resolved: &ResolvedRelease, request: &SelectionRequest) -> Error {
    DistError::NoMatchingDistribution {
        release: format!("{} {}", resolved.package, resolved.version),
        constraints: request.describe(),
    }
    .into()
}

/// List the distributions of a release, narrowed by the query's constraints
///
/// An unconstrained query lists every distribution.
///
/// # Errors
///
/// Returns `DistError::NoMatchingDistribution` if constraints were given and
/// nothing matched, or a registry error.
pub async fn list_distributions(ctx: &OpsCtx, query: &DistQuery) -> Result<DistListing, Error> {
    let resolved = resolve_catalog(ctx, query).await?;
    let request = &query.request;

    let entries: Vec<CandidateEntry> = if request.dist_type.is_none() && request.pattern.is_none()
    {
        resolved.catalog.entries().to_vec()
    } else {
        let selection = select(&resolved.catalog, request);
        emit_warnings(ctx, &selection.warnings);
        let indices = match selection.outcome {
            SelectionOutcome::AutoSelected(index) => vec![index],
            SelectionOutcome::NeedsDisambiguation(indices) => indices,
            SelectionOutcome::NotFound => return Err(no_match(&resolved, request)),
        };
        indices
            .into_iter()
            .filter_map(|index| resolved.catalog.get(index).cloned())
            .collect()
    };

    Ok(DistListing {
        package: resolved.package,
        version: resolved.version,
        entries,
    })
}

/// Resolve the release, select a single distribution and pick its destination
///
/// No bytes are transferred.
///
/// # Errors
///
/// Returns `DistError::NoMatchingDistribution` when nothing matches, the
/// chooser's error when several match and it cannot decide, or
/// `DistError::InvalidChoice` for a choice outside the offered set.
pub async fn prepare_download(
    ctx: &OpsCtx,
    spec: &DownloadSpec,
    chooser: &dyn DistChooser,
) -> Result<PreparedDownload, Error> {
    let resolved = resolve_catalog(ctx, &spec.query).await?;
    let request = &spec.query.request;

    let selection = select(&resolved.catalog, request);
    emit_warnings(ctx, &selection.warnings);

    let entry = match selection.outcome {
        SelectionOutcome::NotFound => return Err(no_match(&resolved, request)),
        SelectionOutcome::AutoSelected(index) => {
            let entry = resolved
                .catalog
                .get(index)
                .ok_or_else(|| Error::internal(format!("catalog index {index} out of range")))?;
            ctx.emit(AppEvent::Selection(SelectionEvent::AutoSelected {
                index,
                filename: entry.filename.clone(),
            }));
            entry
        }
        SelectionOutcome::NeedsDisambiguation(offered) => {
            ctx.emit(AppEvent::Selection(SelectionEvent::DisambiguationRequired {
                candidates: offered.clone(),
            }));
            let release = format!("{} {}", resolved.package, resolved.version);
            let choice = chooser.choose(&release, &resolved.catalog, &offered)?;
            let entry = resolved.catalog.choose(choice, &offered)?;
            ctx.emit(AppEvent::Selection(SelectionEvent::Chosen {
                index: choice,
                filename: entry.filename.clone(),
            }));
            entry
        }
    };

    let destination = destination_for(spec.output.as_deref(), &entry.filename).await;
    ctx.emit_debug(format!(
        "{} will be saved to {}",
        entry.filename,
        destination.display()
    ));

    Ok(PreparedDownload {
        package: resolved.package.clone(),
        version: resolved.version.clone(),
        entry: entry.clone(),
        destination,
    })
}

async fn destination_for(output: Option<&Path>, filename: &str) -> PathBuf {
    match output {
        None => PathBuf::from(filename),
        Some(path) => {
            let is_dir = tokio::fs::metadata(path)
                .await
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            if is_dir {
                path.join(filename)
            } else {
                path.to_path_buf()
            }
        }
    }
}

/// Fetch a prepared distribution, reporting progress through `session`
///
/// # Errors
///
/// Returns `NetworkError::ChecksumMismatch` if the downloaded bytes do not
/// hash to the advertised digest, or a transport/I/O error.
pub async fn execute_download(
    ctx: &OpsCtx,
    prepared: &PreparedDownload,
    session: &DownloadSession,
) -> Result<DownloadReport, Error> {
    let entry = &prepared.entry;
    let operation = format!("download {}", entry.filename);
    ctx.emit_operation_started(&operation);
    ctx.emit_download_started(
        &entry.url,
        &entry.filename,
        entry.dist_type.clone(),
        entry.size,
    );

    let request = DownloadRequest {
        url: entry.url.clone(),
        destination: prepared.destination.clone(),
        fallback_md5: entry.md5_digest.clone(),
    };

    match ctx.downloader.download(&request, session, &ctx.tx).await {
        Ok(result) => {
            ctx.emit_operation_completed(&operation, true);
            Ok(DownloadReport {
                package: prepared.package.clone(),
                version: prepared.version.clone(),
                filename: entry.filename.clone(),
                dist_type: entry.dist_type.clone(),
                path: result.path,
                size: result.size,
                md5: result.md5.to_hex(),
                verified_by: match result.checksum_source {
                    ChecksumSource::Etag => "etag",
                    ChecksumSource::Registry => "registry",
                }
                .to_string(),
            })
        }
        Err(e) => {
            ctx.emit_operation_failed(&operation, FailureContext::from_error(&e));
            Err(e)
        }
    }
}

/// Select and download a distribution in one step
///
/// # Errors
///
/// Returns any error from [`prepare_download`] or [`execute_download`].
pub async fn download_distribution(
    ctx: &OpsCtx,
    spec: &DownloadSpec,
    chooser: &dyn DistChooser,
) -> Result<DownloadReport, Error> {
    let prepared = prepare_download(ctx, spec, chooser).await?;
    let session = DownloadSession::new(prepared.entry.size);
    execute_download(ctx, &prepared, &session).await
}
