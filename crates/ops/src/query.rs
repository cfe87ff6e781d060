//! Read-only registry queries

use crate::types::{
    ExtrasListing, Notice, NoticeReport, PackageSummary, ProjectUrl, ReleaseEntry,
    ReleaseListing, UrlListing,
};
use crate::OpsCtx;
use spout_errors::Error;
use spout_events::{AppEvent, EventEmitter, RegistryEvent};
use spout_index::{filter_releases, is_stable_selector, PackageDocument, ReleaseBounds};
use spout_types::{SpecifierSet, Version};

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|s| !s.is_empty()).cloned()
}

/// Fetch the package document for `release`, or for the latest release
pub(crate) async fn fetch_document(
    ctx: &OpsCtx,
    package: &str,
    release: Option<&str>,
) -> Result<PackageDocument, Error> {
    match release {
        Some(version) if !is_stable_selector(version) => {
            ctx.registry.fetch_release(package, version, &ctx.tx).await
        }
        _ => {
            let document = ctx.registry.fetch_package(package, &ctx.tx).await?;
            ctx.emit(AppEvent::Registry(RegistryEvent::StableResolved {
                package: document.info.name.clone(),
                version: document.info.version.clone(),
            }));
            Ok(document)
        }
    }
}

/// Summarise a package, optionally at a specific release
///
/// # Errors
///
/// Returns an error if the package or release does not exist or the
/// registry cannot be reached.
pub async fn package_info(
    ctx: &OpsCtx,
    package: &str,
    release: Option<&str>,
) -> Result<PackageSummary, Error> {
    let document = fetch_document(ctx, package, release).await?;
    let current = document.current_release();
    let info = &document.info;

    let author = non_empty(info.author.as_ref());
    let author_email = non_empty(info.author_email.as_ref());
    let maintainer = non_empty(info.maintainer.as_ref());
    let maintainer_email = non_empty(info.maintainer_email.as_ref());

    Ok(PackageSummary {
        name: info.name.clone(),
        version: info.version.clone(),
        summary: non_empty(info.summary.as_ref()),
        release_date: current.upload_time.map(|t| t.date_naive()),
        homepage: info.homepage().map(str::to_string),
        documentation: info.documentation().map(str::to_string),
        license: non_empty(info.license.as_ref()),
        requires_python: non_empty(info.requires_python.as_ref()),
        maintainer: maintainer.or_else(|| author.clone()),
        maintainer_email: maintainer_email.or_else(|| author_email.clone()),
        author,
        author_email,
        package_url: info.package_url.clone(),
        dependencies: info.dependencies().into_iter().map(str::to_string).collect(),
        yanked: info.yanked,
        yanked_reason: info.yanked_reason.clone(),
    })
}

/// List a package's releases inside `bounds`, in registry order
///
/// # Errors
///
/// Returns an error if the package does not exist or the registry cannot
/// be reached.
pub async fn list_releases(
    ctx: &OpsCtx,
    package: &str,
    bounds: &ReleaseBounds,
) -> Result<ReleaseListing, Error> {
    let document = ctx.registry.fetch_package(package, &ctx.tx).await?;
    let releases = document.release_map();

    for (version, record) in &releases {
        if record.version.is_none() {
            ctx.emit(AppEvent::Registry(RegistryEvent::UnparsableVersion {
                package: document.info.name.clone(),
                version: version.clone(),
            }));
        }
    }

    let releases = filter_releases(&releases, bounds)
        .into_iter()
        .map(|(version, record)| ReleaseEntry {
            version: version.to_string(),
            upload_date: record.upload_time.map(|t| t.date_naive()),
            yanked: record.yanked,
            yanked_reason: record.yanked_reason.clone(),
        })
        .collect();

    Ok(ReleaseListing {
        package: document.info.name.clone(),
        releases,
    })
}

/// List a release's project links in registry order
///
/// # Errors
///
/// Returns an error if the package or release does not exist or the
/// registry cannot be reached.
pub async fn project_urls(
    ctx: &OpsCtx,
    package: &str,
    release: Option<&str>,
) -> Result<UrlListing, Error> {
    let document = fetch_document(ctx, package, release).await?;
    let info = document.info;

    let urls = info
        .project_urls
        .into_iter()
        .flatten()
        .map(|(label, url)| ProjectUrl { label, url })
        .collect();

    Ok(UrlListing {
        package: info.name,
        version: info.version,
        urls,
    })
}

/// List the extras a release can be installed with
///
/// # Errors
///
/// Returns an error if the package or release does not exist or the
/// registry cannot be reached.
pub async fn list_extras(
    ctx: &OpsCtx,
    package: &str,
    release: Option<&str>,
) -> Result<ExtrasListing, Error> {
    let document = fetch_document(ctx, package, release).await?;
    let info = &document.info;

    Ok(ExtrasListing {
        package: info.name.clone(),
        version: info.version.clone(),
        canonical_name: info.canonical_name(),
        extras: info.extras(),
    })
}

/// Collect a release's notices: yanked status and, when `python` is known,
/// whether it satisfies `requires_python`
///
/// An unparseable `requires_python` is reported as a warning event and
/// skipped.
///
/// # Errors
///
/// Returns an error if the package or release does not exist or the
/// registry cannot be reached.
pub async fn package_notices(
    ctx: &OpsCtx,
    package: &str,
    release: Option<&str>,
    python: Option<&Version>,
) -> Result<NoticeReport, Error> {
    let document = fetch_document(ctx, package, release).await?;
    let info = &document.info;
    let mut notices = Vec::new();

    if info.yanked {
        notices.push(Notice::Yanked {
            reason: non_empty(info.yanked_reason.as_ref()),
        });
    }

    let requires = info.requires_python.as_deref().filter(|s| !s.trim().is_empty());
    if let (Some(requires), Some(python)) = (requires, python) {
        match SpecifierSet::parse(requires) {
            Ok(set) if !set.contains(python) => notices.push(Notice::IncompatiblePython {
                requires: requires.to_string(),
                current: python.to_string(),
            }),
            Ok(_) => {}
            Err(e) => ctx.emit_warning_with_context(
                format!("Python compatibility not checked: {e}"),
                format!("{} {}", info.name, info.version),
            ),
        }
    }

    Ok(NoticeReport {
        package: info.name.clone(),
        version: info.version.clone(),
        python: python.map(ToString::to_string),
        notices,
    })
}
