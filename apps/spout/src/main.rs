//! spout - query a package registry and download verified distributions
//!
//! This is the CLI application; all registry and download work happens
//! through the ops crate.

mod cli;
mod display;
mod error;
mod events;
mod interpreter;
mod logging;
mod progress;
mod prompt;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use crate::logging::init_tracing;
use crate::prompt::PromptChooser;
use clap::Parser;
use console::Term;
use spout_config::Config;
use spout_dist::{SelectionRequest, TagPattern};
use spout_events::EventReceiver;
use spout_index::ReleaseBounds;
use spout_net::DownloadSession;
use spout_ops::{
    DistChooser, DistQuery, DownloadSpec, NoPrompt, OperationResult, OpsContextBuilder, OpsCtx,
};
use spout_types::{ColorChoice, DistType, Version};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tracing::{error, info, warn};

/// A command whose arguments have all been parsed
enum Action {
    Info {
        package: String,
        release: Option<String>,
        view: InfoView,
    },
    Releases {
        package: String,
        bounds: ReleaseBounds,
    },
    ListDists(DistQuery),
    Download(DownloadSpec),
}

/// What `info` prints
enum InfoView {
    Summary,
    Urls,
    Extras,
    /// `None` means detect the local interpreter
    Notices { python: Option<Version> },
}

/// Settings the command needs beyond the ops context
struct RunSettings {
    json: bool,
    renderer: OutputRenderer,
    poll_interval: Duration,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting spout v{}", env!("CARGO_PKG_VERSION"));

    // File config (or defaults), then environment, then CLI flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    if let Some(color) = cli.global.color {
        config.general.color = color;
    }

    // Arguments are checked before any request is made
    let action = parse_action(cli.command, &config)?;

    let color = config.general.color;
    match color {
        ColorChoice::Always => console::set_colors_enabled(true),
        ColorChoice::Never => console::set_colors_enabled(false),
        ColorChoice::Auto => {}
    }

    let (event_sender, event_receiver) = spout_events::channel();

    let settings = RunSettings {
        json: cli.global.json,
        renderer: OutputRenderer::new(cli.global.json, color),
        poll_interval: config.download.poll_interval(),
    };

    let ops_ctx = OpsContextBuilder::new()
        .with_event_sender(event_sender)
        .with_config(config)
        .build()?;

    let mut event_handler = EventHandler::new(!cli.global.json, cli.global.debug);

    let result =
        execute_command_with_events(action, ops_ctx, &settings, event_receiver, &mut event_handler)
            .await?;

    settings.renderer.render_result(&result)?;

    info!("Command completed successfully");
    Ok(())
}

/// Turn parsed arguments into an action, validating bounds and patterns
fn parse_action(command: Commands, config: &Config) -> Result<Action, CliError> {
    match command {
        Commands::Info {
            package,
            release,
            urls,
            list_extras,
            notices,
            python,
        } => {
            let view = if urls {
                InfoView::Urls
            } else if list_extras {
                InfoView::Extras
            } else if notices {
                let python = python.as_deref().map(Version::parse).transpose()?;
                InfoView::Notices { python }
            } else {
                InfoView::Summary
            };
            Ok(Action::Info {
                package,
                release,
                view,
            })
        }

        Commands::Releases {
            package,
            after_version,
            before_version,
            after_date,
            before_date,
        } => {
            let bounds = ReleaseBounds::parse(
                after_version.as_deref(),
                before_version.as_deref(),
                after_date.as_deref(),
                before_date.as_deref(),
            )?;
            Ok(Action::Releases { package, bounds })
        }

        Commands::Download {
            package,
            release,
            dist,
            whl_format,
            output,
            list,
        } => {
            let pattern = whl_format.as_deref().map(TagPattern::parse).transpose()?;

            if list {
                if output.is_some() {
                    return Err(CliError::InvalidArguments(
                        "--output cannot be combined with --list".to_string(),
                    ));
                }
                // A listing only narrows by type when one is asked for
                let dist_type = dist.as_deref().and_then(parse_dist_type);
                return Ok(Action::ListDists(DistQuery {
                    package,
                    release,
                    request: SelectionRequest::new(dist_type, pattern),
                }));
            }

            let dist_type = match dist.as_deref() {
                Some(token) => parse_dist_type(token),
                None => Some(config.general.default_dist.clone()),
            };
            Ok(Action::Download(DownloadSpec {
                query: DistQuery {
                    package,
                    release,
                    request: SelectionRequest::new(dist_type, pattern),
                },
                output,
            }))
        }
    }
}

/// `any` lifts the type constraint
fn parse_dist_type(token: &str) -> Option<DistType> {
    if token.trim().eq_ignore_ascii_case("any") {
        return None;
    }
    Some(token.parse().unwrap_or_else(|never| match never {}))
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    action: Action,
    ops_ctx: OpsCtx,
    settings: &RunSettings,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(action, ops_ctx, settings));

    loop {
        select! {
            result = &mut command_future => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(event);
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    action: Action,
    ctx: OpsCtx,
    settings: &RunSettings,
) -> Result<OperationResult, CliError> {
    match action {
        Action::Info {
            package,
            release,
            view,
        } => {
            let release = release.as_deref();
            let result = match view {
                InfoView::Summary => OperationResult::PackageInfo(
                    spout_ops::package_info(&ctx, &package, release).await?,
                ),
                InfoView::Urls => OperationResult::ProjectUrls(
                    spout_ops::project_urls(&ctx, &package, release).await?,
                ),
                InfoView::Extras => OperationResult::Extras(
                    spout_ops::list_extras(&ctx, &package, release).await?,
                ),
                InfoView::Notices { python } => {
                    let python = match python {
                        Some(version) => Some(version),
                        None => interpreter::detect_python().await,
                    };
                    let report =
                        spout_ops::package_notices(&ctx, &package, release, python.as_ref()).await?;
                    OperationResult::Notices(report)
                }
            };
            Ok(result)
        }

        Action::Releases { package, bounds } => {
            let listing = spout_ops::list_releases(&ctx, &package, &bounds).await?;
            Ok(OperationResult::Releases(listing))
        }

        Action::ListDists(query) => {
            let listing = spout_ops::list_distributions(&ctx, &query).await?;
            Ok(OperationResult::Distributions(listing))
        }

        Action::Download(spec) => {
            let report = run_download(&ctx, &spec, settings).await?;
            Ok(OperationResult::Download(report))
        }
    }
}

/// Prepare, then transfer with a progress line drawn beside it
async fn run_download(
    ctx: &OpsCtx,
    spec: &DownloadSpec,
    settings: &RunSettings,
) -> Result<spout_ops::DownloadReport, CliError> {
    let chooser: Box<dyn DistChooser> = if !settings.json && Term::stderr().is_term() {
        Box::new(PromptChooser::new(settings.renderer.clone()))
    } else {
        Box::new(NoPrompt)
    };

    let prepared = spout_ops::prepare_download(ctx, spec, chooser.as_ref()).await?;
    let session = Arc::new(DownloadSession::new(prepared.entry.size));

    let reporter = (!settings.json).then(|| {
        let label = format!(
            "{} {} ({})",
            prepared.package,
            prepared.version,
            prepared.dist_type()
        );
        progress::spawn_reporter(Arc::clone(&session), label, settings.poll_interval)
    });

    let result = spout_ops::execute_download(ctx, &prepared, &session).await;

    if let Some(reporter) = reporter {
        if let Err(e) = reporter.await {
            warn!("Progress reporter stopped abnormally: {}", e);
        }
    }

    Ok(result?)
}
