//! Command line interface definition

use clap::{Parser, Subcommand};
use spout_types::ColorChoice;
use std::path::PathBuf;

/// spout - query a package registry and download verified distributions
#[derive(Parser)]
#[command(name = "spout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a package registry and download verified distributions")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to the spout log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH", env = "SPOUT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show information about a package
    Info {
        /// Package name
        package: String,

        /// Release to describe (default: latest stable)
        release: Option<String>,

        /// Print the project's links instead of the summary
        #[arg(long, conflicts_with_all = ["list_extras", "notices"])]
        urls: bool,

        /// List the extras the release can be installed with
        #[arg(short = 'e', long, conflicts_with = "notices")]
        list_extras: bool,

        /// Show notices for the release (yanked, Python compatibility)
        #[arg(short = 'n', long)]
        notices: bool,

        /// Interpreter version checked by --notices (default: detected python3)
        #[arg(long, value_name = "VERSION", requires = "notices")]
        python: Option<String>,
    },

    /// List releases of a package, optionally within version and date bounds
    #[command(alias = "ls")]
    Releases {
        /// Package name
        package: String,

        /// Only releases at or after this version
        #[arg(long, visible_alias = "av", value_name = "VERSION")]
        after_version: Option<String>,

        /// Only releases at or before this version
        #[arg(long, visible_alias = "bv", value_name = "VERSION")]
        before_version: Option<String>,

        /// Only releases uploaded on or after this date (YYYY-MM-DD)
        #[arg(long, visible_alias = "ad", value_name = "DATE")]
        after_date: Option<String>,

        /// Only releases uploaded on or before this date (YYYY-MM-DD)
        #[arg(long, visible_alias = "bd", value_name = "DATE")]
        before_date: Option<String>,
    },

    /// Download a distribution of a release
    #[command(alias = "dl")]
    Download {
        /// Package name
        package: String,

        /// Release version, or `stable` for the latest non-prerelease
        #[arg(default_value = "stable")]
        release: String,

        /// Distribution type (bdist_wheel, sdist, ...; `any` for all types)
        #[arg(short = 'd', long = "dist", value_name = "TYPE")]
        dist: Option<String>,

        /// Wheel tag pattern: {build}-{python}-{abi}-{platform}, `*` as wildcard
        #[arg(short = 'f', long = "whl-format", value_name = "PATTERN")]
        whl_format: Option<String>,

        /// Destination file or directory (default: upstream filename)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// List matching distributions instead of downloading
        #[arg(long)]
        list: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_download_defaults_to_stable() {
        let cli = Cli::parse_from(["spout", "download", "otlet"]);
        match cli.command {
            Commands::Download {
                release, dist, list, ..
            } => {
                assert_eq!(release, "stable");
                assert!(dist.is_none());
                assert!(!list);
            }
            _ => panic!("expected download"),
        }
    }

    #[test]
    fn test_info_views_are_exclusive() {
        assert!(Cli::try_parse_from(["spout", "info", "otlet", "--urls", "-n"]).is_err());
        assert!(Cli::try_parse_from(["spout", "info", "otlet", "-e", "--notices"]).is_err());
        assert!(Cli::try_parse_from(["spout", "info", "otlet", "--python", "3.11"]).is_err());

        let cli = Cli::parse_from(["spout", "info", "otlet", "1.0", "-n", "--python", "3.11"]);
        match cli.command {
            Commands::Info {
                release,
                notices,
                python,
                ..
            } => {
                assert_eq!(release.as_deref(), Some("1.0"));
                assert!(notices);
                assert_eq!(python.as_deref(), Some("3.11"));
            }
            _ => panic!("expected info"),
        }
    }

    #[test]
    fn test_release_bound_aliases() {
        let cli = Cli::parse_from(["spout", "releases", "otlet", "--bd", "2021-12-31", "--av", "1.0"]);
        match cli.command {
            Commands::Releases {
                before_date,
                after_version,
                ..
            } => {
                assert_eq!(before_date.as_deref(), Some("2021-12-31"));
                assert_eq!(after_version.as_deref(), Some("1.0"));
            }
            _ => panic!("expected releases"),
        }
    }
}
