//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use console::{Style, Term};
use spout_dist::CandidateEntry;
use spout_ops::{
    DistListing, DownloadReport, ExtrasListing, Notice, NoticeReport, OperationResult,
    PackageSummary, ReleaseEntry, ReleaseListing, UrlListing,
};
use spout_types::ColorChoice;
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            self.render_json(result)
        } else {
            self.render_text(result)
        }
    }

    /// Render as JSON
    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    fn render_text(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::PackageInfo(info) => self.render_package_info(info),
            OperationResult::ProjectUrls(listing) => self.render_urls(listing),
            OperationResult::Extras(listing) => self.render_extras(listing),
            OperationResult::Notices(report) => self.render_notices(report),
            OperationResult::Releases(listing) => self.render_releases(listing),
            OperationResult::Distributions(listing) => self.render_dist_listing(listing),
            OperationResult::Download(report) => self.render_download(report),
        }
    }

    /// Render package information
    fn render_package_info(&self, info: &PackageSummary) -> io::Result<()> {
        let title = format!("{} {}", info.name, info.version);
        println!("Info for package {}", self.style(&title, &Style::new().bold()));
        println!();
        println!("Summary:        {}", info.summary.as_deref().unwrap_or("N/A"));
        println!(
            "Release date:   {}",
            info.release_date
                .map_or_else(|| "N/A".to_string(), |d| d.format("%Y-%m-%d").to_string())
        );
        println!("Homepage:       {}", info.homepage.as_deref().unwrap_or("N/A"));
        if let Some(url) = &info.package_url {
            println!("Registry URL:   {url}");
        }
        println!(
            "Documentation:  {}",
            info.documentation.as_deref().unwrap_or("N/A")
        );
        if let Some(author) = contact(info.author.as_deref(), info.author_email.as_deref()) {
            println!("Author:         {author}");
        }
        if let Some(maintainer) =
            contact(info.maintainer.as_deref(), info.maintainer_email.as_deref())
        {
            println!("Maintainer:     {maintainer}");
        }
        println!("License:        {}", info.license.as_deref().unwrap_or("N/A"));
        println!(
            "Python:         {}",
            info.requires_python.as_deref().unwrap_or("Not Specified")
        );

        println!("Dependencies:   ({})", info.dependencies.len());
        for dep in &info.dependencies {
            println!("    {dep}");
        }

        if info.yanked {
            println!();
            println!("{}", self.style("== NOTE ==", &Style::new().yellow().bold()));
            println!("This version has been yanked.");
            if let Some(reason) = &info.yanked_reason {
                println!("    Reason: '{reason}'");
            }
        }

        Ok(())
    }

    fn render_urls(&self, listing: &UrlListing) -> io::Result<()> {
        if listing.urls.is_empty() {
            eprintln!("No URLs available for {} {}", listing.package, listing.version);
            return Ok(());
        }
        for link in &listing.urls {
            println!("{}: {}", self.style(&link.label, &Style::new().bold()), link.url);
        }
        Ok(())
    }

    fn render_extras(&self, listing: &ExtrasListing) -> io::Result<()> {
        let release = format!("{} {}", listing.package, listing.version);
        if listing.extras.is_empty() {
            eprintln!("No extras are declared for '{release}'.");
            return Ok(());
        }
        println!("Allowable extras for '{release}' are:");
        for extra in &listing.extras {
            println!("    - {}[{extra}]", listing.canonical_name);
        }
        Ok(())
    }

    fn render_notices(&self, report: &NoticeReport) -> io::Result<()> {
        let release = format!("{} {}", report.package, report.version);
        println!("Notices for package '{release}':");
        println!();
        if report.notices.is_empty() {
            println!(
                "    {}",
                self.style("- No notices for this release!", &Style::new().green())
            );
        }
        for notice in &report.notices {
            println!("    {}", notice_text(&release, notice));
        }
        if report.python.is_none() {
            eprintln!("No Python interpreter found; compatibility was not checked.");
        }
        Ok(())
    }

    /// Render releases as `(YYYY-MM-DD) version`, yanked ones struck through
    fn render_releases(&self, listing: &ReleaseListing) -> io::Result<()> {
        if listing.releases.is_empty() {
            eprintln!("No releases of {} match the given bounds.", listing.package);
            return Ok(());
        }

        for release in &listing.releases {
            println!("{}", self.release_line(release));
        }
        Ok(())
    }

    fn release_line(&self, release: &ReleaseEntry) -> String {
        let date = release
            .upload_date
            .map_or_else(|| "unknown date".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let text = format!("({date}) {}", release.version);
        if !release.yanked {
            return text;
        }

        let mut line = format!(
            "{}{}",
            self.style(&text, &Style::new().strikethrough().bold()),
            self.style(" (yanked)", &Style::new().yellow().bold())
        );
        if let Some(reason) = &release.yanked_reason {
            line.push_str(&format!(": {reason}"));
        }
        line
    }

    fn render_dist_listing(&self, listing: &DistListing) -> io::Result<()> {
        let release = format!("{} {}", listing.package, listing.version);
        self.render_distributions(&release, &listing.entries)
    }

    /// Print the wheel table and the table of other distributions
    pub fn render_distributions(&self, release: &str, entries: &[CandidateEntry]) -> io::Result<()> {
        if entries.is_empty() {
            eprintln!("No distributions found for {release}");
            return Ok(());
        }

        let (wheels, others): (Vec<&CandidateEntry>, Vec<&CandidateEntry>) =
            entries.iter().partition(|entry| entry.tags.is_some());

        if !wheels.is_empty() {
            println!("Wheels available for {release}:");
            println!("{}", wheel_table(&wheels));
            println!();
        }

        if !others.is_empty() {
            println!("Other distributions available for {release}:");
            println!("{}", other_table(&others));
            println!();
        }

        Ok(())
    }

    fn render_download(&self, report: &DownloadReport) -> io::Result<()> {
        println!(
            "Downloaded {} {} ({}) to {}!",
            report.package,
            report.version,
            report.dist_type,
            report.path.display()
        );
        Ok(())
    }

    fn style(&self, text: &str, style: &Style) -> String {
        if self.supports_color() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

/// `name <email>`, or whichever half is known
fn contact(name: Option<&str>, email: Option<&str>) -> Option<String> {
    match (name, email) {
        (Some(name), Some(email)) => Some(format!("{name} <{email}>")),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(email)) => Some(format!("<{email}>")),
        (None, None) => None,
    }
}

fn notice_text(release: &str, notice: &Notice) -> String {
    match notice {
        Notice::Yanked { reason: Some(reason) } => {
            format!("- This version has been yanked from the registry: '{reason}'")
        }
        Notice::Yanked { reason: None } => {
            "- This version has been yanked from the registry.".to_string()
        }
        Notice::IncompatiblePython { requires, current } => format!(
            "- '{release}' is incompatible with your current Python version \
             (using '{current}', requires '{requires}')"
        ),
    }
}

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn wheel_table(entries: &[&CandidateEntry]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["#", "Size", "Build", "Python", "ABI", "Platform"]));

    for entry in entries {
        let Some(tags) = &entry.tags else { continue };
        table.add_row(vec![
            Cell::new(entry.index),
            Cell::new(entry.display_size),
            Cell::new(tags.build.as_deref().unwrap_or("-")),
            Cell::new(&tags.python_tag),
            Cell::new(&tags.abi_tag),
            Cell::new(&tags.platform_tag),
        ]);
    }
    table
}

fn other_table(entries: &[&CandidateEntry]) -> Table {
    let mut table = new_table();
    table.set_header(header(&["#", "Size", "Type", "Filename"]));

    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.index),
            Cell::new(entry.display_size),
            Cell::new(&entry.dist_type),
            Cell::new(&entry.filename),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use spout_dist::classify;
    use spout_types::{ArtifactRecord, DistType};

    fn artifact(filename: &str, dist_type: DistType, size: u64) -> ArtifactRecord {
        ArtifactRecord {
            filename: filename.to_string(),
            url: format!("https://files.example/{filename}"),
            dist_type,
            size,
            md5_digest: None,
            upload_time: None,
            requires_python: None,
            yanked: false,
            yanked_reason: None,
        }
    }

    #[test]
    fn test_release_line_plain_and_yanked() {
        let renderer = OutputRenderer::new(false, ColorChoice::Never);
        let mut release = ReleaseEntry {
            version: "2.0".to_string(),
            upload_date: chrono::NaiveDate::from_ymd_opt(2021, 6, 15),
            yanked: false,
            yanked_reason: None,
        };
        assert_eq!(renderer.release_line(&release), "(2021-06-15) 2.0");

        release.yanked = true;
        release.yanked_reason = Some("broken build".to_string());
        assert_eq!(
            renderer.release_line(&release),
            "(2021-06-15) 2.0 (yanked): broken build"
        );
    }

    #[test]
    fn test_contact_lines() {
        assert_eq!(
            contact(Some("Ann"), Some("ann@pkg.example")).as_deref(),
            Some("Ann <ann@pkg.example>")
        );
        assert_eq!(contact(Some("Ann"), None).as_deref(), Some("Ann"));
        assert_eq!(
            contact(None, Some("ann@pkg.example")).as_deref(),
            Some("<ann@pkg.example>")
        );
        assert_eq!(contact(None, None), None);
    }

    #[test]
    fn test_notice_text() {
        let yanked = Notice::Yanked {
            reason: Some("bad tags".to_string()),
        };
        assert_eq!(
            notice_text("pkg 0.9", &yanked),
            "- This version has been yanked from the registry: 'bad tags'"
        );

        let python = Notice::IncompatiblePython {
            requires: ">=3.8".to_string(),
            current: "3.7.17".to_string(),
        };
        assert_eq!(
            notice_text("pkg 0.9", &python),
            "- 'pkg 0.9' is incompatible with your current Python version \
             (using '3.7.17', requires '>=3.8')"
        );
    }

    #[test]
    fn test_tables_split_by_kind() {
        let catalog = classify(&[
            artifact("pkg-1.0-py3-none-any.whl", DistType::Wheel, 2_000_000),
            artifact("pkg-1.0.tar.gz", DistType::Sdist, 500_000),
        ]);
        let (wheels, others): (Vec<_>, Vec<_>) =
            catalog.iter().partition(|entry| entry.tags.is_some());

        let wheel_text = wheel_table(&wheels).to_string();
        assert!(wheel_text.contains("py3"));
        assert!(wheel_text.contains("1.9 MiB"));

        let other_text = other_table(&others).to_string();
        assert!(other_text.contains("pkg-1.0.tar.gz"));
        assert!(other_text.contains("488.2 KiB"));
    }
}
