//! Command-line interface definitions for dateline.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the dateline application.
///
/// # Examples
///
/// ```sh
/// # Fetch one or more articles and print a JSON report
/// dateline https://lite.cnn.com/2025/05/06/article-slug
///
/// # Extract from a local HTML file (the URL still feeds the URL-date check)
/// dateline --html-file page.html https://example.com/2023/04/15/headline
///
/// # Write a pretty-printed report to a file
/// dateline --pretty -o report.json https://example.com/article
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article URLs to extract dates from
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Read HTML from a local file instead of fetching (requires exactly one URL)
    #[arg(long)]
    pub html_file: Option<String>,

    /// Write the JSON report to this path instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// User-Agent header sent when fetching pages
    #[arg(long, env = "DATELINE_USER_AGENT", default_value = "dateline/0.1")]
    pub user_agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(&[
            "dateline",
            "--output",
            "report.json",
            "--pretty",
            "https://example.com/article",
        ]);

        assert_eq!(cli.urls, vec!["https://example.com/article"]);
        assert_eq!(cli.output.as_deref(), Some("report.json"));
        assert!(cli.pretty);
        assert_eq!(cli.html_file, None);
    }

    #[test]
    fn test_cli_multiple_urls() {
        let cli = Cli::parse_from(&[
            "dateline",
            "https://example.com/a",
            "https://example.com/b",
        ]);

        assert_eq!(cli.urls.len(), 2);
        assert_eq!(cli.user_agent, "dateline/0.1");
    }

    #[test]
    fn test_cli_html_file() {
        let cli = Cli::parse_from(&[
            "dateline",
            "--html-file",
            "page.html",
            "https://example.com/2023/04/15/headline",
        ]);

        assert_eq!(cli.html_file.as_deref(), Some("page.html"));
    }

    #[test]
    fn test_cli_requires_urls() {
        assert!(Cli::try_parse_from(&["dateline"]).is_err());
    }
}
