use std::path::PathBuf;

use clap::Parser;

/// Turn text into a presentation styled by your own PowerPoint template.
///
/// Required fields are checked before anything is sent; a missing one
/// fails with the same message the web form shows.
#[derive(Parser, Debug, Default)]
#[command(name = "decksmith")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Text or Markdown to turn into slides
    #[arg(long, conflicts_with = "text_file")]
    pub text: Option<String>,

    /// Read the text from a file (`-` reads stdin)
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Optional guidance, e.g. "Turn this into an investor pitch deck"
    #[arg(short, long, default_value = "")]
    pub guidance: String,

    /// API key passed through to the backend; never stored or logged
    #[arg(long, env = "DECKSMITH_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// PowerPoint template (.pptx or .potx)
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Backend base URL (overrides the config file)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Directory the generated presentation is saved into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Whole-request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra attempts after a network failure or timeout
    #[arg(long)]
    pub retries: Option<u32>,

    /// Configuration file (default: ./decksmith.ron if present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_form_fields_and_overrides() {
        let args = Args::try_parse_from([
            "decksmith",
            "--text",
            "Hello",
            "--api-key",
            "k",
            "-t",
            "brand.pptx",
            "--endpoint",
            "http://localhost:8080",
            "--timeout",
            "30",
        ])
        .unwrap();

        assert_eq!(args.text.as_deref(), Some("Hello"));
        assert_eq!(args.guidance, "");
        assert_eq!(args.api_key, "k");
        assert_eq!(args.template, Some(PathBuf::from("brand.pptx")));
        assert_eq!(args.endpoint.as_deref(), Some("http://localhost:8080"));
        assert_eq!(args.timeout, Some(30));
    }

    #[test]
    fn text_and_text_file_conflict() {
        let result =
            Args::try_parse_from(["decksmith", "--text", "a", "--text-file", "notes.md"]);
        assert!(result.is_err());
    }
}
