pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shortreel")]
#[command(about = "A terminal short-video feed with search and profiles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default)
    Tui,
    /// Search all configured sources and print the merged results
    Search {
        /// Search keywords
        query: String,
    },
    /// Fetch the video feed and list it
    Feed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["shortreel"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_search_takes_query() {
        let cli = Cli::try_parse_from(["shortreel", "search", "rust lang"]).unwrap();
        match cli.command {
            Some(Commands::Search { query }) => assert_eq!(query, "rust lang"),
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(Cli::try_parse_from(["shortreel", "search"]).is_err());
    }
}
