//! Command line entry points
//!
//! - `serve`: run the Bot Framework endpoint
//! - `ask`: answer one question from the terminal

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

/// FAQ Plus bot - knowledge base answers for Teams
#[derive(Parser)]
#[command(name = "faqplus-bot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the bot HTTP server
    Serve,

    /// Answer a single question and print the result
    Ask(ask::AskArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["faqplus-bot", "ask", "VPN", "nedir?"]).unwrap();

        match cli.command {
            Command::Ask(args) => assert_eq!(args.question(), "VPN nedir?"),
            Command::Serve => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["faqplus-bot", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["faqplus-bot", "ask"]).is_err());
    }
}
