//! CLI argument parsing using Clap.

use std::path::PathBuf;

use clap::Parser;

/// Keyboard-driven Trello card launcher
#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "cardfind")]
#[command(version, about, long_about = None)]
#[command(after_help = "Without a query, reads one query per line from stdin:
  !<n>      run the action of result <n>
  :reload   reload the config file
  <empty>   clear results")]
pub struct Args {
    /// Config file to load instead of the default location
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,

    /// Query to run once, e.g. `tr fix bug`
    #[arg(trailing_var_arg = true)]
    pub query: Vec<String>,
}

impl Args {
    /// The one-shot query, if any words were given.
    pub fn query(&self) -> Option<String> {
        (!self.query.is_empty()).then(|| self.query.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_options_and_query() {
        let args = Args::try_parse_from([
            "cardfind",
            "--config",
            "/tmp/c.toml",
            "--json",
            "tr",
            "fix",
            "bug",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(args.json);
        assert_eq!(args.query().as_deref(), Some("tr fix bug"));
    }

    #[test]
    fn it_parses_interactive_mode() {
        let args = Args::try_parse_from(["cardfind"]).unwrap();
        assert_eq!(args, Args::default());
        assert_eq!(args.query(), None);
    }

    #[test]
    fn it_keeps_dashes_in_query() {
        let args = Args::try_parse_from(["cardfind", "tr", "sort:-created"]).unwrap();
        assert_eq!(args.query().as_deref(), Some("tr sort:-created"));

        // options are only read before the first query word
        let args = Args::try_parse_from(["cardfind", "tr", "-x", "--json"]).unwrap();
        assert_eq!(args.query().as_deref(), Some("tr -x --json"));
        assert!(!args.json);

        let args = Args::try_parse_from(["cardfind", "--", "-x", "--json"]).unwrap();
        assert_eq!(args.query().as_deref(), Some("-x --json"));
        assert!(!args.json);
    }

    #[test]
    fn it_rejects_bad_options() {
        assert!(Args::try_parse_from(["cardfind", "--config"]).is_err());
        assert!(Args::try_parse_from(["cardfind", "--verbose"]).is_err());
    }
}
