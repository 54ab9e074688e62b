use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use cardfind_config::Config;
use cardfind_plugin::ResultItem;

use crate::plugin_store::PluginStore;

/// What a line of interactive input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Query(&'a str),
    Execute(usize),
    Reload,
    Clear,
}

impl<'a> Input<'a> {
    pub fn parse(line: &'a str) -> anyhow::Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            return Ok(Self::Clear);
        }

        if line.trim() == ":reload" {
            return Ok(Self::Reload);
        }

        if let Some(index) = line.trim().strip_prefix('!') {
            let index = index
                .trim()
                .parse::<usize>()
                .with_context(|| format!("`{index}` is not a result number"))?;
            return Ok(Self::Execute(index));
        }

        Ok(Self::Query(line))
    }
}

pub struct App {
    config_path: Option<PathBuf>,
    config: Config,
    store: PluginStore,
    results: Vec<ResultItem>,
    json: bool,
}

impl App {
    pub fn new(config_path: Option<PathBuf>, json: bool) -> anyhow::Result<Self> {
        let config = Self::load_config(config_path.as_ref())?;
        let mut store = PluginStore::all(&config)?;
        smol::block_on(store.reload(&config));

        Ok(Self {
            config_path,
            config,
            store,
            results: Vec::new(),
            json,
        })
    }

    fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
        match path {
            Some(path) => Config::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => Ok(Config::load_with_fallback()),
        }
    }

    pub fn reload(&mut self) -> anyhow::Result<()> {
        self.config = Self::load_config(self.config_path.as_ref())?;
        smol::block_on(self.store.reload(&self.config));
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self))]
    pub fn query(&mut self, query: &str) -> &[ResultItem] {
        let max_results = self.config.general.max_results;

        let mut results = Vec::with_capacity(max_results);
        smol::block_on(self.store.query(query, &mut results));

        // stable sort keeps each plugin's own order for equal scores
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(max_results);

        self.results = results;
        &self.results
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }

    /// Runs the action of the result at `index`, 1-based as printed.
    pub fn execute(&self, index: usize) -> anyhow::Result<()> {
        let item = index
            .checked_sub(1)
            .and_then(|i| self.results.get(i))
            .with_context(|| format!("No result number {index}"))?;

        let Some(action) = &item.action else {
            anyhow::bail!("`{}` has no action", item.primary_text);
        };

        tracing::info!("running `{}` for {}", action.description(), item.id);
        action.run()
    }

    pub fn print(&self, out: &mut impl Write) -> anyhow::Result<()> {
        if self.json {
            serde_json::to_writer(&mut *out, &self.results)?;
            writeln!(out)?;
        } else {
            render(&self.results, out)?;
        }

        out.flush().map_err(Into::into)
    }
}

/// Writes results as numbered lines.
pub fn render(results: &[ResultItem], out: &mut impl Write) -> std::io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "No results");
    }

    for (i, item) in results.iter().enumerate() {
        write!(out, "{:>2}. {}", i + 1, item.primary_text)?;
        if let Some(action) = &item.action {
            write!(out, "  ({})", action.description())?;
        }
        writeln!(out)?;

        if !item.secondary_text.is_empty() {
            writeln!(out, "    {}", item.secondary_text)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use cardfind_plugin::{Action, BuiltinIcon, Plugin, PluginQueryOutput};

    use super::*;

    /// Returns `card-0..card-6` in order, all with the same score.
    struct Cards;

    #[async_trait::async_trait]
    impl Plugin for Cards {
        fn new(_: &Config) -> anyhow::Result<Self> {
            Ok(Self)
        }

        fn name(&self) -> &'static str {
            "Cards"
        }

        async fn query(&mut self, _: &str) -> anyhow::Result<PluginQueryOutput> {
            let items = (0..7).map(|i| item(&format!("card-{i}"), None)).collect::<Vec<_>>();
            Ok(items.into())
        }
    }

    /// Returns a single item scored above everything else.
    struct Pinned;

    #[async_trait::async_trait]
    impl Plugin for Pinned {
        fn new(_: &Config) -> anyhow::Result<Self> {
            Ok(Self)
        }

        fn name(&self) -> &'static str {
            "Pinned"
        }

        async fn query(&mut self, _: &str) -> anyhow::Result<PluginQueryOutput> {
            let mut pinned = item("pinned", None);
            pinned.score = 10;
            Ok(pinned.into())
        }
    }

    fn app_with(max_results: usize) -> App {
        let mut config = Config::default();
        config.general.max_results = max_results;

        App {
            config_path: None,
            config,
            store: PluginStore::new(vec![Cards.into(), Pinned.into()]),
            results: Vec::new(),
            json: false,
        }
    }

    fn texts(results: &[ResultItem]) -> Vec<&str> {
        results.iter().map(|r| r.primary_text.as_str()).collect()
    }

    #[test]
    fn query_caps_results_and_keeps_plugin_order() {
        let mut app = app_with(4);

        let results = app.query("bug");
        assert_eq!(texts(results), ["pinned", "card-0", "card-1", "card-2"]);

        let mut app = app_with(24);
        let results = app.query("bug");
        assert_eq!(results.len(), 8);
        assert_eq!(
            texts(&results[1..]),
            ["card-0", "card-1", "card-2", "card-3", "card-4", "card-5", "card-6"]
        );
    }

    #[test]
    fn execute_uses_printed_numbers() {
        let mut app = app_with(4);
        app.query("bug");

        assert!(app.execute(0).is_err());
        assert!(app.execute(5).is_err());
        // items without an action can't be run
        assert!(app.execute(1).is_err());

        app.clear();
        assert!(app.execute(1).is_err());
    }

    fn item(text: &str, action: Option<Action>) -> ResultItem {
        ResultItem {
            id: text.to_owned(),
            icon: BuiltinIcon::Card.into(),
            primary_text: text.to_owned(),
            secondary_text: String::new(),
            tooltip: None,
            action,
            score: 0,
        }
    }

    #[test]
    fn it_parses_input_lines() {
        assert_eq!(Input::parse("tr bug\n").unwrap(), Input::Query("tr bug"));
        assert_eq!(Input::parse("!2").unwrap(), Input::Execute(2));
        assert_eq!(Input::parse(" ! 3 ").unwrap(), Input::Execute(3));
        assert_eq!(Input::parse(":reload").unwrap(), Input::Reload);
        assert_eq!(Input::parse("  \n").unwrap(), Input::Clear);
        assert!(Input::parse("!two").is_err());
    }

    #[test]
    fn it_renders_numbered_results() {
        let results = vec![
            item(
                "[Eng] Fix bug",
                Some(Action::OpenUrl("https://trello.com/c/x".parse().unwrap())),
            ),
            ResultItem::plugin_error("Trello", "boom"),
        ];

        let mut out = Vec::new();
        render(&results, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            " 1. [Eng] Fix bug  (Open in browser)\n 2. Trello\n    boom\n"
        );
    }

    #[test]
    fn it_renders_empty_results() {
        let mut out = Vec::new();
        render(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No results\n");
    }
}
