use std::process::Command;
use std::sync::OnceLock;

use anyhow::Context;
use cardfind_utils::StringExt;

/// A terminal emulator invocation: the binary and the flag it takes before a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub exec: String,
    pub exec_arg: String,
}

impl Terminal {
    pub fn new(exec: impl Into<String>, exec_arg: impl Into<String>) -> Self {
        Self {
            exec: exec.into(),
            exec_arg: exec_arg.into(),
        }
    }

    /// Used when the desktop setting can't be read.
    pub fn fallback() -> Self {
        Self::new("x-terminal-emulator", "-e")
    }

    /// Builds the command line that runs `command` inside this terminal.
    ///
    /// `exec` is quoted when it contains whitespace, `exec_arg` is passed as is.
    pub fn wrap(&self, command: &str) -> String {
        let exec = if self.exec.contains(char::is_whitespace) {
            self.exec.single_quoted()
        } else {
            self.exec.clone()
        };

        [exec.as_str(), self.exec_arg.as_str(), command]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A place to read the user's default terminal from.
pub trait TerminalSettings: Send + Sync {
    fn read(&self) -> anyhow::Result<Terminal>;
}

impl TerminalSettings for Terminal {
    fn read(&self) -> anyhow::Result<Terminal> {
        Ok(self.clone())
    }
}

/// GNOME's `org.gnome.desktop.default-applications.terminal` schema.
#[derive(Debug, Default)]
pub struct GSettings;

impl GSettings {
    const SCHEMA: &str = "org.gnome.desktop.default-applications.terminal";

    fn get(key: &str) -> anyhow::Result<String> {
        let output = Command::new("gsettings")
            .args(["get", Self::SCHEMA, key])
            .output()
            .context("Failed to run gsettings")?;

        if !output.status.success() {
            anyhow::bail!(
                "gsettings get {} {key} failed: {}",
                Self::SCHEMA,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(parse_gvariant_string(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl TerminalSettings for GSettings {
    fn read(&self) -> anyhow::Result<Terminal> {
        let exec = Self::get("exec")?;
        if exec.is_empty() {
            anyhow::bail!("{} exec is empty", Self::SCHEMA);
        }

        let exec_arg = Self::get("exec-arg")?;
        Ok(Terminal::new(exec, exec_arg))
    }
}

/// Strips the quotes `gsettings` prints around string values and undoes
/// their backslash escapes.
fn parse_gvariant_string(raw: &str) -> String {
    let raw = raw.trim();

    for quote in ['\'', '"'] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|r| r.strip_suffix(quote))
        {
            return unescape(inner);
        }
    }

    raw.to_owned()
}

fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Resolves the default terminal once and serves the cached value afterwards.
///
/// A failed read falls back to [`Terminal::fallback`], which is cached too,
/// so a change to the desktop setting is only seen after a restart.
pub struct TerminalResolver {
    settings: Box<dyn TerminalSettings>,
    terminal: OnceLock<Terminal>,
}

impl std::fmt::Debug for TerminalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalResolver")
            .field("terminal", &self.terminal.get())
            .finish()
    }
}

impl TerminalResolver {
    pub fn new<S: TerminalSettings + 'static>(settings: S) -> Self {
        Self {
            settings: Box::new(settings),
            terminal: OnceLock::new(),
        }
    }

    pub fn get_default_terminal(&self) -> &Terminal {
        self.terminal.get_or_init(|| {
            self.settings
                .read()
                .inspect(|t| tracing::debug!("resolved default terminal: {t:?}"))
                .unwrap_or_else(|e| {
                    let fallback = Terminal::fallback();
                    tracing::warn!(
                        "Failed to read default terminal, falling back to `{}`: {e:#}",
                        fallback.exec
                    );
                    fallback
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct CountingSettings {
        reads: Arc<AtomicUsize>,
        result: Option<Terminal>,
    }

    impl TerminalSettings for CountingSettings {
        fn read(&self) -> anyhow::Result<Terminal> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| anyhow::anyhow!("no such schema"))
        }
    }

    #[test]
    fn it_reads_settings_once() {
        let reads = Arc::new(AtomicUsize::new(0));
        let resolver = TerminalResolver::new(CountingSettings {
            reads: reads.clone(),
            result: Some(Terminal::new("gnome-terminal", "--")),
        });

        let first = resolver.get_default_terminal().clone();
        let second = resolver.get_default_terminal();

        assert_eq!(&first, second);
        assert_eq!(first, Terminal::new("gnome-terminal", "--"));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn it_caches_the_fallback() {
        let reads = Arc::new(AtomicUsize::new(0));
        let resolver = TerminalResolver::new(CountingSettings {
            reads: reads.clone(),
            result: None,
        });

        assert_eq!(resolver.get_default_terminal(), &Terminal::fallback());
        assert_eq!(resolver.get_default_terminal(), &Terminal::fallback());
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn it_wraps_commands() {
        let terminal = Terminal::new("gnome-terminal", "--");
        assert_eq!(terminal.wrap("htop"), "gnome-terminal -- htop");

        let terminal = Terminal::new("kitty", "");
        assert_eq!(terminal.wrap("htop"), "kitty htop");

        let terminal = Terminal::new("/opt/My Term/term", "-e");
        assert_eq!(terminal.wrap("htop"), "'/opt/My Term/term' -e htop");
    }

    #[test]
    fn it_parses_gvariant_strings() {
        assert_eq!(parse_gvariant_string("'gnome-terminal'\n"), "gnome-terminal");
        assert_eq!(parse_gvariant_string("\"it's\"\n"), "it's");
        assert_eq!(parse_gvariant_string("''\n"), "");
        assert_eq!(parse_gvariant_string("kitty"), "kitty");
    }

    #[test]
    fn it_unescapes_gvariant_strings() {
        assert_eq!(parse_gvariant_string(r"'it\'s'"), "it's");
        assert_eq!(parse_gvariant_string(r"'C:\\term'"), r"C:\term");
        assert_eq!(parse_gvariant_string(r#""say \"hi\"""#), r#"say "hi""#);
    }
}
