// Scandecode CLI
// Replays recorded raw scan code batches through the decoder

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use scandecode_core::settings::{default_settings_content, Settings, UnrecognizedPolicy};
use scandecode_core::{decode, parse_trace, CanonicalKeyEvent, DecodeError};

/// Decode recorded PC scan code traces into canonical key events
#[derive(Parser, Debug)]
#[command(name = "scandecode")]
#[command(version)]
#[command(about = "Decode recorded PC scan code traces", long_about = None)]
struct Args {
    /// Trace file with one batch of code:flag tokens per line (stdin if omitted)
    #[arg(short, long, value_name = "TRACE")]
    trace: Option<PathBuf>,

    /// TOML settings file (default: ~/.config/scandecode/settings.toml)
    #[arg(short, long, value_name = "SETTINGS")]
    settings: Option<PathBuf>,

    /// Print key names next to ids, overriding the settings file
    #[arg(short, long)]
    names: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_settings: bool,

    /// Print a default settings file and exit
    #[arg(long)]
    print_default_settings: bool,
}

/// Main application state
struct Application {
    settings: Settings,
    args: Args,
}

/// Replay outcome counters
#[derive(Debug, Default, PartialEq, Eq)]
struct ReplayStats {
    decoded: usize,
    dropped: usize,
}

impl Application {
    fn new(args: Args) -> anyhow::Result<Self> {
        let mut settings = match &args.settings {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load_default().context("loading default settings")?,
        };
        if args.names {
            settings.set_show_names(true);
        }

        log::debug!("settings: {:?}", settings);
        Ok(Self { settings, args })
    }

    fn read_trace(&self) -> anyhow::Result<String> {
        match &self.args.trace {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading trace {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("reading trace from stdin")?;
                Ok(text)
            }
        }
    }

    fn run(&self) -> anyhow::Result<()> {
        let text = self.read_trace()?;
        let stdout = io::stdout();
        let stats = self.replay(&text, &mut stdout.lock())?;
        log::info!(
            "decoded {} batches, dropped {}",
            stats.decoded,
            stats.dropped
        );
        Ok(())
    }

    fn replay(&self, text: &str, out: &mut impl Write) -> anyhow::Result<ReplayStats> {
        let batches = parse_trace(text)?;
        let mut stats = ReplayStats::default();

        for (line, batch) in batches {
            match decode(&batch) {
                Ok(event) => {
                    stats.decoded += 1;
                    writeln!(out, "{}", self.format_event(line, event))?;
                }
                Err(err @ DecodeError::UnrecognizedCombination { .. }) => {
                    match self.settings.on_unrecognized() {
                        UnrecognizedPolicy::Drop => {
                            log::warn!("line {}: dropping batch: {}", line, err);
                            stats.dropped += 1;
                        }
                        UnrecognizedPolicy::Fail => bail!("line {}: {}", line, err),
                    }
                }
                Err(err) => bail!("line {}: {}", line, err),
            }
        }

        Ok(stats)
    }

    fn format_event(&self, line: usize, event: CanonicalKeyEvent) -> String {
        let state = if event.pressed { "pressed" } else { "released" };
        if self.settings.show_names() {
            format!("{}: {} {} {}", line, event.key.code(), event.key, state)
        } else {
            format!("{}: {} {}", line, event.key.code(), state)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.print_default_settings {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let app = Application::new(args)?;

    if app.args.check_settings {
        println!("Settings are valid");
        return Ok(());
    }

    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(settings: Settings) -> Application {
        Application {
            settings,
            args: Args::parse_from(["scandecode"]),
        }
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["scandecode", "--trace", "/tmp/keys.trace"]);

        assert_eq!(args.trace, Some(PathBuf::from("/tmp/keys.trace")));
        assert!(args.settings.is_none());
        assert!(!args.names);
        assert!(!args.verbose);
        assert!(!args.check_settings);
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "scandecode",
            "--settings",
            "/tmp/settings.toml",
            "--verbose",
            "--names",
            "--check-settings",
        ]);

        assert_eq!(args.settings, Some(PathBuf::from("/tmp/settings.toml")));
        assert!(args.verbose);
        assert!(args.names);
        assert!(args.check_settings);
    }

    #[test]
    fn test_replay_prints_events() {
        let app = app_with(Settings::new());
        let mut out = Vec::new();
        let stats = app
            .replay(
                "28:Down\n42:ExtendedDown 71:ExtendedDown\n29:E1Up 69:Up\n",
                &mut out,
            )
            .unwrap();

        assert_eq!(stats, ReplayStats { decoded: 3, dropped: 0 });
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1: 28 Enter pressed\n2: 327 Home pressed\n3: 69 Pause released\n"
        );
    }

    #[test]
    fn test_replay_without_names() {
        let mut settings = Settings::new();
        settings.set_show_names(false);
        let app = app_with(settings);
        let mut out = Vec::new();
        app.replay("54:Up\n", &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1: 310 released\n");
    }

    #[test]
    fn test_replay_drops_unrecognized() {
        let app = app_with(Settings::new());
        let mut out = Vec::new();
        let stats = app.replay("30:Down 31:Down\n30:Up\n", &mut out).unwrap();

        assert_eq!(stats, ReplayStats { decoded: 1, dropped: 1 });
    }

    #[test]
    fn test_replay_fails_on_unrecognized() {
        let mut settings = Settings::new();
        settings.set_on_unrecognized(UnrecognizedPolicy::Fail);
        let app = app_with(settings);
        let mut out = Vec::new();
        let err = app.replay("30:Down 31:Down\n", &mut out).unwrap_err();

        assert!(err.to_string().starts_with("line 1:"));
    }

    #[test]
    fn test_replay_fails_on_malformed() {
        let app = app_with(Settings::new());
        let mut out = Vec::new();
        assert!(app.replay("42:ExtendedDown 71:ExtendedUp\n", &mut out).is_err());
        assert!(app.replay("1:Down 2:Down 3:Down\n", &mut out).is_err());
    }

    #[test]
    fn test_replay_reports_trace_errors() {
        let app = app_with(Settings::new());
        let mut out = Vec::new();
        let err = app.replay("28:Down\n28:Sideways\n", &mut out).unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }
}
