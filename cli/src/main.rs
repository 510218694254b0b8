use bosskill_cli::commands;
use bosskill_cli::logging;
use bosskill_cli::readline;
use bosskill_cli::CliContext;
use clap::{Parser, Subcommand};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();

    let ctx = CliContext::new().map_err(|e| commands::describe(&e))?;
    println!("bosskill - type `help` for commands");

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Boss kill challenge tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List bosses and whether they can be drawn
    Bosses,
    /// Flip a boss between enabled and disabled
    Toggle {
        #[arg(short, long)]
        name: String,
    },
    Enable {
        #[arg(short, long)]
        name: String,
    },
    Disable {
        #[arg(short, long)]
        name: String,
    },
    /// Enable every boss again
    ResetOverrides,
    /// Draw a new challenge, replacing any pending one
    Generate,
    /// Show the pending challenge
    Current,
    /// Mark the pending challenge as done
    Complete,
    /// Completed challenges, newest first
    History {
        #[arg(long)]
        all: bool,
    },
    /// Delete by `#` from the last history listing
    Delete {
        #[arg(short, long)]
        index: usize,
    },
    /// Delete by sequence number
    DeleteEntry {
        #[arg(short, long)]
        seq: u64,
    },
    Config,
    SetDataDir {
        #[arg(short, long)]
        path: String,
    },
    /// Use a TOML boss roster; omit the path to go back to the built-in one
    SetCatalog {
        #[arg(short, long)]
        path: Option<String>,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "bosskill".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Bosses) => commands::list_bosses(ctx).await?,
        Some(Commands::Toggle { name }) => commands::toggle_boss(name, ctx).await?,
        Some(Commands::Enable { name }) => commands::set_boss_enabled(name, true, ctx).await?,
        Some(Commands::Disable { name }) => commands::set_boss_enabled(name, false, ctx).await?,
        Some(Commands::ResetOverrides) => commands::reset_overrides(ctx).await?,
        Some(Commands::Generate) => commands::generate(ctx).await?,
        Some(Commands::Current) => commands::show_current(ctx).await?,
        Some(Commands::Complete) => commands::complete(ctx).await?,
        Some(Commands::History { all }) => commands::show_history(*all, ctx).await?,
        Some(Commands::Delete { index }) => commands::delete_shown(*index, ctx).await?,
        Some(Commands::DeleteEntry { seq }) => commands::delete_entry(*seq, ctx).await?,
        Some(Commands::Config) => commands::show_settings(ctx).await?,
        Some(Commands::SetDataDir { path }) => commands::set_data_directory(path, ctx).await?,
        Some(Commands::SetCatalog { path }) => {
            commands::set_catalog(path.as_deref(), ctx).await?
        }
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Commands> {
        let mut args = shlex::split(line).unwrap();
        args.insert(0, "bosskill".to_string());
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn quoted_boss_names_stay_whole() {
        match parse("toggle -n \"King Black Dragon\"") {
            Some(Commands::Toggle { name }) => assert_eq!(name, "King Black Dragon"),
            _ => panic!("expected toggle"),
        }
    }

    #[test]
    fn history_all_flag() {
        assert!(matches!(parse("history"), Some(Commands::History { all: false })));
        assert!(matches!(parse("history --all"), Some(Commands::History { all: true })));
    }

    #[test]
    fn set_catalog_path_is_optional() {
        assert!(matches!(parse("set-catalog"), Some(Commands::SetCatalog { path: None })));
        match parse("set-catalog -p bosses.toml") {
            Some(Commands::SetCatalog { path }) => assert_eq!(path.as_deref(), Some("bosses.toml")),
            _ => panic!("expected set-catalog"),
        }
    }

    #[test]
    fn delete_requires_index() {
        let args = ["bosskill", "delete"];
        assert!(Cli::try_parse_from(args).is_err());
        assert!(matches!(parse("delete -i 2"), Some(Commands::Delete { index: 2 })));
    }
}
