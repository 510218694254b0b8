use bosskill_core::catalog::{BossCatalog, FileCatalog};
use bosskill_core::context::{AppConfig, AppConfigExt, TrackerError};
use bosskill_core::HistoryEntry;
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use crate::context::{CliContext, ShownEntry};

/// Error message with its full source chain, e.g.
/// "failed to write history /x/history.json: Permission denied"
pub fn describe(err: &TrackerError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

// ─────────────────────────────────────────────────────────────────────────────
// Bosses
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_bosses(ctx: &CliContext) -> Result<(), String> {
    let tracker = ctx.tracker.read().await;
    let bosses = tracker.bosses().map_err(|e| describe(&e))?;
    let default_range = {
        let config = ctx.config.read().await;
        config.default_kill_range()
    };

    println!("{:<4} {:<30} Kills", "", "Boss");
    println!("{}", "-".repeat(45));
    for boss in &bosses {
        let marker = if boss.enabled { "[x]" } else { "[ ]" };
        let range = boss.kill_range().unwrap_or(default_range);
        println!("{:<4} {:<30} {}", marker, boss.name, range);
    }

    let enabled = bosses.iter().filter(|b| b.enabled).count();
    println!("\n{} of {} bosses enabled", enabled, bosses.len());
    Ok(())
}

pub async fn toggle_boss(name: &str, ctx: &CliContext) -> Result<(), String> {
    let enabled = ctx
        .tracker
        .write()
        .await
        .toggle(name)
        .map_err(|e| describe(&e))?;
    println!("{} {}", name, if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub async fn set_boss_enabled(name: &str, enabled: bool, ctx: &CliContext) -> Result<(), String> {
    let mut tracker = ctx.tracker.write().await;
    let known = tracker
        .bosses()
        .map(|bosses| bosses.iter().any(|b| b.name == name))
        .unwrap_or(true);
    tracker
        .set_override(name, enabled)
        .map_err(|e| describe(&e))?;
    if !known {
        println!("Note: {} is not in the current boss list", name);
    }
    println!("{} {}", name, if enabled { "enabled" } else { "disabled" });
    Ok(())
}

pub async fn reset_overrides(ctx: &CliContext) -> Result<(), String> {
    ctx.tracker
        .write()
        .await
        .clear_overrides()
        .map_err(|e| describe(&e))?;
    println!("All bosses enabled");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Challenges
// ─────────────────────────────────────────────────────────────────────────────

pub async fn generate(ctx: &CliContext) -> Result<(), String> {
    let mut tracker = ctx.tracker.write().await;
    let replaced = tracker.pending().is_some();
    let challenge = tracker.generate().map_err(|e| describe(&e))?;
    if replaced {
        println!("(previous challenge discarded)");
    }
    println!("{}", challenge);
    Ok(())
}

pub async fn show_current(ctx: &CliContext) -> Result<(), String> {
    match ctx.tracker.read().await.pending() {
        Some(challenge) => println!("{}", challenge),
        None => println!("No challenge pending. Use `generate` to get one."),
    }
    Ok(())
}

pub async fn complete(ctx: &CliContext) -> Result<(), String> {
    let entry = ctx
        .tracker
        .write()
        .await
        .complete()
        .await
        .map_err(|e| describe(&e))?;
    println!("✓ Completed: {}x {}", entry.kills, entry.boss);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// History
// ─────────────────────────────────────────────────────────────────────────────

/// Print history newest first and remember what was shown for `delete`.
pub async fn show_history(all: bool, ctx: &CliContext) -> Result<(), String> {
    let (entries, offset) = {
        let tracker = ctx.tracker.read().await;
        let full = tracker.history().await.map_err(|e| describe(&e))?;
        let offset = if all {
            0
        } else {
            full.len().saturating_sub(tracker.history_limit())
        };
        (full, offset)
    };

    let shown: Vec<ShownEntry> = entries
        .iter()
        .enumerate()
        .skip(offset)
        .rev()
        .map(|(index, entry)| ShownEntry {
            index,
            seq: entry.seq,
        })
        .collect();

    if shown.is_empty() {
        println!("No completed challenges yet!");
    } else {
        println!("{:<4} {:<6} {:<20} Challenge", "#", "Seq", "Completed");
        println!("{}", "-".repeat(60));
        for (position, row) in shown.iter().enumerate() {
            print_entry(position, &entries[row.index]);
        }
        if offset > 0 {
            println!("\n({} older entries hidden, use --all)", offset);
        }
    }

    *ctx.last_listing.lock().await = shown;
    Ok(())
}

fn print_entry(position: usize, entry: &HistoryEntry) {
    println!(
        "{:<4} {:<6} {:<20} {}x {}",
        position,
        entry.seq,
        entry.completed.format("%Y-%m-%d %H:%M:%S"),
        entry.kills,
        entry.boss
    );
}

/// Delete by the `#` column of the last `history` listing. The entry's
/// sequence number is checked first, so a listing that has gone stale can't
/// delete the wrong row.
pub async fn delete_shown(position: usize, ctx: &CliContext) -> Result<(), String> {
    let row = {
        let listing = ctx.last_listing.lock().await;
        if listing.is_empty() {
            return Err("Run `history` first to see entry numbers".to_string());
        }
        listing.get(position).copied().ok_or_else(|| {
            format!(
                "No entry #{} in the last listing ({} shown)",
                position,
                listing.len()
            )
        })?
    };

    let removed = ctx
        .tracker
        .read()
        .await
        .delete_at_checked(row.index, row.seq)
        .await
        .map_err(|e| describe(&e))?;

    ctx.last_listing.lock().await.clear();
    println!("Deleted {}x {} (seq {})", removed.kills, removed.boss, removed.seq);
    Ok(())
}

pub async fn delete_entry(seq: u64, ctx: &CliContext) -> Result<(), String> {
    let removed = ctx
        .tracker
        .read()
        .await
        .delete_entry(seq)
        .await
        .map_err(|e| describe(&e))?;
    ctx.last_listing.lock().await.clear();
    println!("Deleted {}x {} (seq {})", removed.kills, removed.boss, removed.seq);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    let config = ctx.config.read().await;
    println!("Data directory:  {}", config.data_dir().display());
    println!(
        "Boss catalog:    {}",
        config.catalog_file.as_deref().unwrap_or("(built-in)")
    );
    println!("History shown:   {}", config.history_limit);
    println!("Default kills:   {}", config.default_kill_range());
    Ok(())
}

pub async fn set_data_directory(path: &str, ctx: &CliContext) -> Result<(), String> {
    let dir = PathBuf::from(path);
    if dir.exists() && !dir.is_dir() {
        return Err(format!("{} is not a directory", dir.display()));
    }

    let mut config = ctx.config.read().await.clone();
    if config.data_directory == path {
        println!("Data directory already set to {}", path);
        return Ok(());
    }
    config.data_directory = path.to_string();
    save_and_apply(config, ctx).await?;
    println!("Data directory set to {}", path);
    Ok(())
}

pub async fn set_catalog(path: Option<&str>, ctx: &CliContext) -> Result<(), String> {
    if let Some(path) = path {
        let bosses = FileCatalog::new(path)
            .bosses()
            .map_err(|e| describe(&e.into()))?;
        println!("Loaded {} bosses from {}", bosses.len(), path);
    }

    let mut config = ctx.config.read().await.clone();
    config.catalog_file = path.map(String::from);
    save_and_apply(config, ctx).await?;
    println!("Boss catalog set to {}", path.unwrap_or("(built-in)"));
    Ok(())
}

async fn save_and_apply(config: AppConfig, ctx: &CliContext) -> Result<(), String> {
    ctx.apply_config(config.clone())
        .await
        .map_err(|e| describe(&e))?;
    config.save().map_err(|e| describe(&e.into()))
}

pub fn exit() {
    println!("quitting...");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosskill_core::Challenge;
    use bosskill_core::challenge::ChallengeError;
    use bosskill_core::history::HistoryError;

    #[test]
    fn describe_includes_source_chain() {
        let err = TrackerError::History(HistoryError::Write {
            path: PathBuf::from("/x/history.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
        });
        assert_eq!(
            describe(&err),
            "failed to write history /x/history.json: Permission denied"
        );
    }

    #[test]
    fn describe_plain_error() {
        let err = TrackerError::Challenge(ChallengeError::NoEligibleBosses);
        assert_eq!(describe(&err), "No bosses enabled");
    }

    fn context_in(dir: &tempfile::TempDir, history_limit: usize) -> CliContext {
        let config = AppConfig {
            history_limit,
            ..AppConfig::with_data_directory(dir.path().to_string_lossy().into_owned())
        };
        CliContext::with_config(config).unwrap()
    }

    async fn record_all(ctx: &CliContext, kills: &[u32]) {
        let mut tracker = ctx.tracker.write().await;
        for &kills in kills {
            let challenge = Challenge {
                boss: "Zulrah".to_string(),
                kills,
            };
            tracker.record(challenge).await.unwrap();
        }
    }

    async fn remaining_kills(ctx: &CliContext) -> Vec<u32> {
        let tracker = ctx.tracker.read().await;
        tracker
            .history()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.kills)
            .collect()
    }

    #[tokio::test]
    async fn delete_first_shown_row_removes_newest_entry() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, 20);
        record_all(&ctx, &[1, 2, 3]).await;

        show_history(false, &ctx).await.unwrap();
        delete_shown(0, &ctx).await.unwrap();

        assert_eq!(remaining_kills(&ctx).await, [1, 2]);
    }

    #[tokio::test]
    async fn shown_positions_account_for_hidden_entries() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, 2);
        record_all(&ctx, &[1, 2, 3, 4]).await;

        show_history(false, &ctx).await.unwrap();
        assert_eq!(ctx.last_listing.lock().await.len(), 2);
        delete_shown(1, &ctx).await.unwrap();
        assert_eq!(remaining_kills(&ctx).await, [1, 2, 4]);

        show_history(true, &ctx).await.unwrap();
        assert!(delete_shown(3, &ctx).await.is_err());
        delete_shown(2, &ctx).await.unwrap();
        assert_eq!(remaining_kills(&ctx).await, [2, 4]);
    }

    #[tokio::test]
    async fn stale_listing_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, 20);
        record_all(&ctx, &[1, 2, 3]).await;

        show_history(false, &ctx).await.unwrap();
        // Shown newest first: kills 3, 2, 1. Remove the oldest behind the listing's back.
        ctx.tracker.read().await.delete_at(0).await.unwrap();

        assert!(delete_shown(1, &ctx).await.is_err());
        assert!(delete_shown(0, &ctx).await.is_err());
        assert_eq!(remaining_kills(&ctx).await, [2, 3]);
    }

    #[tokio::test]
    async fn delete_without_listing_asks_for_history() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir, 20);
        record_all(&ctx, &[1]).await;

        let err = delete_shown(0, &ctx).await.unwrap_err();
        assert!(err.contains("history"));
        assert_eq!(remaining_kills(&ctx).await, [1]);
    }
}
