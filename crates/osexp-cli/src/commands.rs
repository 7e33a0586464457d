//! Subcommand execution.
//!
//! Each command writes its report to `out`. Query results that find nothing
//! (empty search, nothing to restore, no match) are reported as text and
//! return `Ok`; only real failures come back as errors.

use std::io::Write;
use std::path::{Path, PathBuf};

use osexp_core::trash::{resolve_root, trash_dir_for};
use osexp_core::{
    build_tree, disk_usage, disk_usage_children, filter_hidden, move_to_trash, read_directory,
    render_tree, restore, restore_candidates, search_by_name, sort_entries, stat_entry, Config,
    RestoreOutcome, SortDirection,
};

use crate::cli::Command;
use crate::render::{du_line, info_lines, list_line, trash_line};

pub fn execute(command: &Command, config: &Config, out: &mut dyn Write) -> anyhow::Result<()> {
    let general = &config.general;
    match command {
        Command::List { path, all, reverse } => {
            let entries = filter_hidden(&read_directory(path)?, *all || general.show_hidden);
            let direction = if *reverse {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let sorted = sort_entries(
                &entries,
                config.sort_field()?,
                direction,
                general.sort_dir_first,
            );
            for entry in &sorted {
                writeln!(out, "{}", list_line(entry))?;
            }
        }
        Command::Info { path } => {
            let entry = stat_entry(path)?;
            for line in info_lines(&entry, &general.date_format) {
                writeln!(out, "{line}")?;
            }
        }
        Command::Tree { path, depth, all } => {
            let entries = build_tree(
                path,
                depth.or(config.tree.max_depth),
                *all || general.show_hidden,
            )?;
            writeln!(out, "{}", path.display())?;
            for line in render_tree(&entries) {
                writeln!(out, "{line}")?;
            }
        }
        Command::Search {
            path,
            name_substring,
            all,
        } => {
            let hits = search_by_name(path, name_substring, *all || general.show_hidden)?;
            if hits.is_empty() {
                writeln!(
                    out,
                    "no matches for '{name_substring}' under {}",
                    path.display()
                )?;
            }
            for hit in hits {
                writeln!(out, "{}", hit.display())?;
            }
        }
        Command::Rm { path, root } => {
            let root = trash_root(root.as_deref(), config);
            let outcome = move_to_trash(path, root.as_deref())?;
            writeln!(
                out,
                "moved {} to {}",
                path.display(),
                outcome.trashed_path.display()
            )?;
        }
        Command::Restore { name, root } => {
            let root = trash_root(root.as_deref(), config);
            match restore(name, root.as_deref())? {
                RestoreOutcome::Restored { to, .. } => {
                    writeln!(out, "restored {}", to.display())?;
                }
                RestoreOutcome::NothingToRestore => {
                    let trash = trash_dir_for(&resolve_root(root.as_deref()));
                    writeln!(out, "nothing to restore: {} has no manifest", trash.display())?;
                }
                RestoreOutcome::NoMatch => {
                    writeln!(out, "no trashed item matches '{name}'")?;
                }
            }
        }
        Command::Du { path, all } => {
            if *all && path.is_dir() {
                for usage in disk_usage_children(path, true)? {
                    let label = usage.entry.path().display().to_string();
                    writeln!(out, "{}", du_line(usage.bytes, &label))?;
                }
            }
            let total = disk_usage(path)?;
            writeln!(out, "{}", du_line(total, &path.display().to_string()))?;
        }
        Command::TrashList { root } => {
            let root = trash_root(root.as_deref(), config);
            let records = restore_candidates(root.as_deref())?;
            if records.is_empty() {
                writeln!(out, "trash is empty")?;
            }
            for record in &records {
                writeln!(out, "{}", trash_line(record, &general.date_format))?;
            }
        }
    }
    Ok(())
}

/// `--root` wins over `[trash] root`; `None` means the current directory.
fn trash_root(flag: Option<&Path>, config: &Config) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.trash.root.clone())
}
