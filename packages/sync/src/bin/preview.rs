//! Standalone preview consumer: watches a snapshot directory and logs each
//! document revision as the editor writes it.

use anyhow::Context;
use pagecraft_sync::{FileMedium, SnapshotStore, SnapshotWatcher, DOCUMENT_SNAPSHOT_KEY};
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut dir = PathBuf::from(".pagecraft");
    let mut key = DOCUMENT_SNAPSHOT_KEY.to_string();
    let mut once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = PathBuf::from(&args[i + 1]);
                    i += 2;
                } else {
                    eprintln!("--dir requires a value");
                    std::process::exit(1);
                }
            }
            "--key" | "-k" => {
                if i + 1 < args.len() {
                    key = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("--key requires a value");
                    std::process::exit(1);
                }
            }
            "--once" => {
                once = true;
                i += 1;
            }
            "--help" | "-h" => {
                println!("Usage: pagecraft-preview [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <DIR>    Snapshot directory (default: .pagecraft)");
                println!("  -k, --key <KEY>    Snapshot key (default: {})", DOCUMENT_SNAPSHOT_KEY);
                println!("      --once         Print the current snapshot and exit");
                println!("  -h, --help         Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    let medium = FileMedium::new(&dir).context("open snapshot directory")?;
    let store = SnapshotStore::new(medium);

    // Initial read, independent of any change signal.
    match store.read(&key)? {
        Some(document) => log_document(&key, &document),
        None => tracing::info!(%key, "no snapshot yet"),
    }

    if once {
        return Ok(());
    }

    let watcher = SnapshotWatcher::new(dir).context("watch snapshot directory")?;
    while let Some(changed) = watcher.next_change() {
        if changed != key {
            continue;
        }
        match store.read(&key) {
            Ok(Some(document)) => log_document(&key, &document),
            Ok(None) => tracing::info!(%key, "snapshot removed"),
            Err(error) => tracing::warn!(%key, %error, "snapshot re-read failed"),
        }
    }

    Ok(())
}

fn log_document(key: &str, document: &pagecraft_model::PageDocument) {
    tracing::info!(
        key,
        sections = document.elements.len(),
        elements = document.collect_ids().len(),
        "document updated"
    );
}
