//! Drop folder: image files created in a watched directory are uploaded.

use crate::app::AppEvent;
use crate::utils;
use anyhow::{Context, Result};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::thread;
use std::time::{Duration, SystemTime};

/// Quiet period before a batch of new files is handed off; files are often
/// still being written when the create event fires.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Modification time and size of a file when it was forwarded.
type Stamp = (Option<SystemTime>, u64);

/// Keeps the watcher alive; dropping it stops the drop folder.
pub struct DropWatcher {
    _watcher: RecommendedWatcher,
    pub dir: PathBuf,
}

/// Image paths an event introduces into the folder.
pub fn dropped_images(event: &Event, extensions: &[String]) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(_) => event
            .paths
            .iter()
            .filter(|p| utils::has_extension(p, extensions))
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

/// Start watching `dir`, sending `AppEvent::Dropped` batches to `tx`.
pub fn watch_drop_dir(
    dir: &Path,
    extensions: Vec<String>,
    tx: SyncSender<AppEvent>,
) -> Result<DropWatcher> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create drop folder {}", dir.display()))?;

    let (fs_tx, fs_rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = fs_tx.send(event);
            }
        },
        NotifyConfig::default(),
    )
    .context("Could not create watcher")?;

    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("Could not watch {}", dir.display()))?;

    tracing::info!(dir = %dir.display(), "watching drop folder");

    thread::spawn(move || settle_worker(fs_rx, extensions, tx));

    Ok(DropWatcher {
        _watcher: watcher,
        dir: dir.to_path_buf(),
    })
}

/// Batch events until the folder has been quiet for `SETTLE_DELAY`.
///
/// A path is forwarded again only once its contents change; removing it
/// from the folder forgets it.
fn settle_worker(rx: Receiver<Event>, extensions: Vec<String>, tx: SyncSender<AppEvent>) {
    let mut pending: BTreeSet<PathBuf> = BTreeSet::new();
    let mut forwarded: HashMap<PathBuf, Stamp> = HashMap::new();

    loop {
        match rx.recv_timeout(SETTLE_DELAY) {
            Ok(event) => {
                if let EventKind::Remove(_) = event.kind {
                    for path in &event.paths {
                        forwarded.remove(path);
                        pending.remove(path);
                    }
                    continue;
                }
                pending.extend(dropped_images(&event, &extensions));
            }
            Err(RecvTimeoutError::Timeout) => {
                let batch = take_ready(&mut pending, &mut forwarded);
                if batch.is_empty() {
                    continue;
                }
                tracing::debug!(count = batch.len(), "drop folder batch ready");
                if tx.send(AppEvent::Dropped(batch)).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn stamp(path: &Path) -> Option<Stamp> {
    let meta = std::fs::metadata(path).ok()?;
    meta.is_file().then(|| (meta.modified().ok(), meta.len()))
}

/// Move settled paths out of `pending`, keeping files that still exist and
/// changed since they were last forwarded.
fn take_ready(
    pending: &mut BTreeSet<PathBuf>,
    forwarded: &mut HashMap<PathBuf, Stamp>,
) -> Vec<PathBuf> {
    let mut batch = Vec::new();
    for path in std::mem::take(pending) {
        let Some(current) = stamp(&path) else {
            forwarded.remove(&path);
            continue;
        };
        if forwarded.get(&path) == Some(&current) {
            continue;
        }
        forwarded.insert(path.clone(), current);
        batch.push(path);
    }
    batch
}
