//! Watch the posts directory and re-list posts on change

use anyhow::{Context, Result};
use notify::Watcher;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use super::list;
use crate::Blog;

/// Quiet period before a burst of file events triggers a reload
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watch for file changes and print the post listing after each change
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher
        .watch(&blog.posts_dir, notify::RecursiveMode::Recursive)
        .with_context(|| format!("Cannot watch {:?}", blog.posts_dir))?;

    list::run(blog, "post", false)?;
    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", blog.posts_dir);

    let mut pending: Option<Instant> = None;

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                tracing::debug!("File event: {:?}", event.paths);
                pending = Some(Instant::now());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if should_reload(pending, Instant::now()) {
            pending = None;
            tracing::info!("Posts changed, reloading...");
            if let Err(e) = list::run(blog, "post", false) {
                tracing::error!("Reload failed: {}", e);
            }
        }
    }

    Ok(())
}

/// A reload is due once the last event is at least `DEBOUNCE` old
fn should_reload(pending: Option<Instant>, now: Instant) -> bool {
    pending.is_some_and(|at| now.saturating_duration_since(at) >= DEBOUNCE)
}
