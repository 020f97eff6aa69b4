/// Command implementations
use crate::config::ShelfConfig;
use anyhow::{bail, Context, Result};
use shelf_core::{CanonicalRecord, SyncStatus};
use shelf_library::{EngineEvent, LibraryEngine, LibraryIndex, SeriesKey, SyncScope};
use shelf_metadata::{load_sidecar, EmbeddedTags, MetadataResolver, Mp4Backend};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// What `shelf sync` should write
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub author: Option<String>,
    pub series: Option<String>,
    pub book: Option<PathBuf>,
    pub rename_series: Option<String>,
}

impl Selection {
    /// Turn command-line flags into a sync scope
    pub fn scope(self, root: &Path) -> Result<SyncScope> {
        if let Some(book) = self.book {
            let path = if book.is_relative() && !book.exists() {
                root.join(book)
            } else {
                book
            };
            return Ok(SyncScope::Book(canonical(path)));
        }

        let Some(author) = self.author else {
            bail!("Pass --author or --book");
        };

        Ok(match self.series {
            Some(series) => SyncScope::Series {
                author,
                series: SeriesKey::from_name(&series),
                rename: self.rename_series,
            },
            None => SyncScope::Author(author),
        })
    }
}

pub async fn scan(config: &ShelfConfig, root: PathBuf, json: bool) -> Result<()> {
    let index = scan_library(config, root).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&index)?);
    } else {
        print_index(&index);
    }
    Ok(())
}

pub async fn sync(config: &ShelfConfig, root: PathBuf, selection: Selection) -> Result<()> {
    // Index paths and --book must be spelled the same way to match
    let root = canonical(root);
    let scope = selection.scope(&root)?;
    let mut index = scan_library(config, root).await?;
    let batch = scope.requests(&index)?;
    tracing::info!("Writing {} files for {}", batch.len(), scope);

    let engine = LibraryEngine::new(Mp4Backend, config.engine.clone());
    let (rx, handle) = engine.spawn_sync(batch, cancel_on_ctrl_c());
    report_events(rx).await;
    let summary = handle.await.context("Sync task failed")?;

    index.apply_outcomes(&summary.outcomes);
    for outcome in &summary.outcomes {
        match &outcome.status {
            SyncStatus::Updated { .. } => {
                if let Some(book) = index.find(&outcome.path) {
                    println!("updated {}", book_line(book));
                }
            }
            SyncStatus::Failed { reason } => {
                eprintln!("FAILED {}: {}", outcome.path.display(), reason);
            }
            SyncStatus::Cancelled => {}
        }
    }
    println!(
        "{} updated, {} failed, {} cancelled",
        summary.succeeded, summary.failed, summary.cancelled
    );

    if summary.failed > 0 {
        bail!("{} of {} files could not be written", summary.failed, summary.total());
    }
    Ok(())
}

pub fn inspect(config: &ShelfConfig, file: &Path) -> Result<()> {
    match EmbeddedTags::read(&Mp4Backend, file) {
        Ok(tags) => {
            println!("Atoms");
            for (name, value) in tags.entries() {
                println!("  {name:<32} {value}");
            }
        }
        Err(e) => println!("Atoms unreadable: {e}"),
    }

    let sidecar = file
        .parent()
        .and_then(|dir| load_sidecar(dir, &config.engine.sidecar_names));
    let resolver = MetadataResolver::new(Mp4Backend, config.engine.author_policy);
    let record = resolver.resolve(file, sidecar.as_ref());

    println!("Resolved");
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn scan_library(config: &ShelfConfig, root: PathBuf) -> Result<LibraryIndex> {
    let engine = LibraryEngine::new(Mp4Backend, config.engine.clone());
    let (rx, handle) = engine.spawn_scan(root.clone(), cancel_on_ctrl_c());
    report_events(rx).await;

    handle
        .await
        .context("Scan task failed")?
        .with_context(|| format!("Failed to scan {}", root.display()))
}

/// Resolve `path` to its canonical form, or keep it as given if it does not exist
fn canonical(path: PathBuf) -> PathBuf {
    std::fs::canonicalize(&path).unwrap_or(path)
}

/// Cancellation token tripped by Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing current file");
            trigger.cancel();
        }
    });
    token
}

async fn report_events(mut rx: mpsc::Receiver<EngineEvent>) {
    let mut stderr = std::io::stderr();
    while let Some(event) = rx.recv().await {
        match event {
            EngineEvent::ScanProgress { percent } | EngineEvent::SyncProgress { percent } => {
                let _ = write!(stderr, "\r{percent:>3}%");
                if percent == 100 {
                    let _ = writeln!(stderr);
                }
            }
            EngineEvent::ScanStatus { message } => tracing::info!("{}", message),
            EngineEvent::SyncItemComplete { path, success } => {
                let status = if success { "updated" } else { "failed" };
                tracing::debug!("{} {}", status, path.display());
            }
            EngineEvent::ScanComplete { .. } | EngineEvent::SyncComplete => {}
        }
    }
}

fn print_index(index: &LibraryIndex) {
    for author in index.authors() {
        println!("{author}");
        for series in index.series_of(author) {
            println!("  {series}");
            for book in index.books(author, series) {
                println!("    {}", book_line(book));
            }
        }
    }
    println!("{} books by {} authors", index.len(), index.author_count());
}

fn book_line(book: &CanonicalRecord) -> String {
    let position = book
        .series_index
        .as_ref()
        .map_or_else(|| "-".to_string(), |index| format!("#{index}"));
    format!("{position:<6} {}  [{}]", book.title, book.provenance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{MetadataOrigin, Provenance, SeriesIndex};
    use std::fs;

    #[test]
    fn selection_maps_to_scopes() {
        let root = Path::new("/lib");

        let scope = Selection {
            author: Some("Ann".to_string()),
            ..Selection::default()
        }
        .scope(root)
        .unwrap();
        assert_eq!(scope, SyncScope::Author("Ann".to_string()));

        let scope = Selection {
            author: Some("Ann".to_string()),
            series: Some("Saga".to_string()),
            rename_series: Some("The Saga".to_string()),
            ..Selection::default()
        }
        .scope(root)
        .unwrap();
        assert_eq!(
            scope,
            SyncScope::Series {
                author: "Ann".to_string(),
                series: SeriesKey::from_name("Saga"),
                rename: Some("The Saga".to_string()),
            }
        );

        let scope = Selection {
            book: Some(PathBuf::from("Ann/one.m4b")),
            ..Selection::default()
        }
        .scope(root)
        .unwrap();
        assert_eq!(scope, SyncScope::Book(PathBuf::from("/lib/Ann/one.m4b")));

        assert!(Selection::default().scope(root).is_err());
    }

    #[test]
    fn book_path_matches_canonical_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Ann")).unwrap();
        fs::write(dir.path().join("Ann/one.m4b"), b"").unwrap();
        let root = canonical(dir.path().to_path_buf());
        let expected = root.join("Ann/one.m4b");

        let roundabout = Selection {
            book: Some(dir.path().join("Ann/../Ann/./one.m4b")),
            ..Selection::default()
        };
        assert_eq!(roundabout.scope(&root).unwrap(), SyncScope::Book(expected.clone()));

        let under_root = Selection {
            book: Some(PathBuf::from("Ann/one.m4b")),
            ..Selection::default()
        };
        assert_eq!(under_root.scope(&root).unwrap(), SyncScope::Book(expected));
    }

    #[test]
    fn book_line_shows_index_and_provenance() {
        let mut book = CanonicalRecord::new(PathBuf::from("/lib/a.m4b"), "Dawn", "Ann");
        assert_eq!(book_line(&book), "-      Dawn  [Tag]");

        book.series_index = Some(SeriesIndex::parse("2.5").unwrap());
        book.provenance = Provenance::new(MetadataOrigin::Tag).with_file_number_fallback(true);
        assert_eq!(book_line(&book), "#2.5   Dawn  [Tag+FileNumberFallback]");
    }
}
