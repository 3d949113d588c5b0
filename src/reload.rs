use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use expanse_heights::{OneShotRescaler, PlacedFeatureCodec, PlacementRescaler, RescaleReport, ScaleRange};

use crate::datapack::PlacementStore;
use crate::error::{AppError, HostError};

#[derive(Clone, Debug)]
pub struct ReloadOptions {
    pub pack: PathBuf,
    pub out: Option<PathBuf>,
    pub tag: String,
    pub range: ScaleRange,
}

/// Loads a fresh snapshot of the pack and rescales its tagged placements once.
pub fn run_once(opts: &ReloadOptions) -> Result<RescaleReport, AppError> {
    let mut store = PlacementStore::load(&opts.pack)?;
    if store.is_empty() {
        log::warn!("{} holds no placed features", opts.pack.display());
    }
    let listener = OneShotRescaler::new(PlacementRescaler::new(opts.range), opts.tag.clone());
    let report = listener.on_reload(&mut store, &PlacedFeatureCodec).unwrap_or_default();

    for (name, reason) in &report.skipped {
        log::warn!("left {name} unscaled: {reason}");
    }
    log::info!(
        "tag {}: {} rescaled, {} unchanged, {} skipped",
        opts.tag,
        report.changed.len(),
        report.unchanged,
        report.skipped.len()
    );

    match &opts.out {
        Some(out) => {
            let written = store.write_changed(out)?;
            log::info!("wrote {written} definitions to {}", out.display());
        }
        None => {
            for name in store.changed() {
                log::info!("would rewrite {name}");
                if let Some(feature) = store.get(name) {
                    log::debug!("{name}: {:?}", feature.placement);
                }
            }
        }
    }
    Ok(report)
}

/// Runs once, then again on a freshly loaded snapshot whenever the pack changes.
///
/// Output is refused inside the pack: written files would trigger another
/// pass over already rescaled definitions.
pub fn watch(opts: &ReloadOptions) -> Result<(), AppError> {
    if let Some(out) = &opts.out {
        if is_inside(out, &opts.pack) {
            return Err(HostError::OutputInsidePack { out: out.clone(), pack: opts.pack.clone() }.into());
        }
    }
    run_once(opts)?;

    use notify::{EventKind, RecursiveMode, Watcher};
    let (tx, rx) = mpsc::channel::<()>();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res {
            match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any => {
                    let touches_json = event
                        .paths
                        .iter()
                        .any(|p| p.extension().and_then(|e| e.to_str()) == Some("json"));
                    if touches_json {
                        let _ = tx.send(());
                    }
                }
                _ => {}
            }
        }
    })?;
    watcher.watch(&opts.pack, RecursiveMode::Recursive)?;
    log::info!("watching {} for changes", opts.pack.display());

    while rx.recv().is_ok() {
        // editors tend to emit bursts of events per save
        std::thread::sleep(Duration::from_millis(200));
        while rx.try_recv().is_ok() {}
        if let Err(e) = run_once(opts) {
            log::error!("reload failed: {e}");
        }
    }
    Ok(())
}

fn is_inside(path: &Path, dir: &Path) -> bool {
    resolved(path).starts_with(resolved(dir))
}

/// Absolute form of `path` with its longest existing prefix canonicalized;
/// components that do not exist yet are appended unchanged.
fn resolved(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                existing = parent;
            }
            _ => break,
        }
    }
    let mut out = existing.canonicalize().unwrap_or_else(|_| existing.to_path_buf());
    out.extend(missing.iter().rev());
    out
}
