use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pathway_dataset::{Dataset, DatasetConfig, config};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next().map(PathBuf::from) else {
        bail!("usage: pathway-dataset <config.json> [snapshot_dir]");
    };
    let snapshot_dir = args.next().map(PathBuf::from);

    let datasets = config::load_datasets(&config_path)
        .with_context(|| format!("reading config {}", config_path.display()))?;
    if datasets.is_empty() {
        log::warn!("No datasets listed in {}", config_path.display());
    }

    for entry in &datasets {
        if let Err(e) = process(entry, snapshot_dir.as_deref()) {
            log::error!("Failed to load dataset '{}': {e:#}", entry.label);
            return Err(e);
        }
    }
    Ok(())
}

fn process(entry: &DatasetConfig, snapshot_dir: Option<&Path>) -> Result<()> {
    let dataset =
        Dataset::load(entry).with_context(|| format!("loading dataset '{}'", entry.label))?;

    let node_table = dataset.node_table();
    println!(
        "{}: {} edges, {} nodes, columns {:?}",
        dataset.label(),
        dataset.get_interactome().height(),
        node_table.height(),
        node_table.column_names()
    );

    if let Some(dir) = snapshot_dir {
        let path = dir.join(format!("{}.json", dataset.label()));
        dataset
            .to_file(&path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        log::info!("Wrote snapshot {}", path.display());
    }
    Ok(())
}
