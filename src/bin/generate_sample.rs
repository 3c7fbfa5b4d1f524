use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pathway_dataset::{
    Column, DatasetConfig, PipelineConfig, Table, Value, DIRECTION, INTERACTOR1, INTERACTOR2,
    NODE_ID, WEIGHT,
};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

const NODES: usize = 60;
const EDGES: usize = 150;
const DIRECTED_SHARE: f64 = 0.3;

fn gene(i: usize) -> String {
    format!("G{i:03}")
}

fn write_table(path: &Path, table: &Table, header: bool) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    table
        .write_tsv(file, header)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    // Interactome: random pairs without self loops or repeated pairs
    let mut pairs = BTreeSet::new();
    while pairs.len() < EDGES {
        let a = rng.below(NODES);
        let b = rng.below(NODES);
        if a != b && !pairs.contains(&(b, a)) {
            pairs.insert((a, b));
        }
    }

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut weight = Vec::new();
    let mut direction = Vec::new();
    for &(a, b) in &pairs {
        left.push(Value::String(gene(a)));
        right.push(Value::String(gene(b)));
        weight.push(Value::Float((rng.next_f64() * 1000.0).round() / 1000.0));
        let dir = if rng.next_f64() < DIRECTED_SHARE { "D" } else { "U" };
        direction.push(Value::from(dir));
    }
    let interactome = Table::from_columns(vec![
        Column::new(INTERACTOR1, left),
        Column::new(INTERACTOR2, right),
        Column::new(WEIGHT, weight),
        Column::new(DIRECTION, direction),
    ])?;
    write_table(&out_dir.join("interactome.txt"), &interactome, false)?;

    // Prizes on roughly a third of the nodes
    let prized: Vec<usize> = (0..NODES).filter(|_| rng.next_f64() < 0.33).collect();
    let prizes = Table::from_columns(vec![
        Column::new(NODE_ID, prized.iter().map(|&i| Value::String(gene(i))).collect()),
        Column::new(
            "prize",
            prized
                .iter()
                .map(|_| Value::Float((rng.next_f64() * 10.0).round() / 10.0))
                .collect(),
        ),
    ])?;
    write_table(&out_dir.join("prizes.txt"), &prizes, true)?;

    // Indicator lists: a handful of sources and targets
    for (file, count) in [("sources.txt", 4), ("targets.txt", 6)] {
        let ids: Vec<Value> = (0..count)
            .map(|_| Value::String(gene(rng.below(NODES))))
            .collect();
        let list = Table::from_columns(vec![Column::new(NODE_ID, ids)])?;
        write_table(&out_dir.join(file), &list, false)?;
    }

    let config = PipelineConfig {
        datasets: vec![DatasetConfig {
            label: "sample".to_string(),
            edge_files: vec![PathBuf::from("interactome.txt")],
            node_files: vec![
                PathBuf::from("prizes.txt"),
                PathBuf::from("sources.txt"),
                PathBuf::from("targets.txt"),
            ],
            other_files: vec![],
            data_dir: out_dir.clone(),
        }],
    };
    let config_path = out_dir.join("config.json");
    std::fs::write(&config_path, serde_json::to_string_pretty(&config)?)
        .with_context(|| format!("writing {}", config_path.display()))?;

    println!(
        "Wrote {} edges over {} nodes ({} with prizes) to {}",
        interactome.height(),
        NODES,
        prizes.height(),
        out_dir.display()
    );
    Ok(())
}
