//! Build a network dataset from tab-delimited interactome and node attribute
//! files, and convert edge tables between direction encodings.
//!
//! ```no_run
//! use pathway_dataset::{Dataset, DatasetConfig};
//! use std::path::Path;
//!
//! let config = DatasetConfig::from_json_file(Path::new("wnt.json"))?;
//! let dataset = Dataset::load(&config)?;
//! let sources = dataset.request_node_columns("sources")?;
//! println!("{} source nodes", sources.table.height());
//! # Ok::<(), pathway_dataset::DatasetError>(())
//! ```

pub mod config;
pub mod data;
pub mod dataset;
pub mod error;
pub mod runner;

pub use config::{DatasetConfig, PipelineConfig};
pub use data::direction::{
    add_directionality_separators, add_separator, convert_directed_to_undirected,
    convert_undirected_to_directed, readd_direction_col_directed, readd_direction_col_mixed,
    readd_direction_col_undirected, Direction,
};
pub use data::filter::{ColumnSelection, NodeColumnRequest, WARNING_THRESHOLD};
pub use data::merge::ConflictPolicy;
pub use data::model::{Column, Table, Value};
pub use data::{DIRECTION, INTERACTOR1, INTERACTOR2, NODE_ID, WEIGHT};
pub use dataset::Dataset;
pub use error::{DatasetError, Result};
pub use runner::{Algorithm, AlgorithmRegistry, Runner, RunnerConfig};
