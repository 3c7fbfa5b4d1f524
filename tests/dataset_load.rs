//! End-to-end loading of on-disk network files.

use std::path::{Path, PathBuf};

use pathway_dataset::{
    ConflictPolicy, Dataset, DatasetConfig, DatasetError, Value, DIRECTION, NODE_ID,
};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

fn config(dir: &TempDir, edge: &str, nodes: &[&str]) -> DatasetConfig {
    DatasetConfig {
        label: "wnt".to_string(),
        edge_files: vec![PathBuf::from(edge)],
        node_files: nodes.iter().map(PathBuf::from).collect(),
        other_files: vec![PathBuf::from("pathway.gmt")],
        data_dir: dir.path().to_path_buf(),
    }
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "edges.txt", "A\tB\t1.0\nB\tC\t0.5\nC\tD\t0.25\n");
    write(dir.path(), "prizes.txt", "prize\tNODEID\tWeight\n3\tA\t1\n1\tZ\t9\n");
    write(dir.path(), "weights.txt", "NODEID\tWeight\nA\t100\nB\t200\n");
    write(dir.path(), "sources.wnt.txt", "A\nD\n");
    dir
}

fn values(dataset: &Dataset, column: &str) -> Vec<Value> {
    dataset.node_table().require(column).unwrap().values.clone()
}

#[test]
fn three_column_interactome_is_undirected() {
    let dir = fixture();
    let dataset = Dataset::load(&config(&dir, "edges.txt", &[])).unwrap();
    let interactome = dataset.get_interactome();
    assert_eq!(interactome.height(), 3);
    assert!(interactome
        .require(DIRECTION)
        .unwrap()
        .values
        .iter()
        .all(|v| v.matches("U")));
    assert_eq!(dataset.node_set(), vec!["A", "B", "C", "D"]);
}

#[test]
fn malformed_interactome_fails_at_load() {
    let dir = fixture();
    write(dir.path(), "bad.txt", "A\tB\n");
    match Dataset::load(&config(&dir, "bad.txt", &[])) {
        Err(DatasetError::MalformedInteractome { found, .. }) => assert_eq!(found, 2),
        other => panic!("expected malformed interactome, got {other:?}"),
    }
}

#[test]
fn node_id_is_first_for_any_merge_order() {
    let dir = fixture();
    for order in [
        vec!["prizes.txt", "sources.wnt.txt"],
        vec!["sources.wnt.txt", "prizes.txt"],
    ] {
        let dataset = Dataset::load(&config(&dir, "edges.txt", &order)).unwrap();
        assert_eq!(dataset.node_table().column_names()[0], NODE_ID);
        assert_eq!(dataset.node_table().height(), 4);
    }
}

#[test]
fn indicator_file_becomes_boolean_column() {
    let dir = fixture();
    let dataset = Dataset::load(&config(&dir, "edges.txt", &["sources.wnt.txt"])).unwrap();
    assert_eq!(
        values(&dataset, "sources"),
        vec![Value::Bool(true), Value::Null, Value::Null, Value::Bool(true)]
    );
}

#[test]
fn first_file_wins_weight_collision() {
    let dir = fixture();
    let dataset =
        Dataset::load(&config(&dir, "edges.txt", &["prizes.txt", "weights.txt"])).unwrap();
    assert_eq!(dataset.node_table().column_names(), vec![NODE_ID, "prize", "Weight"]);
    assert_eq!(
        values(&dataset, "Weight"),
        vec![Value::Integer(1), Value::Null, Value::Null, Value::Null]
    );
}

#[test]
fn fail_policy_surfaces_collision() {
    let dir = fixture();
    let result = Dataset::load_with_policy(
        &config(&dir, "edges.txt", &["prizes.txt", "weights.txt"]),
        ConflictPolicy::Fail,
    );
    assert!(matches!(result, Err(DatasetError::NodeColumnConflict { .. })));
}

#[test]
fn request_node_columns_filters_and_flags_sparsity() {
    let dir = fixture();
    let dataset =
        Dataset::load(&config(&dir, "edges.txt", &["prizes.txt", "sources.wnt.txt"])).unwrap();

    let sources = dataset.request_node_columns("sources").unwrap();
    assert_eq!(sources.table.height(), 2);
    assert_eq!(sources.hit_fraction, 0.5);
    assert!(!sources.is_sparse());

    let either = dataset.request_node_columns(&["prize", "sources"]).unwrap();
    assert_eq!(either.table.height(), 2);
    assert_eq!(either.table.column_names(), vec![NODE_ID, "prize", "sources"]);

    assert!(dataset.contains_node_columns(&["prize", "sources"]));
    assert!(!dataset.contains_node_columns(&["prize", "targets"]));
}

#[test]
fn accessors_hand_out_copies() {
    let dir = fixture();
    let dataset = Dataset::load(&config(&dir, "edges.txt", &[])).unwrap();
    let mut interactome = dataset.get_interactome();
    interactome.remove_column(DIRECTION);
    let mut others = dataset.get_other_files();
    others.clear();

    assert!(dataset.get_interactome().contains(DIRECTION));
    assert_eq!(dataset.get_other_files(), vec![PathBuf::from("pathway.gmt")]);
}

#[test]
fn snapshot_round_trip() {
    let dir = fixture();
    let dataset =
        Dataset::load(&config(&dir, "edges.txt", &["prizes.txt", "sources.wnt.txt"])).unwrap();
    let path = dir.path().join("snapshots").join("wnt.json");
    dataset.to_file(&path).unwrap();
    let restored = Dataset::from_file(&path).unwrap();
    assert_eq!(restored, dataset);
}

#[test]
fn snapshot_with_unknown_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.json");
    std::fs::write(&path, r#"{"format_version": 7, "label": "x"}"#).unwrap();
    assert!(matches!(
        Dataset::from_file(&path),
        Err(DatasetError::UnsupportedSnapshotVersion(7))
    ));
}

#[test]
fn snapshot_round_trip_with_non_finite_and_missing_cells() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "edges.txt", "A\tB\t1.0\nB\tC\tinf\nC\tA\tNaN\n");
    write(dir.path(), "scores.txt", "NODEID\tscore\nA\tNaN\nB\t-inf\nC\t2.5\n");
    let dataset = Dataset::load(&config(&dir, "edges.txt", &["scores.txt"])).unwrap();
    assert_eq!(
        values(&dataset, "score"),
        vec![Value::Null, Value::from("-inf"), Value::Float(2.5)]
    );

    let path = dir.path().join("wnt.json");
    dataset.to_file(&path).unwrap();
    let restored = Dataset::from_file(&path).unwrap();
    assert_eq!(restored, dataset);
}

#[test]
fn missing_markers_leave_column_sparse() {
    let dir = fixture();
    write(dir.path(), "blank_prizes.txt", "NODEID\tprize\nA\tNA\nB\tnan\nC\tN/A\n");
    let dataset = Dataset::load(&config(&dir, "edges.txt", &["blank_prizes.txt"])).unwrap();
    let request = dataset.request_node_columns("prize").unwrap();
    assert_eq!(request.table.height(), 0);
    assert!(request.is_sparse());
}
