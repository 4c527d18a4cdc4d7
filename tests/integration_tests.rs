//! Integration tests for image-reconciler
//!
//! Each test builds a throwaway SQLite database and image tree under a
//! tempdir and runs a full reconciliation pass against them.

use image_reconciler::config::ReconcileConfig;
use image_reconciler::db::schema;
use image_reconciler::reconcile::Reconciler;
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

fn seed_database(db_path: &Path, refs: &[(&str, &str, &str, &str)]) {
    let conn = Connection::open(db_path).unwrap();
    schema::create_database(&conn).unwrap();
    for (reference, seq, color, base) in refs {
        conn.execute(
            "INSERT INTO pending_references (unique_reference, sequence_number, color_code, base_reference)
             VALUES (?1, ?2, ?3, ?4)",
            params![reference, seq, color, base],
        )
        .unwrap();
    }
}

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn config(db_path: &Path, image_root: &Path, batch_size: usize, workers: usize) -> ReconcileConfig {
    ReconcileConfig {
        db_path: db_path.to_path_buf(),
        image_root: image_root.to_path_buf(),
        batch_size,
        worker_count: workers,
        show_summary: false,
        verbose: false,
    }
}

fn catalog_rows(db_path: &Path) -> Vec<(String, String)> {
    let conn = Connection::open(db_path).unwrap();
    let rows = conn
        .prepare("SELECT unique_reference, path FROM image_catalog ORDER BY unique_reference")
        .unwrap()
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    rows
}

/// Shared scenario: A1 has an image deep in the tree, A2 does not
fn concrete_scenario() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    let image_root = dir.path().join("images");

    seed_database(
        &db_path,
        &[("A1", "1", "RED", "BASEA"), ("A2", "2", "BLUE", "BASEA")],
    );
    touch(&image_root.join("x/A1_a.jpg"));

    (dir, db_path, image_root)
}

#[test]
fn test_concrete_scenario_counts_and_rows() {
    let (_dir, db_path, image_root) = concrete_scenario();

    let report = Reconciler::new(config(&db_path, &image_root, 500, 4))
        .run()
        .unwrap();

    assert!(report.completed);
    assert_eq!(report.pending, 2);
    assert_eq!(report.found, 1);
    assert_eq!(report.not_found, 1);
    assert_eq!(report.errors, 0);
    assert_eq!(report.inserted, 1);

    let rows = catalog_rows(&db_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "A1");
    assert!(rows[0].1.ends_with("A1_a.jpg"));
}

#[test]
fn test_second_run_is_idempotent() {
    let (_dir, db_path, image_root) = concrete_scenario();

    let first = Reconciler::new(config(&db_path, &image_root, 500, 4))
        .run()
        .unwrap();
    assert_eq!(first.inserted, 1);

    // A1 is now cataloged; with no filesystem changes, the second run's
    // fetch still returns A2 (not found again) and inserts nothing.
    let second = Reconciler::new(config(&db_path, &image_root, 500, 4))
        .run()
        .unwrap();
    assert!(second.completed);
    assert_eq!(second.pending, 1);
    assert_eq!(second.found, 0);
    assert_eq!(second.inserted, 0);

    assert_eq!(catalog_rows(&db_path).len(), 1);
}

#[test]
fn test_empty_pending_is_normal_completion() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    let image_root = dir.path().join("images");
    fs::create_dir_all(&image_root).unwrap();
    seed_database(&db_path, &[]);

    let report = Reconciler::new(config(&db_path, &image_root, 500, 4))
        .run()
        .unwrap();

    assert!(report.completed);
    assert_eq!(report.pending, 0);
    assert_eq!(report.found, 0);
    assert_eq!(report.flushes, 0);
}

#[test]
fn test_batch_size_boundary_flush_count() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    let image_root = dir.path().join("images");

    let refs: Vec<(String, String, String, String)> = (1..=5)
        .map(|i| {
            (
                format!("R{}", i),
                i.to_string(),
                "RED".to_string(),
                "BASE".to_string(),
            )
        })
        .collect();
    let ref_slices: Vec<(&str, &str, &str, &str)> = refs
        .iter()
        .map(|(a, b, c, d)| (a.as_str(), b.as_str(), c.as_str(), d.as_str()))
        .collect();
    seed_database(&db_path, &ref_slices);

    for i in 1..=5 {
        touch(&image_root.join(format!("R{}_a.jpg", i)));
    }

    // 5 found items with batch size 2 => flushes of 2, 2, 1
    let report = Reconciler::new(config(&db_path, &image_root, 2, 4))
        .run()
        .unwrap();

    assert_eq!(report.found, 5);
    assert_eq!(report.inserted, 5);
    assert_eq!(report.flushes, 3);
    assert_eq!(catalog_rows(&db_path).len(), 5);
}

#[test]
fn test_result_count_is_worker_count_invariant() {
    for workers in [1, 4] {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("catalog.db");
        let image_root = dir.path().join("images");

        seed_database(
            &db_path,
            &[
                ("W1", "1", "RED", "B"),
                ("W2", "2", "RED", "B"),
                ("W3", "3", "RED", "B"),
                ("W4", "4", "RED", "B"),
                ("W5", "5", "RED", "B"),
            ],
        );
        touch(&image_root.join("W2_a.jpg"));
        touch(&image_root.join("W4_a.png"));

        let report = Reconciler::new(config(&db_path, &image_root, 500, workers))
            .run()
            .unwrap();

        assert_eq!(report.found + report.not_found, 5, "workers={}", workers);
        assert_eq!(report.found, 2, "workers={}", workers);
    }
}

#[test]
fn test_variant_precedence_end_to_end() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    let image_root = dir.path().join("images");

    seed_database(&db_path, &[("A1", "1", "RED", "BASEA")]);
    // Both variant 1 and variant 2 exist; variant 1 must win
    touch(&image_root.join("v2/BASEA1RED_a.jpg"));
    touch(&image_root.join("v1/A1_a.jpg"));

    Reconciler::new(config(&db_path, &image_root, 500, 1))
        .run()
        .unwrap();

    let rows = catalog_rows(&db_path);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].1.ends_with("A1_a.jpg"));
}

#[test]
fn test_missing_image_root_counts_as_not_found() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    seed_database(&db_path, &[("A1", "1", "RED", "BASEA")]);

    let report = Reconciler::new(config(
        &db_path,
        &dir.path().join("no-such-root"),
        500,
        4,
    ))
    .run()
    .unwrap();

    assert!(report.completed);
    assert_eq!(report.found, 0);
    assert_eq!(report.not_found, 1);
    assert_eq!(report.errors, 1);
    assert!(catalog_rows(&db_path).is_empty());
}

#[test]
fn test_unopenable_database_is_degraded_noop() {
    let dir = tempdir().unwrap();
    // Parent directory does not exist, so the open fails
    let db_path = dir.path().join("missing-dir/catalog.db");
    let image_root = dir.path().join("images");
    fs::create_dir_all(&image_root).unwrap();

    let report = Reconciler::new(config(&db_path, &image_root, 500, 4))
        .run()
        .unwrap();

    assert!(!report.completed);
    assert_eq!(report.pending, 0);
}

#[test]
fn test_run_metadata_recorded() {
    let (_dir, db_path, image_root) = concrete_scenario();

    Reconciler::new(config(&db_path, &image_root, 500, 2))
        .run()
        .unwrap();

    let conn = Connection::open(&db_path).unwrap();
    assert_eq!(
        schema::get_run_info(&conn, schema::keys::STATUS).unwrap(),
        Some("completed".to_string())
    );
    assert_eq!(
        schema::get_run_info(&conn, schema::keys::FOUND).unwrap(),
        Some("1".to_string())
    );
    assert_eq!(
        schema::get_run_info(&conn, schema::keys::WORKER_COUNT).unwrap(),
        Some("2".to_string())
    );
    assert!(schema::get_run_info(&conn, schema::keys::START_TIME)
        .unwrap()
        .is_some());
    assert!(schema::get_run_info(&conn, schema::keys::END_TIME)
        .unwrap()
        .is_some());
}
