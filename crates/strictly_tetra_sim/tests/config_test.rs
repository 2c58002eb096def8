//! Config file loading and end-to-end runs from disk.

use std::io::Write;
use strictly_tetra::{CellAdjacency, Direction, Neighbor};
use strictly_tetra_sim::{SimConfig, Simulation};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

const DIAMOND: &str = r#"
seed = 42
players = 1
dice_per_player = 1
turns = 3

[[cells]]
id = 1
pointing = "up"
right = 2
down = 3

[[cells]]
id = 2
pointing = "down"
left = 1

[[cells]]
id = 3
pointing = "down"
up = 1
"#;

#[test]
fn test_load_from_file() {
    let file = write_config(DIAMOND);
    let config = SimConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.seed(), 42);
    assert_eq!(*config.players(), 1);
    assert_eq!(config.cells().len(), 3);
    // Not in the file, so defaulted.
    assert_eq!(*config.max_attempts(), 16);
}

#[test]
fn test_declared_cells_link() {
    let file = write_config(DIAMOND);
    let board = SimConfig::from_file(file.path())
        .unwrap()
        .build_board()
        .unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board.neighbor(1, Direction::Right), Neighbor::Linked(2));
    assert_eq!(board.neighbor(2, Direction::Left), Neighbor::Linked(1));
    assert_eq!(board.neighbor(1, Direction::Down), Neighbor::Linked(3));
    assert_eq!(board.neighbor(3, Direction::Up), Neighbor::Linked(1));
    assert_eq!(board.neighbor(2, Direction::Right), Neighbor::Missing);
}

#[test]
fn test_missing_file_is_config_error() {
    let err = SimConfig::from_file("/nonexistent/strictly_tetra.toml").unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_config("players = \"many\"");
    let err = SimConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_run_from_file_is_reproducible() {
    let file = write_config("seed = 3\nplayers = 2\ndice_per_player = 3\nturns = 5");
    let load = || SimConfig::from_file(file.path()).unwrap();

    let first = Simulation::new(load()).unwrap().run().unwrap();
    let second = Simulation::new(load()).unwrap().run().unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert_eq!(first.dice.len(), 6);
    assert!(first.dice.iter().all(|d| d.cell.is_some() && !d.lost));
}

#[test]
fn test_cli_overrides_apply() {
    let file = write_config("seed = 3\nturns = 5");
    let config = SimConfig::from_file(file.path())
        .unwrap()
        .with_seed(9)
        .with_turns(1);
    let report = Simulation::new(config).unwrap().run().unwrap();
    assert_eq!(report.seed, 9);
    assert_eq!(report.turns, 1);
}
