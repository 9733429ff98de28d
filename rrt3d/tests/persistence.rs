use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use rrt3d::waypoints::{load_json, load_route, save_json, save_route};
use rrt3d::{point, Path, PlannerConfig, RRTStarSolver, Scenario, WaypointError};

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rrt3d-{}-{}", std::process::id(), name))
}

fn planned_path() -> Path {
    let scenario = Scenario {
        start: point(0.0, 0.0, 0.0),
        goal: point(4.0, 3.0, 2.0),
        bounds: None,
        obstacles: Vec::new(),
        planner: PlannerConfig {
            goal_sample_rate: 0.5,
            ..PlannerConfig::default()
        },
    };
    scenario
        .builder::<RRTStarSolver>()
        .solve(&mut StdRng::seed_from_u64(9))
        .unwrap()
        .result
        .unwrap()
}

#[test]
fn route_file_round_trip() {
    let path = planned_path();
    let file = temp_file("route.txt");

    save_route(&file, &path).unwrap();
    let text = fs::read_to_string(&file).unwrap();
    assert_eq!(text.lines().count(), path.len());
    assert_eq!(text.lines().next(), Some("(0, 0, 0)"));
    assert_eq!(text.lines().last(), Some("(4, 3, 2)"));

    let loaded = load_route(&file).unwrap();
    fs::remove_file(&file).unwrap();
    assert_eq!(loaded, path);
}

#[test]
fn json_file_round_trip() {
    let path = planned_path();
    let file = temp_file("route.json");

    save_json(&file, &path).unwrap();
    let loaded = load_json(&file).unwrap();
    fs::remove_file(&file).unwrap();
    assert_eq!(loaded, path);
}

#[test]
fn missing_route_file() {
    let err = load_route(temp_file("does-not-exist.txt")).unwrap_err();
    assert!(matches!(err, WaypointError::Io(_)));
}

#[test]
fn bundled_scenario_loads_from_disk() {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios/cluttered.json");
    let scenario = Scenario::load(file).unwrap();
    assert_eq!(scenario.obstacles.len(), 30);
    assert_eq!(scenario.planner.expand_dist, 0.5);
    assert_eq!(scenario.planner.goal_sample_rate, 0.01);
    assert_eq!(scenario.planner.max_radius, 2.0);
    assert!(scenario.builder::<RRTStarSolver>().validate().is_ok());
}
