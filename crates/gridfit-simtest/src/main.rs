//! Gridfit Headless Fitting Harness
//!
//! Generates dungeon graphs, fits them with both search strategies and
//! checks the layout invariants. Runs entirely in-process, no viewer.
//!
//! Usage:
//!   cargo run -p gridfit-simtest
//!   cargo run -p gridfit-simtest -- --verbose --seed 7 --count 25
//!   cargo run -p gridfit-simtest -- --config fit.json --export map.json

use std::fs;

use gridfit_logic::boundary::BoundaryFinder;
use gridfit_logic::bounds::{compute_bounds, Rectangle};
use gridfit_logic::config::FitConfig;
use gridfit_logic::dungeon::{Corridor, Dungeon, Room, RoomShape};
use gridfit_logic::fitter::GridFitter;
use gridfit_logic::generator::DungeonGenerator;
use gridfit_logic::grid::{CellType, Coord, Grid, NO_ROOM};
use gridfit_logic::placement::place_rect;
use gridfit_logic::render::render_ascii;
use gridfit_logic::report::RouteOutcome;
use gridfit_logic::router::CorridorRouter;
use gridfit_logic::search::{self, PathSearch, UniformCostSearch};
use gridfit_logic::snapshot::GridSnapshot;
use gridfit_logic::validate::{errors_only, validate_layout};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seed: u64,
    count: u64,
    export: Option<String>,
    config: Option<String>,
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_options() -> Result<Options, String> {
    let args: Vec<String> = std::env::args().collect();
    let number = |flag: &str, default: u64| -> Result<u64, String> {
        match arg_value(&args, flag) {
            Some(v) => v
                .parse()
                .map_err(|e| format!("{} expects a number, got {:?}: {}", flag, v, e)),
            None => Ok(default),
        }
    };
    Ok(Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seed: number("--seed", 1)?,
        count: number("--count", 10)?,
        export: arg_value(&args, "--export").map(str::to_string),
        config: arg_value(&args, "--config").map(str::to_string),
    })
}

fn main() {
    let options = match parse_options() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let default_filter = if options.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    println!("=== Gridfit Fitting Harness ===\n");

    let mut results = Vec::new();

    // 1. Configurations to exercise
    let configs = load_configs(&options, &mut results).unwrap_or_default();

    // 2. Hand-built scenarios
    results.extend(validate_small_scenarios(options.verbose));

    // 3. Generated dungeon sweep
    for config in &configs {
        results.extend(validate_generated_sweep(config, &options));
    }

    // 4. Determinism and snapshot round trip
    results.extend(validate_reproducibility(&options));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || options.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Configuration ────────────────────────────────────────────────────

/// Both presets, or the single configuration from `--config`.
fn load_configs(options: &Options, results: &mut Vec<TestResult>) -> Option<Vec<FitConfig>> {
    println!("--- Configuration ---");
    let Some(path) = &options.config else {
        return Some(vec![FitConfig::breadth_first(), FitConfig::weighted()]);
    };
    let parsed = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path, e))
        .and_then(|json| {
            serde_json::from_str::<FitConfig>(&json)
                .map_err(|e| format!("JSON parse error in {}: {}", path, e))
        });
    match parsed {
        Ok(config) => {
            results.push(TestResult {
                name: "config_load".into(),
                passed: true,
                detail: format!("{} ({:?})", path, config.strategy),
            });
            Some(vec![config])
        }
        Err(detail) => {
            results.push(TestResult {
                name: "config_load".into(),
                passed: false,
                detail,
            });
            None
        }
    }
}

// ── 2. Small scenarios ──────────────────────────────────────────────────

fn validate_small_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Small Scenarios ---");
    let mut results = Vec::new();

    // Two 2x2 rooms, one corridor
    let a = Room::new(RoomShape::Square, "2x2");
    let b = Room::new(RoomShape::Square, "2x2");
    let mut two = Dungeon::new();
    two.add_corridor(Corridor::new(Some(&a), Some(&b), 30, "To Chamber"));
    two.add_room(a.clone());
    two.add_room(b);
    let mut fitter = GridFitter::new(FitConfig::breadth_first());
    let rect = fitter.fit(&two);
    let corridor_ids_ok = fitter
        .all_cells()
        .filter(|c| c.cell_type == CellType::Corridor)
        .all(|c| c.room_id == NO_ROOM);
    results.push(TestResult {
        name: "two_rooms_connected".into(),
        passed: fitter.report().routed() == 1 && corridor_ids_ok,
        detail: format!(
            "rect ({},{}) {}x{}, {} cells",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            fitter.grid().len()
        ),
    });
    if verbose {
        print!("{}", render_ascii(fitter.grid(), rect));
    }

    // Dead end: only the source room is drawn
    let mut dead_end = Dungeon::new();
    dead_end.add_corridor(Corridor::new(Some(&a), None, 10, "Dead end here"));
    dead_end.add_room(a.clone());
    let rect = fitter.fit(&dead_end);
    results.push(TestResult {
        name: "missing_endpoint_skipped".into(),
        passed: rect == Rectangle::new(0, 0, 2, 2) && fitter.report().skipped() == 1,
        detail: format!("rect {}x{}, skipped {}", rect.width, rect.height, fitter.report().skipped()),
    });

    // Enclosed target
    let inner = Room::with_id(a.id() + 100, RoomShape::Square, "1x1");
    let mut grid = Grid::new();
    place_rect(&mut grid, a.id(), 0, 0, 2, 2);
    place_rect(&mut grid, a.id() + 101, 9, 9, 3, 3);
    place_rect(&mut grid, inner.id(), 10, 10, 1, 1);
    let before = grid.len();
    let search = UniformCostSearch::new();
    let router = CorridorRouter::new(&search, &FitConfig::breadth_first());
    let outcome = router.route(
        &mut grid,
        &mut BoundaryFinder::new(),
        &Corridor::new(Some(&a), Some(&inner), 30, ""),
        &mut StdRng::seed_from_u64(0),
    );
    results.push(TestResult {
        name: "enclosed_target_unreachable".into(),
        passed: matches!(outcome, RouteOutcome::Unreachable { .. }) && grid.len() == before,
        detail: format!("{:?}", outcome),
    });

    // Bounds of a single cell
    let mut single = Grid::new();
    single.set_room(Coord::new(3, 4), 1);
    let rect = compute_bounds(&single);
    results.push(TestResult {
        name: "bounds_single_cell".into(),
        passed: rect == Rectangle::new(3, 4, 1, 1),
        detail: format!("({},{}) {}x{}", rect.x, rect.y, rect.width, rect.height),
    });

    // Same start and goal
    let path = search.find_path(&Grid::new(), Coord::new(1, 1), Coord::new(1, 1));
    results.push(TestResult {
        name: "search_same_cell".into(),
        passed: path == vec![Coord::new(1, 1)],
        detail: "start == goal → single-cell path".into(),
    });

    results
}

// ── 3. Generated sweep ──────────────────────────────────────────────────

fn validate_generated_sweep(config: &FitConfig, options: &Options) -> Vec<TestResult> {
    let strategy = search::from_config(config).name();
    println!("--- Generated Dungeons ({}) ---", strategy);
    let mut results = Vec::new();
    let generator = DungeonGenerator::default();

    let mut routed = 0;
    let mut skipped = 0;
    let mut unreachable = 0;
    let mut failures = Vec::new();

    for seed in options.seed..options.seed + options.count {
        let dungeon = generator.generate(&mut StdRng::seed_from_u64(seed));
        let mut fitter = GridFitter::new(config.clone().with_seed(seed));
        let rect = fitter.fit(&dungeon);

        let report = fitter.report();
        routed += report.routed();
        skipped += report.skipped();
        unreachable += report.unreachable();

        let errors = errors_only(validate_layout(fitter.grid(), rect, report));
        if !errors.is_empty() {
            log::warn!("{} seed {}: {} layout errors", strategy, seed, errors.len());
            failures.push(format!("seed {}: {}", seed, errors[0].message));
        }
        if options.verbose && seed == options.seed {
            println!(
                "seed {}: {} rooms, {} corridors",
                seed,
                dungeon.rooms().len(),
                dungeon.corridors().len()
            );
            print!("{}", render_ascii(fitter.grid(), rect));
        }
    }

    results.push(TestResult {
        name: format!("{}_layout_invariants", strategy),
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            format!("{} dungeons valid", options.count)
        } else {
            format!("{} invalid, first: {}", failures.len(), failures[0])
        },
    });
    results.push(TestResult {
        name: format!("{}_routing_summary", strategy),
        passed: true,
        detail: format!(
            "routed {}, skipped {}, unreachable {}",
            routed, skipped, unreachable
        ),
    });

    results
}

// ── 4. Reproducibility ──────────────────────────────────────────────────

fn validate_reproducibility(options: &Options) -> Vec<TestResult> {
    println!("--- Reproducibility ---");
    let mut results = Vec::new();

    let dungeon = DungeonGenerator::default().generate(&mut StdRng::seed_from_u64(options.seed));
    let fit_json = || {
        let mut fitter = GridFitter::new(FitConfig::weighted().with_seed(options.seed));
        fitter.fit(&dungeon);
        GridSnapshot::capture(&fitter, &dungeon).to_json()
    };

    let (first, second) = match (fit_json(), fit_json()) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            results.push(TestResult {
                name: "snapshot_serialize".into(),
                passed: false,
                detail: format!("serialize error: {}", e),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "seeded_fit_deterministic".into(),
        passed: first == second,
        detail: format!("seed {} → {} bytes of JSON", options.seed, first.len()),
    });

    match GridSnapshot::from_json(&first) {
        Ok(snap) => {
            let grid = snap.to_grid();
            let rect = snap.rect.unwrap_or_default();
            results.push(TestResult {
                name: "snapshot_round_trip".into(),
                passed: compute_bounds(&grid) == rect && snap.to_rooms().len() == dungeon.rooms().len(),
                detail: format!("{} cells, {} rooms", snap.cells.len(), snap.rooms.len()),
            });
        }
        Err(e) => results.push(TestResult {
            name: "snapshot_round_trip".into(),
            passed: false,
            detail: format!("JSON parse error: {}", e),
        }),
    }

    if let Some(path) = &options.export {
        let written = fs::write(path, &first);
        results.push(TestResult {
            name: "snapshot_export".into(),
            passed: written.is_ok(),
            detail: match written {
                Ok(()) => format!("wrote {}", path),
                Err(e) => format!("cannot write {}: {}", path, e),
            },
        });
    }

    results
}
