//! Living-room demo: build a shell, furnish it, solve the layout
//!
//! Exercises the full session flow of the scene registry with in-process
//! mock services, then prints the handed-off JSON snapshot.

mod catalog;

use catalog::{FurnitureCatalog, SouthWallSolver};
use room_engine::prelude::*;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RoomConfig {
        room_type: "living room".to_string(),
        width: 6.0,
        depth: 8.0,
        height: 3.0,
        ..Default::default()
    };
    let mut scene = build_room_shell(&config)?;

    let catalog = FurnitureCatalog;

    // Dress the structural shell.
    let wall_material = fetch_material(&catalog, "exposed brick, painted white")?;
    for wall in ["wall_0", "wall_1", "wall_2", "wall_3"] {
        scene.set_material(wall, wall_material.clone())?;
    }
    scene.set_material("floors", fetch_material(&catalog, "wide oak planks")?)?;

    // Retrieve furniture; every result arrives unplaced at the origin.
    let mut placed_keys = Vec::new();
    for (description, base) in [
        ("a modern grey fabric sofa", "sofa"),
        ("a walnut coffee table", "coffee_table"),
        ("a black tv stand with a flat-screen tv", "tv_stand"),
        ("a tall floor lamp with a white shade", "floor_lamp"),
    ] {
        let element = fetch_element(&catalog, &scene, description)?;
        let key = scene.fresh_key(base);
        scene.insert(&key, element)?;
        placed_keys.push(key);
    }
    log::info!("retrieved {} furniture elements", placed_keys.len());
    assert_eq!(scene.unplaced_keys().len(), placed_keys.len());

    // One solver call positions everything; the registry swap is atomic.
    let keys: Vec<&str> = placed_keys.iter().map(String::as_str).collect();
    let solver = SouthWallSolver { room_depth: config.depth };
    solve_layout(&solver, &mut scene, &keys, "line the furniture up along the south wall")?;

    // A second lamp as an instanced copy of the first.
    if let Some(lamp_key) = placed_keys.iter().find(|k| k.starts_with("floor_lamp")) {
        let mirrored = Placement::at(2.5, -3.8, 0.85);
        scene.duplicate_instance(lamp_key, mirrored)?;
    }

    scene.ensure_export_ready()?;
    println!("{}", scene.to_json()?);
    Ok(())
}

fn main() {
    room_engine::foundation::logging::init();
    if let Err(e) = run() {
        log::error!("demo failed: {e}");
        std::process::exit(1);
    }
}
