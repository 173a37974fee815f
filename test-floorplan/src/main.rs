// Generates /detect request fixtures and previews what the detector finds in each
use room_detection::{detect_rooms, DetectionOptions, Point2D, Wall};
use serde::Serialize;
use std::fs;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectRequest<'a> {
    walls: &'a [Wall],
    options: DetectionOptions,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏗️  Room Detection Fixture Generator");
    println!("====================================\n");

    fs::create_dir_all("data")?;

    println!("📋 Case 1: Studio (single closed box)");
    save_test("studio", &create_studio(), DetectionOptions::default())?;

    println!("\n📋 Case 2: L-shaped apartment with partition");
    save_test("l_shaped", &create_l_shaped(), DetectionOptions::default())?;

    println!("\n📋 Case 3: Office grid (3x3)");
    save_test("office_grid", &create_grid(3, 10.0), DetectionOptions::default())?;

    println!("\n📋 Case 4: Plot with land boundary and open walls");
    save_test("plot_with_boundary", &create_plot(), DetectionOptions::default())?;

    println!("\n✅ All fixtures generated!");
    println!("\n🚀 To test:");
    println!("   1. Start server: cargo run --release --bin room-detection-server");
    println!("   2. curl -X POST http://localhost:3000/detect \\");
    println!("           -H 'Content-Type: application/json' \\");
    println!("           -d @data/l_shaped_request.json | jq");

    Ok(())
}

fn wall(id: &str, x1: f64, z1: f64, x2: f64, z2: f64) -> Wall {
    Wall::new(id, Point2D::new(x1, z1), Point2D::new(x2, z2)).with_thickness(0.2)
}

/// 5x4 room, the smallest useful plan
fn create_studio() -> Vec<Wall> {
    vec![
        wall("wall-1", 0.0, 0.0, 5.0, 0.0),
        wall("wall-2", 5.0, 0.0, 5.0, 4.0),
        wall("wall-3", 5.0, 4.0, 0.0, 4.0),
        wall("wall-4", 0.0, 4.0, 0.0, 0.0),
    ]
}

/// L outline split at x=16 by a preset partition: a 168 and a 448 room
fn create_l_shaped() -> Vec<Wall> {
    vec![
        wall("wall-south-west", 0.0, 0.0, 16.0, 0.0),
        wall("wall-south-east", 16.0, 0.0, 30.0, 0.0),
        wall("wall-east", 30.0, 0.0, 30.0, 12.0),
        wall("wall-step", 30.0, 12.0, 16.0, 12.0),
        wall("wall-inner", 16.0, 12.0, 16.0, 28.0),
        wall("wall-north", 16.0, 28.0, 0.0, 28.0),
        wall("wall-west", 0.0, 28.0, 0.0, 0.0),
        wall("preset-wall-partition", 16.0, 0.0, 16.0, 12.0),
    ]
}

/// `n` x `n` square rooms, walls split at every crossing
fn create_grid(n: usize, size: f64) -> Vec<Wall> {
    let mut walls = Vec::new();
    for line in 0..=n {
        for seg in 0..n {
            let fixed = line as f64 * size;
            let from = seg as f64 * size;
            let to = from + size;
            walls.push(wall(&format!("wall-h{line}-{seg}"), from, fixed, to, fixed));
            walls.push(wall(&format!("wall-v{line}-{seg}"), fixed, from, fixed, to));
        }
    }
    walls
}

/// Two rooms inside a land boundary, plus a stub and a wall with a gap
fn create_plot() -> Vec<Wall> {
    let mut walls = vec![
        // Land boundary segments are not walls and never bound a room
        Wall::new("land-north", Point2D::new(-10.0, 30.0), Point2D::new(40.0, 30.0)),
        Wall::new("land-east", Point2D::new(40.0, 30.0), Point2D::new(40.0, -10.0)),
        Wall::new("land-south", Point2D::new(40.0, -10.0), Point2D::new(-10.0, -10.0)),
        Wall::new("land-west", Point2D::new(-10.0, -10.0), Point2D::new(-10.0, 30.0)),
        // Garden wall that never closes
        wall("wall-garden", 25.0, 0.0, 35.0, 0.0),
        wall("wall-garden-return", 35.0, 0.0, 35.0, 10.0),
    ];
    walls.extend(create_studio());
    walls.push(wall("wall-annex-1", 5.0, 0.0, 9.0, 0.0));
    walls.push(wall("wall-annex-2", 9.0, 0.0, 9.0, 4.0));
    walls.push(wall("wall-annex-3", 9.0, 4.0, 5.0, 4.0));
    walls
}

fn save_test(
    name: &str,
    walls: &[Wall],
    options: DetectionOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = DetectRequest { walls, options };

    let filename = format!("data/{}_request.json", name);
    fs::write(&filename, serde_json::to_string_pretty(&request)?)?;

    let rooms = detect_rooms(walls, &options);
    let total_area: f64 = rooms.iter().map(|r| r.area).sum();

    println!("   ✅ Saved: {}", filename);
    println!("   📊 Walls: {}", walls.len());
    println!("   🏠 Rooms: {} (total area {:.1})", rooms.len(), total_area);

    Ok(())
}
