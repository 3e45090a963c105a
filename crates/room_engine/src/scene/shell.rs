//! Structural shell construction
//!
//! Builds the scene-initialization state of a rectangular room from a
//! [`RoomConfig`]: four walls, a floor sheet, a ceiling sheet, and one
//! default light, with the polygon and light metadata conventions used by
//! downstream consumers. Retrieval and layout never touch these structural
//! elements; they exist before the first conversation turn.

use crate::config::RoomConfig;
use crate::foundation::math::Vec3;
use crate::scene::{Category, Placement, SceneElement, SceneError, SceneRegistry};

fn polygon_json(corners: &[Vec3]) -> serde_json::Value {
    serde_json::json!(corners
        .iter()
        .map(|c| [c.x, c.y, c.z])
        .collect::<Vec<[f32; 3]>>())
}

fn wall(center: Vec3, base_a: Vec3, base_b: Vec3, height: f32, config: &RoomConfig) -> SceneElement {
    let top_b = Vec3::new(base_b.x, base_b.y, height);
    let top_a = Vec3::new(base_a.x, base_a.y, height);
    let mut element = SceneElement::new(Category::Walls, vec![Placement::at(center.x, center.y, center.z)])
        .with_metadata_entry("polygon", polygon_json(&[base_a, base_b, top_b, top_a]));
    if let Some(material) = &config.wall_material {
        element = element.with_material(material.clone());
    }
    element
}

fn sheet(category: Category, z: f32, config: &RoomConfig) -> SceneElement {
    let (hw, hd) = (config.width / 2.0, config.depth / 2.0);
    let outline = [
        Vec3::new(-hw, -hd, z),
        Vec3::new(hw, -hd, z),
        Vec3::new(hw, hd, z),
        Vec3::new(-hw, hd, z),
    ];
    let mut element = SceneElement::new(category, vec![Placement::origin()])
        .with_bbox_size(Vec3::new(config.width, config.depth, 0.0))
        .with_metadata_entry("polygon", polygon_json(&outline));
    let material = match category {
        Category::Floors => &config.floor_material,
        _ => &config.ceiling_material,
    };
    if let Some(material) = material {
        element = element.with_material(material.clone());
    }
    element
}

/// Build the structural registry for a rectangular room
///
/// Elements are inserted in the conventional order `wall_0..wall_3`,
/// `floors`, `ceilings`, `default_light`. Walls are centered on their edge
/// at half room height and carry their outline as `polygon` metadata (base
/// corners first, then top corners).
pub fn build_room_shell(config: &RoomConfig) -> Result<SceneRegistry, SceneError> {
    let mut scene = SceneRegistry::new(Some(&config.room_type));
    let (hw, hd, h) = (config.width / 2.0, config.depth / 2.0, config.height);
    let mid = h / 2.0;

    // Walls in south, east, north, west order, base corners wound
    // counter-clockwise viewed from above.
    let edges = [
        (Vec3::new(0.0, -hd, mid), Vec3::new(-hw, -hd, 0.0), Vec3::new(hw, -hd, 0.0)),
        (Vec3::new(hw, 0.0, mid), Vec3::new(hw, -hd, 0.0), Vec3::new(hw, hd, 0.0)),
        (Vec3::new(0.0, hd, mid), Vec3::new(hw, hd, 0.0), Vec3::new(-hw, hd, 0.0)),
        (Vec3::new(-hw, 0.0, mid), Vec3::new(-hw, hd, 0.0), Vec3::new(-hw, -hd, 0.0)),
    ];
    for (i, (center, base_a, base_b)) in edges.into_iter().enumerate() {
        scene.insert(&format!("wall_{i}"), wall(center, base_a, base_b, h, config))?;
    }

    scene.insert("floors", sheet(Category::Floors, 0.0, config))?;
    scene.insert("ceilings", sheet(Category::Ceilings, h, config))?;

    let light = SceneElement::new(
        Category::Lights,
        vec![Placement::at(0.0, 0.0, config.default_light.height)],
    )
    .with_description("default light at the center of the room")
    .with_light_params(&config.default_light.params);
    scene.insert("default_light", light)?;

    log::info!(
        "built {}x{}x{} m room shell ({} elements)",
        config.width,
        config.depth,
        config.height,
        scene.len()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Material;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn warehouse() -> RoomConfig {
        RoomConfig {
            room_type: "warehouse".to_string(),
            wall_material: Some(Material::new("Bricks074", "exposed brick, rough").unwrap()),
            floor_material: Some(Material::new("Concrete042A", "polished concrete, smooth").unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_shell_key_order() {
        let scene = build_room_shell(&warehouse()).expect("shell");
        let keys: Vec<&str> = scene.keys().collect();
        assert_eq!(
            keys,
            vec!["wall_0", "wall_1", "wall_2", "wall_3", "floors", "ceilings", "default_light"]
        );
        assert_eq!(scene.room_type.as_deref(), Some("warehouse"));
    }

    #[test]
    fn test_wall_centers_and_polygons() {
        let scene = build_room_shell(&warehouse()).expect("shell");

        let south = scene.get("wall_0").expect("wall_0");
        assert_relative_eq!(
            south.placements[0].position,
            Vec3::new(0.0, -4.0, 2.25),
            epsilon = EPSILON
        );
        let polygon = south.polygon().expect("polygon metadata");
        assert_eq!(polygon.len(), 4);
        assert_relative_eq!(polygon[0], Vec3::new(-3.0, -4.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(polygon[3], Vec3::new(-3.0, -4.0, 4.5), epsilon = EPSILON);
        assert_eq!(south.material.as_ref().map(|m| m.id.as_str()), Some("Bricks074"));
    }

    #[test]
    fn test_sheets_are_flat() {
        let scene = build_room_shell(&warehouse()).expect("shell");

        let floors = scene.get("floors").expect("floors");
        assert_relative_eq!(
            floors.bbox_size.expect("bbox"),
            Vec3::new(6.0, 8.0, 0.0),
            epsilon = EPSILON
        );
        let ceiling_polygon = scene.get("ceilings").expect("ceilings").polygon().expect("polygon");
        assert!(ceiling_polygon.iter().all(|c| (c.z - 4.5).abs() < EPSILON));
    }

    #[test]
    fn test_shell_is_export_ready() {
        // Structural elements at the origin must not read as unplaced.
        let scene = build_room_shell(&warehouse()).expect("shell");
        assert!(scene.ensure_export_ready().is_ok());

        let light = scene.get("default_light").expect("light");
        let params = light.light_params().expect("light metadata");
        assert_eq!(params.light_type, "point");
        assert_relative_eq!(params.intensity, 40.0, epsilon = EPSILON);
    }
}
