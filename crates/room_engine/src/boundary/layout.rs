//! Layout boundary: whole-registry replacement with contract enforcement
//!
//! The layout solver owns all cross-key spatial reasoning. It receives the
//! current registry, a non-empty subset of its keys, and an instruction,
//! and returns a full registry in which only the named keys' placements may
//! differ. The core commits that result atomically or rejects it entirely;
//! merging it field by field is not a supported strategy. Callers must not
//! edit the named keys between issuing a solve and committing its result.

use std::collections::HashSet;

use crate::boundary::BoundaryError;
use crate::scene::{SceneElement, SceneRegistry};

/// External layout-solving service
pub trait LayoutSolver {
    /// Compute new placements for the named keys
    ///
    /// Must return the full registry with everything outside the named
    /// keys' placements unchanged.
    fn solve_layout(
        &self,
        scene: &SceneRegistry,
        keys: &[&str],
        instruction: &str,
    ) -> Result<SceneRegistry, BoundaryError>;
}

/// Everything but the placements, used for drift comparison
fn non_placement_fields(element: &SceneElement) -> SceneElement {
    let mut stripped = element.clone();
    stripped.placements.clear();
    stripped
}

/// Check a solver result against the replacement contract
fn check_contract(
    before: &SceneRegistry,
    after: &SceneRegistry,
    named: &HashSet<&str>,
) -> Result<(), BoundaryError> {
    if after.room_type != before.room_type {
        return Err(BoundaryError::violation("layout result changed room_type"));
    }

    let before_keys: Vec<&str> = before.keys().collect();
    let after_keys: Vec<&str> = after.keys().collect();
    if before_keys != after_keys {
        return Err(BoundaryError::violation(format!(
            "layout result changed the key set: expected {before_keys:?}, got {after_keys:?}"
        )));
    }

    after
        .validate()
        .map_err(|e| BoundaryError::violation(format!("layout result: {e}")))?;

    for (key, element_before) in before.iter() {
        // Key sets match, so the element is present.
        let Some(element_after) = after.get(key) else {
            continue;
        };
        if non_placement_fields(element_before) != non_placement_fields(element_after) {
            return Err(BoundaryError::violation(format!(
                "layout result changed non-placement fields of '{key}'"
            )));
        }
        if !named.contains(key) && element_before.placements != element_after.placements {
            return Err(BoundaryError::violation(format!(
                "layout result moved '{key}', which was not in the requested set"
            )));
        }
    }
    Ok(())
}

/// Solve a layout and commit the result atomically
///
/// Preconditions: `keys` is non-empty and every key exists in `scene`.
/// The solver result is checked against the replacement contract; on
/// success it replaces the registry wholesale, on any violation the
/// registry is left exactly as it was and the violation is surfaced.
pub fn solve_layout(
    solver: &impl LayoutSolver,
    scene: &mut SceneRegistry,
    keys: &[&str],
    instruction: &str,
) -> Result<(), BoundaryError> {
    if keys.is_empty() {
        return Err(BoundaryError::InvalidRequest(
            "layout solve requires a non-empty key set".to_string(),
        ));
    }
    for key in keys {
        if !scene.contains(key) {
            return Err(BoundaryError::Scene(crate::scene::SceneError::KeyNotFound(
                (*key).to_string(),
            )));
        }
    }

    let proposed = solver.solve_layout(scene, keys, instruction)?;

    let named: HashSet<&str> = keys.iter().copied().collect();
    if let Err(violation) = check_contract(scene, &proposed, &named) {
        log::warn!("layout solve rejected: {violation}");
        return Err(violation);
    }

    log::info!(
        "layout solve committed for {} key(s): \"{}\"",
        keys.len(),
        instruction
    );
    *scene = proposed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::{Category, Placement, SceneError};

    /// Solver that applies a closure to the cloned registry
    struct ClosureSolver<F>(F)
    where
        F: Fn(&mut SceneRegistry);

    impl<F> LayoutSolver for ClosureSolver<F>
    where
        F: Fn(&mut SceneRegistry),
    {
        fn solve_layout(
            &self,
            scene: &SceneRegistry,
            _keys: &[&str],
            _instruction: &str,
        ) -> Result<SceneRegistry, BoundaryError> {
            let mut result = scene.clone();
            (self.0)(&mut result);
            Ok(result)
        }
    }

    fn three_element_scene() -> SceneRegistry {
        let mut scene = SceneRegistry::new(Some("test room"));
        for (key, x) in [("a", 1.0), ("b", 2.0), ("c", 3.0)] {
            scene
                .insert(
                    key,
                    SceneElement::new(Category::Objects, vec![Placement::at(x, 0.0, 0.5)])
                        .with_bbox_size(Vec3::new(1.0, 1.0, 1.0)),
                )
                .expect("insert");
        }
        scene
    }

    #[test]
    fn test_commit_moves_named_keys() {
        let mut scene = three_element_scene();
        let solver = ClosureSolver(|result: &mut SceneRegistry| {
            result
                .set_placements("a", vec![Placement::at(-2.0, 3.0, 0.5)])
                .expect("move a");
        });

        solve_layout(&solver, &mut scene, &["a", "b"], "move a to the corner")
            .expect("conforming result commits");
        assert_eq!(scene.get("a").unwrap().placements[0].position, Vec3::new(-2.0, 3.0, 0.5));
        assert_eq!(scene.get("c").unwrap().placements[0].position, Vec3::new(3.0, 0.0, 0.5));
    }

    #[test]
    fn test_unrequested_key_drift_rejected() {
        let mut scene = three_element_scene();
        let before = scene.clone();
        let solver = ClosureSolver(|result: &mut SceneRegistry| {
            result
                .set_placements("a", vec![Placement::at(-2.0, 3.0, 0.5)])
                .expect("move a");
            // Contract breach: c was not requested.
            result
                .set_placements("c", vec![Placement::at(9.0, 9.0, 0.5)])
                .expect("move c");
        });

        let err = solve_layout(&solver, &mut scene, &["a", "b"], "tidy up").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
        // Reject leaves the registry exactly as it was.
        assert_eq!(scene, before);
    }

    #[test]
    fn test_key_set_drift_rejected() {
        let mut scene = three_element_scene();
        let before = scene.clone();

        let dropper = ClosureSolver(|result: &mut SceneRegistry| {
            result.remove("c").expect("drop c");
        });
        assert!(matches!(
            solve_layout(&dropper, &mut scene, &["a"], "x").unwrap_err(),
            BoundaryError::ContractViolation { .. }
        ));
        assert_eq!(scene, before);

        let adder = ClosureSolver(|result: &mut SceneRegistry| {
            result
                .insert(
                    "extra",
                    SceneElement::new(Category::Objects, vec![Placement::at(0.0, 0.0, 0.5)])
                        .with_bbox_size(Vec3::new(1.0, 1.0, 1.0)),
                )
                .expect("insert extra");
        });
        assert!(matches!(
            solve_layout(&adder, &mut scene, &["a"], "x").unwrap_err(),
            BoundaryError::ContractViolation { .. }
        ));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_non_placement_field_drift_rejected() {
        let mut scene = three_element_scene();
        let before = scene.clone();
        let solver = ClosureSolver(|result: &mut SceneRegistry| {
            result.get_mut("a").unwrap().description = "repainted".to_string();
        });

        let err = solve_layout(&solver, &mut scene, &["a"], "x").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
        assert_eq!(scene, before);
    }

    #[test]
    fn test_room_type_drift_rejected() {
        let mut scene = three_element_scene();
        let solver = ClosureSolver(|result: &mut SceneRegistry| {
            result.room_type = Some("ballroom".to_string());
        });
        assert!(matches!(
            solve_layout(&solver, &mut scene, &["a"], "x").unwrap_err(),
            BoundaryError::ContractViolation { .. }
        ));
    }

    #[test]
    fn test_request_preconditions() {
        let mut scene = three_element_scene();
        let noop = ClosureSolver(|_: &mut SceneRegistry| {});

        assert!(matches!(
            solve_layout(&noop, &mut scene, &[], "x").unwrap_err(),
            BoundaryError::InvalidRequest(_)
        ));
        assert!(matches!(
            solve_layout(&noop, &mut scene, &["ghost"], "x").unwrap_err(),
            BoundaryError::Scene(SceneError::KeyNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_result_placements_rejected() {
        let mut scene = three_element_scene();
        let before = scene.clone();
        let solver = ClosureSolver(|result: &mut SceneRegistry| {
            // Bypass the mutation API to produce an invalid registry.
            result.get_mut("a").unwrap().placements.clear();
        });

        let err = solve_layout(&solver, &mut scene, &["a"], "x").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
        assert_eq!(scene, before);
    }
}
