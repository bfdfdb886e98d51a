#![allow(clippy::float_cmp)]

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::hit::ResizeAnchor;
use crate::ids::{CyclePicker, FixedPicker, SequentialIds};

// =============================================================
// Helpers
// =============================================================

fn engine() -> EngineCore {
    EngineCore::with_sources(
        ParentBounds::new(800.0, 600.0),
        Box::new(SequentialIds::default()),
        Box::new(CyclePicker::default()),
    )
}

fn photo(n: usize) -> PhotoOutcome {
    PhotoOutcome::Fetched { url: format!("https://photos.test/{n}.png") }
}

fn add(core: &mut EngineCore, n: usize) -> TileId {
    match core.add_photo(&photo(n)) {
        Action::TileAdded(tile) => tile.id,
        other => panic!("expected TileAdded, got {other:?}"),
    }
}

fn place(core: &mut EngineCore, id: TileId, g: Geometry) {
    core.update(&id, &PartialGeometry::from(g)).unwrap();
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn geometry(core: &EngineCore, id: TileId) -> Geometry {
    core.tile(&id).unwrap().geometry
}

/// Always returns the same id, so the engine has to ask again.
struct RepeatingIds {
    ids: Vec<TileId>,
}

impl IdSource for RepeatingIds {
    fn next_id(&mut self) -> TileId {
        if self.ids.len() > 1 { self.ids.remove(0) } else { self.ids[0] }
    }
}

// =============================================================
// add_photo
// =============================================================

#[test]
fn add_photo_appends_default_tile() {
    let mut core = engine();
    let action = core.add_photo(&photo(1));

    let Action::TileAdded(tile) = action else {
        panic!("expected TileAdded");
    };
    assert_eq!(core.tiles.len(), 1);
    assert_eq!(tile.id, Uuid::from_u128(1));
    assert_eq!(tile.geometry, Geometry::new(0.0, 0.0, 100.0, 100.0));
    assert_eq!(tile.color, Color::Red);
    assert_eq!(tile.photo, "https://photos.test/1.png");
    assert_eq!(tile.fit, Fit::Cover);
    assert_eq!(core.tile(&tile.id), Some(&tile));
}

#[test]
fn add_photo_cycles_palette() {
    let mut core = engine();
    let colors: Vec<Color> = (0..6)
        .map(|n| {
            let id = add(&mut core, n);
            core.tile(&id).unwrap().color
        })
        .collect();
    assert_eq!(colors, vec![Color::Red, Color::Blue, Color::Yellow, Color::Green, Color::Purple, Color::Red]);
}

#[test]
fn add_photo_increases_size_by_one_with_unique_ids() {
    let mut core = engine();
    for n in 0..10 {
        let before = core.tiles.len();
        let id = add(&mut core, n);
        assert_eq!(core.tiles.len(), before + 1);
        assert_eq!(core.tiles.iter().filter(|t| t.id == id).count(), 1);
    }
}

#[test]
fn add_photo_skips_colliding_ids() {
    let mut core = EngineCore::with_sources(
        ParentBounds::new(800.0, 600.0),
        Box::new(RepeatingIds { ids: vec![Uuid::from_u128(1), Uuid::from_u128(1), Uuid::from_u128(2)] }),
        Box::new(FixedPicker(0)),
    );
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    assert_eq!(a, Uuid::from_u128(1));
    assert_eq!(b, Uuid::from_u128(2));
}

#[test]
fn add_photo_gives_up_when_ids_never_change() {
    let mut core = EngineCore::with_sources(
        ParentBounds::new(800.0, 600.0),
        Box::new(RepeatingIds { ids: vec![Uuid::from_u128(1)] }),
        Box::new(FixedPicker(0)),
    );
    add(&mut core, 1);
    assert_eq!(core.add_photo(&photo(2)), Action::None);
    assert_eq!(core.tiles.len(), 1);
}

#[test]
fn add_photo_keeps_fallback_url() {
    let mut core = engine();
    let outcome = PhotoOutcome::Fallback { url: "https://photos.test/fallback.png".into(), cause: "down".into() };
    let Action::TileAdded(tile) = core.add_photo(&outcome) else {
        panic!("expected TileAdded");
    };
    assert_eq!(tile.photo, "https://photos.test/fallback.png");
}

// =============================================================
// remove / update / select
// =============================================================

#[test]
fn remove_drops_exactly_one_and_keeps_others() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    let c = add(&mut core, 3);
    let before = core.tiles.clone();

    assert_eq!(core.remove(&b), Action::TileRemoved { id: b });
    assert_eq!(core.tiles.len(), 2);
    assert!(core.tile(&b).is_none());
    for id in [a, c] {
        assert!(Arc::ptr_eq(before.get_shared(&id).unwrap(), core.tiles.get_shared(&id).unwrap()));
    }
}

#[test]
fn remove_unknown_is_noop() {
    let mut core = engine();
    add(&mut core, 1);
    let version = core.tiles.version();
    assert_eq!(core.remove(&Uuid::from_u128(99)), Action::None);
    assert_eq!(core.tiles.version(), version);
}

#[test]
fn remove_selected_clears_selection() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.select(&a);
    core.remove(&a);
    assert_eq!(core.selection(), None);
}

#[test]
fn remove_other_keeps_selection() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    core.select(&a);
    core.remove(&b);
    assert_eq!(core.selection(), Some(a));
}

#[test]
fn update_changes_only_target() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    let before = core.tiles.clone();

    let action = core.update(&a, &PartialGeometry { left: Some(40.0), ..Default::default() }).unwrap();
    assert_eq!(action, Action::TileUpdated { id: a, geometry: Geometry::new(0.0, 40.0, 100.0, 100.0) });
    assert!(Arc::ptr_eq(before.get_shared(&b).unwrap(), core.tiles.get_shared(&b).unwrap()));
    let tile = core.tile(&a).unwrap();
    assert_eq!(tile.color, before.get(&a).unwrap().color);
    assert_eq!(tile.photo, before.get(&a).unwrap().photo);
}

#[test]
fn update_unknown_is_noop() {
    let mut core = engine();
    let action = core.update(&Uuid::from_u128(5), &PartialGeometry { top: Some(1.0), ..Default::default() }).unwrap();
    assert_eq!(action, Action::None);
}

#[test]
fn update_rejects_non_finite() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let err = core.update(&a, &PartialGeometry { width: Some(f64::NAN), ..Default::default() }).unwrap_err();
    assert!(matches!(err, TileError::InvalidGeometry { field: "width", .. }));
    assert_eq!(geometry(&core, a).width, 100.0);
}

#[test]
fn update_keeps_merged_geometry_inside_bounds() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let action = core
        .update(&a, &PartialGeometry { top: Some(5000.0), width: Some(900.0), ..Default::default() })
        .unwrap();
    assert_eq!(action, Action::TileUpdated { id: a, geometry: Geometry::new(500.0, 0.0, 800.0, 100.0) });

    core.update(&a, &PartialGeometry { top: Some(-20.0), left: Some(-3.0), ..Default::default() }).unwrap();
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 800.0, 100.0));
}

#[test]
fn update_rejects_size_below_minimum() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let err = core
        .update(&a, &PartialGeometry { top: Some(5.0), width: Some(-5.0), ..Default::default() })
        .unwrap_err();
    assert_eq!(err, TileError::InvalidGeometry { field: "width", value: -5.0 });
    let err = core.update(&a, &PartialGeometry { height: Some(0.0), ..Default::default() }).unwrap_err();
    assert_eq!(err, TileError::InvalidGeometry { field: "height", value: 0.0 });
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn select_marks_one_tile() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    assert_eq!(core.select(&a), Action::SelectionChanged(Some(a)));
    assert_eq!(core.select(&b), Action::SelectionChanged(Some(b)));
    assert_eq!(core.selection(), Some(b));
    assert_eq!(core.select(&b), Action::None);
}

#[test]
fn select_unknown_is_noop() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.select(&a);
    assert_eq!(core.select(&Uuid::from_u128(77)), Action::None);
    assert_eq!(core.selection(), Some(a));
}

// =============================================================
// drag / resize
// =============================================================

#[test]
fn drag_scenario_clamps_to_bottom() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let action = core.drag(&a, DragProposal { top: 700.0, left: 0.0 }).unwrap();
    assert_eq!(action, Action::TileUpdated { id: a, geometry: Geometry::new(500.0, 0.0, 100.0, 100.0) });
}

#[test]
fn resize_scenario_clamps_width() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let outcome = core.resize(&a, ResizeProposal::new(850.0, 100.0)).unwrap();
    assert_eq!(outcome.geometry.width, 800.0);
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 800.0, 100.0));
}

#[test]
fn drag_uses_committed_size() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.resize(&a, ResizeProposal::new(300.0, 200.0)).unwrap();
    core.drag(&a, DragProposal { top: 550.0, left: 700.0 }).unwrap();
    assert_eq!(geometry(&core, a), Geometry::new(400.0, 500.0, 300.0, 200.0));
}

#[test]
fn resize_uses_committed_origin() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.drag(&a, DragProposal { top: 450.0, left: 650.0 }).unwrap();
    core.resize(&a, ResizeProposal::new(400.0, 400.0)).unwrap();
    assert_eq!(geometry(&core, a), Geometry::new(450.0, 650.0, 150.0, 150.0));
}

#[test]
fn resize_rejects_size_below_minimum() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let err = core.resize(&a, ResizeProposal::new(-50.0, 0.0)).unwrap_err();
    assert_eq!(err, TileError::InvalidGeometry { field: "width", value: -50.0 });
    let err = core.resize(&a, ResizeProposal::new(50.0, 0.5)).unwrap_err();
    assert_eq!(err, TileError::InvalidGeometry { field: "height", value: 0.5 });
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 100.0, 100.0));
    assert!(core.resize(&a, ResizeProposal::new(1.0, 1.0)).is_ok());
}

#[test]
fn drag_unknown_tile_errors() {
    let mut core = engine();
    let err = core.drag(&Uuid::from_u128(3), DragProposal { top: 0.0, left: 0.0 }).unwrap_err();
    assert_eq!(err, TileError::NotFound(Uuid::from_u128(3)));
}

#[test]
fn drag_rejects_infinite_proposal() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let err = core.drag(&a, DragProposal { top: f64::INFINITY, left: 0.0 }).unwrap_err();
    assert!(matches!(err, TileError::InvalidGeometry { field: "top", .. }));
}

#[test]
fn drag_keeps_other_tiles_identical() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    let before = core.tiles.clone();
    core.drag(&a, DragProposal { top: 10.0, left: 10.0 }).unwrap();
    assert!(Arc::ptr_eq(before.get_shared(&b).unwrap(), core.tiles.get_shared(&b).unwrap()));
}

#[test]
fn set_bounds_affects_later_clamps() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.set_bounds(ParentBounds::new(300.0, 200.0));
    core.drag(&a, DragProposal { top: 500.0, left: 500.0 }).unwrap();
    assert_eq!(geometry(&core, a), Geometry::new(100.0, 200.0, 100.0, 100.0));
}

// =============================================================
// Pointer gestures
// =============================================================

#[test]
fn click_selects_tile() {
    let mut core = engine();
    let a = add(&mut core, 1);

    assert!(core.on_pointer_down(pt(50.0, 50.0), Button::Primary).is_empty());
    assert!(matches!(core.input, InputState::Pressing { id } if id == a));
    let actions = core.on_pointer_up(pt(50.0, 50.0), Button::Primary);
    assert!(actions.contains(&Action::SelectionChanged(Some(a))));
    assert_eq!(core.selection(), Some(a));
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn press_released_elsewhere_does_not_select() {
    let mut core = engine();
    add(&mut core, 1);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary);
    core.on_pointer_up(pt(400.0, 400.0), Button::Primary);
    assert_eq!(core.selection(), None);
}

#[test]
fn click_on_empty_canvas_keeps_selection() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.select(&a);
    core.on_pointer_down(pt(500.0, 500.0), Button::Primary);
    core.on_pointer_up(pt(500.0, 500.0), Button::Primary);
    assert_eq!(core.selection(), Some(a));
}

#[test]
fn click_another_tile_moves_selection() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    place(&mut core, b, Geometry::new(200.0, 200.0, 100.0, 100.0));
    core.select(&a);

    core.on_pointer_down(pt(250.0, 250.0), Button::Primary);
    core.on_pointer_up(pt(250.0, 250.0), Button::Primary);
    assert_eq!(core.selection(), Some(b));
}

#[test]
fn secondary_button_is_ignored() {
    let mut core = engine();
    add(&mut core, 1);
    assert!(core.on_pointer_down(pt(50.0, 50.0), Button::Secondary).is_empty());
    assert!(matches!(core.input, InputState::Idle));
    assert!(core.on_pointer_up(pt(50.0, 50.0), Button::Secondary).is_empty());
}

#[test]
fn drag_gesture_moves_selected_tile_and_clamps() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.select(&a);

    let down = core.on_pointer_down(pt(50.0, 50.0), Button::Primary);
    assert_eq!(down, vec![Action::SetCursor("move")]);

    let moved = core.on_pointer_move(pt(150.0, 90.0));
    assert_eq!(moved[0], Action::TileUpdated { id: a, geometry: Geometry::new(40.0, 100.0, 100.0, 100.0) });
    assert_eq!(moved[1], Action::RenderNeeded);

    core.on_pointer_move(pt(2000.0, 2000.0));
    assert_eq!(geometry(&core, a), Geometry::new(500.0, 700.0, 100.0, 100.0));

    core.on_pointer_move(pt(-2000.0, -2000.0));
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 100.0, 100.0));

    core.on_pointer_up(pt(-2000.0, -2000.0), Button::Primary);
    assert!(matches!(core.input, InputState::Idle));
}

#[test]
fn resize_gesture_from_south_east_handle() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.select(&a);

    let down = core.on_pointer_down(pt(100.0, 100.0), Button::Primary);
    assert_eq!(down, vec![Action::SetCursor("nwse-resize")]);
    assert!(matches!(core.input, InputState::ResizingTile { anchor: ResizeAnchor::Se, .. }));

    core.on_pointer_move(pt(150.0, 130.0));
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 150.0, 130.0));

    core.on_pointer_move(pt(5000.0, 5000.0));
    assert_eq!(geometry(&core, a), Geometry::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn resize_gesture_from_west_handle_keeps_origin() {
    let mut core = engine();
    let a = add(&mut core, 1);
    place(&mut core, a, Geometry::new(100.0, 100.0, 100.0, 100.0));
    core.select(&a);

    core.on_pointer_down(pt(100.0, 150.0), Button::Primary);
    assert!(matches!(core.input, InputState::ResizingTile { anchor: ResizeAnchor::W, .. }));
    core.on_pointer_move(pt(60.0, 150.0));
    assert_eq!(geometry(&core, a), Geometry::new(100.0, 100.0, 140.0, 100.0));
}

#[test]
fn delete_button_removes_without_selecting() {
    let mut core = engine();
    let a = add(&mut core, 1);
    let b = add(&mut core, 2);
    place(&mut core, b, Geometry::new(300.0, 300.0, 100.0, 100.0));
    core.select(&b);

    let actions = core.on_pointer_down(pt(400.0, 300.0), Button::Primary);
    assert_eq!(actions, vec![Action::TileRemoved { id: b }, Action::RenderNeeded]);
    assert!(core.tile(&b).is_none());
    assert_eq!(core.selection(), None);

    let up = core.on_pointer_up(pt(400.0, 300.0), Button::Primary);
    assert!(!up.iter().any(|action| matches!(action, Action::SelectionChanged(_))));
    assert!(core.tile(&a).is_some());
}

#[test]
fn hover_reports_cursor_when_idle() {
    let mut core = engine();
    let a = add(&mut core, 1);
    assert_eq!(core.on_pointer_move(pt(50.0, 50.0)), vec![Action::SetCursor("pointer")]);
    core.select(&a);
    assert_eq!(core.cursor_at(pt(50.0, 50.0)), "move");
    assert_eq!(core.cursor_at(pt(100.0, 50.0)), "ew-resize");
    assert_eq!(core.cursor_at(pt(500.0, 500.0)), "default");
}

#[test]
fn gesture_on_removed_tile_is_dropped() {
    let mut core = engine();
    let a = add(&mut core, 1);
    core.select(&a);
    core.on_pointer_down(pt(50.0, 50.0), Button::Primary);
    core.remove(&a);
    assert!(matches!(core.input, InputState::Idle));
    assert_eq!(core.on_pointer_move(pt(60.0, 60.0)), vec![Action::SetCursor("default")]);
}
