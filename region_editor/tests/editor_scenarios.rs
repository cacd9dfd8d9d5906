use region_editor::config::ExitMargins;
use region_editor::layout::{fit_canvas, parse_resolution};
use region_editor::ready::ViewReady;
use region_editor::{
    DragState, DrawOp, EditorConfig, EditorError, Handle, NormalRect, Point, PointerEvent,
    RegionEditor, SelectionRule, Size,
};
use std::time::Duration;

fn mask_editor(canvas: Size) -> RegionEditor {
    let mut editor = RegionEditor::new(&EditorConfig::default(), canvas).unwrap();
    editor.init_drawer(1920.0, 1080.0).unwrap();
    editor
}

fn gesture(editor: &mut RegionEditor, points: &[(f32, f32)]) {
    let (first, rest) = points.split_first().unwrap();
    editor.handle_pointer(PointerEvent::Down(Point::new(first.0, first.1)));
    for &(x, y) in rest {
        editor.handle_pointer(PointerEvent::Move(Point::new(x, y)));
    }
    editor.handle_pointer(PointerEvent::Up);
}

#[test]
fn privacy_mask_session() {
    // Four mask slots reported by the device, two of them unused.
    let res = parse_resolution("1920*1080").unwrap();
    let canvas = fit_canvas(960.0, res.aspect(), 2000.0);
    let mut editor = mask_editor(canvas);
    editor.push_normal(true, NormalRect::new(100, 100, 300, 200), "", false);
    editor.push_normal(true, NormalRect::default(), "", false);
    editor.push_normal(true, NormalRect::default(), "", false);
    editor.push_normal(true, NormalRect::new(1000, 600, 200, 200), "", true);

    editor.set_drawing(true);
    gesture(&mut editor, &[(400.0, 300.0), (420.0, 320.0), (460.0, 350.0)]);
    gesture(&mut editor, &[(700.0, 100.0), (650.0, 60.0)]);
    assert!(editor.store().get(1).is_some_and(|r| r.width > 0.0));
    assert_eq!(editor.region_normal(1), Some(NormalRect::new(800, 600, 120, 100)));
    assert_eq!(editor.region_normal(2), Some(NormalRect::new(1300, 120, 100, 80)));

    // Move the first mask off the left edge: it stops at x = 0.
    gesture(&mut editor, &[(100.0, 100.0), (40.0, 100.0), (10.0, 100.0)]);
    assert_eq!(editor.region_normal(0), Some(NormalRect::new(0, 100, 300, 200)));

    let shades = editor
        .scene()
        .iter()
        .filter(|op| matches!(op, DrawOp::Shade(_)))
        .count();
    assert_eq!(shades, 1);
}

#[test]
fn resize_keeps_normal_coordinates() {
    let mut editor = mask_editor(Size::new(960.0, 540.0));
    editor.push_normal(true, NormalRect::new(200, 200, 100, 100), "", false);
    let before = editor.region_normal(0);

    editor.resize_canvas(480.0, 270.0);
    let r = editor.store().get(0).unwrap();
    assert!((r.x - 50.0).abs() < 1e-3);
    assert!((r.width - 25.0).abs() < 1e-3);
    assert_eq!(editor.region_normal(0), before);

    editor.resize_canvas(960.0, 540.0);
    let r = editor.store().get(0).unwrap();
    assert!((r.x - 100.0).abs() < 1e-3);
    assert!((r.height - 50.0).abs() < 1e-3);
    assert_eq!(editor.region_normal(0), before);
}

#[test]
fn resize_through_every_handle_keeps_corners_ordered() {
    let mut editor = mask_editor(Size::new(960.0, 540.0));
    editor.push_normal(true, NormalRect::new(400, 400, 400, 400), "", false);
    gesture(&mut editor, &[(300.0, 300.0)]);
    assert_eq!(editor.active(), Some(0));

    for handle in Handle::ALL {
        let p = editor.handles().unwrap().point(handle);
        editor.handle_pointer(PointerEvent::Down(Point::new(p.x + 1.0, p.y + 1.0)));
        assert!(matches!(editor.state(), DragState::Resizing { .. }), "{handle:?}");
        editor.handle_pointer(PointerEvent::Move(Point::new(p.x + 31.0, p.y + 21.0)));
        editor.handle_pointer(PointerEvent::Up);

        let set = editor.handles().unwrap();
        let tl = set.point(Handle::TopLeft);
        let br = set.point(Handle::BottomRight);
        assert!(tl.x <= br.x && tl.y <= br.y);
        let r = editor.store().get(0).unwrap();
        assert!(r.width >= 0.0 && r.height >= 0.0);
    }
}

#[test]
fn drag_is_dropped_near_the_edge() {
    let mut config = EditorConfig::default();
    config.exit_margins = ExitMargins {
        left: 10.0,
        top: 10.0,
        right: 10.0,
        bottom: 10.0,
    };
    let mut editor = RegionEditor::new(&config, Size::new(960.0, 540.0)).unwrap();
    editor.push_normal(true, NormalRect::new(400, 400, 200, 200), "", false);
    editor.handle_pointer(PointerEvent::Down(Point::new(250.0, 250.0)));
    editor.handle_pointer(PointerEvent::Move(Point::new(250.0, 5.0)));
    assert_eq!(editor.state(), DragState::Idle);
    let y = editor.store().get(0).unwrap().y;
    editor.handle_pointer(PointerEvent::Move(Point::new(250.0, 400.0)));
    assert_eq!(editor.store().get(0).unwrap().y, y);
}

#[test]
fn motion_grid_session() {
    let mut editor = RegionEditor::new(&EditorConfig::default(), Size::new(220.0, 180.0)).unwrap();
    editor.init_motion(22, 18, &"0".repeat(6 * 18)).unwrap();
    assert_eq!(editor.store().len(), 24 * 18);

    editor.set_drawing(true);
    // Cells are 10x10: sweep from the middle of cell (1, 1) to cell (3, 2).
    gesture(&mut editor, &[(15.0, 15.0), (25.0, 20.0), (35.0, 25.0)]);
    let hex = editor.motion_string().unwrap();
    assert_eq!(&hex[..6], "000000");
    assert_eq!(&hex[6..12], "E00000");
    assert_eq!(&hex[12..18], "E00000");
    assert!(hex[18..].chars().all(|c| c == '0'));

    editor.delete_all();
    assert!(editor.motion_string().unwrap().chars().all(|c| c == '0'));
}

#[test]
fn motion_overlap_rule() {
    let mut editor = RegionEditor::new(&EditorConfig::default(), Size::new(40.0, 10.0)).unwrap();
    editor.init_motion(4, 1, "0").unwrap();
    editor.set_selection_rule(SelectionRule::Overlap);
    editor.set_drawing(true);
    gesture(&mut editor, &[(12.0, 2.0), (18.0, 5.0)]);
    assert_eq!(editor.motion_string().as_deref(), Some("2"));
}

#[test]
fn motion_map_errors_are_reported() {
    let mut editor = RegionEditor::new(&EditorConfig::default(), Size::new(40.0, 10.0)).unwrap();
    let err = editor.init_motion(4, 1, "X").unwrap_err();
    assert!(err.to_string().contains("invalid hex digit"));
    assert!(matches!(err, EditorError::Codec(_)));
}

#[test]
fn loader_waits_for_view() {
    let ready = ViewReady::new();
    let loader_flag = ready.clone();
    let loader = std::thread::spawn(move || {
        loader_flag.wait(Duration::from_secs(2), Duration::from_millis(5))
    });
    std::thread::sleep(Duration::from_millis(20));
    ready.mark_ready();
    assert!(loader.join().unwrap().is_ok());
}
