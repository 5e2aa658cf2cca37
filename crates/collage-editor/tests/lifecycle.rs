//! Integration tests: mount/unmount, deferred initialization and the
//! responsive switch between free and compact modes.

use collage_core::probe::{StaticProbe, probe_all};
use collage_core::{CanvasConfig, ImageId, ImageRecord};
use collage_editor::canvas::{CanvasView, FloatingCanvas};
use collage_editor::drag::DragMode;
use collage_editor::responsive::{ModeChange, ViewportMode};
use futures::executor::block_on;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn fixture(prefix: &str, count: usize) -> (Vec<ImageRecord>, StaticProbe) {
    let mut probe = StaticProbe::new();
    let records = (0..count)
        .map(|i| {
            let url = format!("/{prefix}/{i}.jpg");
            probe = std::mem::take(&mut probe).with(url.clone(), 640, 480);
            ImageRecord::new(&format!("{prefix}_{i}"), url)
        })
        .collect();
    (records, probe)
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

#[test]
fn initialization_waits_for_measured_viewport() {
    let (records, _) = fixture("unmeasured", 2);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    assert!(canvas.begin_initialization().is_none());
    assert_eq!(canvas.view(), CanvasView::Loading);

    canvas.set_viewport(1024.0, 0.0);
    assert!(canvas.begin_initialization().is_none());

    canvas.set_viewport(1024.0, 768.0);
    assert!(canvas.begin_initialization().is_some());
}

#[test]
fn initialization_runs_once() {
    let (records, probe) = fixture("once", 3);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(1024.0, 768.0);

    assert!(block_on(canvas.initialize(&probe, &mut rng())));
    let first = canvas.images().to_vec();
    assert!(canvas.begin_initialization().is_none());
    assert!(!block_on(canvas.initialize(&probe, &mut StdRng::seed_from_u64(1))));
    assert_eq!(canvas.images(), first.as_slice());
}

#[test]
fn results_after_unmount_are_ignored() {
    let (records, probe) = fixture("stale", 2);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(1024.0, 768.0);

    let stale = canvas.begin_initialization().unwrap();
    let probes = block_on(probe_all(&probe, canvas.records()));
    canvas.unmount();
    assert!(!canvas.complete_initialization(stale, &probes, &mut rng()));
    assert!(canvas.images().is_empty());

    // A fresh mount gets a fresh ticket; the old one stays dead.
    canvas.mount();
    let fresh = canvas.begin_initialization().unwrap();
    assert!(!canvas.complete_initialization(stale, &probes, &mut rng()));
    assert!(canvas.complete_initialization(fresh, &probes, &mut rng()));
    assert_eq!(canvas.images().len(), 2);
}

#[test]
fn unmount_drops_drag_and_arrangement() {
    let (records, probe) = fixture("teardown", 2);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(1024.0, 768.0);
    assert!(block_on(canvas.initialize(&probe, &mut rng())));

    canvas.pointer_down_on(ImageId::intern("teardown_0"), DragMode::Move, 10.0, 10.0);
    canvas.unmount();
    assert!(!canvas.is_mounted());
    assert_eq!(canvas.active_id(), None);
    assert!(!canvas.pointer_move(40.0, 40.0));
}

#[test]
fn viewport_collapsing_mid_flight_defers_initialization() {
    let (records, probe) = fixture("collapse", 2);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(1024.0, 768.0);

    let ticket = canvas.begin_initialization().unwrap();
    let probes = block_on(probe_all(&probe, canvas.records()));
    canvas.set_viewport(1024.0, 0.0);
    assert!(!canvas.complete_initialization(ticket, &probes, &mut rng()));

    canvas.set_viewport(1024.0, 768.0);
    assert!(block_on(canvas.initialize(&probe, &mut rng())));
}

#[test]
fn compact_viewport_switches_to_grid_and_back() {
    let (records, probe) = fixture("switch", 3);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(1024.0, 768.0);
    assert!(block_on(canvas.initialize(&probe, &mut rng())));
    let arranged = canvas.images().to_vec();

    let id = ImageId::intern("switch_1");
    assert!(canvas.pointer_down_on(id, DragMode::Move, 50.0, 50.0));
    assert_eq!(canvas.set_viewport(500.0, 768.0), ModeChange::EnteredCompact);
    assert_eq!(canvas.mode(), ViewportMode::Compact);
    assert_eq!(canvas.active_id(), None);

    let CanvasView::Compact { tiles } = canvas.view() else {
        panic!("expected compact view");
    };
    assert_eq!(tiles.len(), 3);

    // Pointer input is inert while compact.
    assert!(!canvas.pointer_down_on(id, DragMode::Move, 50.0, 50.0));
    assert!(!canvas.pointer_move(80.0, 80.0));

    assert_eq!(canvas.set_viewport(1024.0, 768.0), ModeChange::LeftCompact);
    let CanvasView::Free { images } = canvas.view() else {
        panic!("expected free view");
    };
    assert_eq!(images.len(), 3);
    // The pointer-down before the switch raised switch_1; nothing else moved.
    for (now, before) in canvas.images().iter().zip(&arranged) {
        assert_eq!(now.position, before.position);
        assert_eq!(now.size(), before.size());
    }
}

#[test]
fn compact_at_mount_defers_until_widened() {
    let (records, probe) = fixture("narrow", 2);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(500.0, 900.0);
    assert!(canvas.is_compact());
    assert!(!block_on(canvas.initialize(&probe, &mut rng())));
    assert!(!canvas.is_initialized());

    canvas.set_viewport(767.0, 900.0);
    assert!(canvas.begin_initialization().is_none());

    canvas.set_viewport(768.0, 900.0);
    assert!(!canvas.is_compact());
    assert!(block_on(canvas.initialize(&probe, &mut rng())));
    assert_eq!(canvas.images().len(), 2);
}

#[test]
fn partial_failures_still_fill_the_canvas() {
    let records = vec![
        ImageRecord::new("partial_ok_a", "/partial/a.jpg"),
        ImageRecord::new("partial_broken", "/partial/missing.jpg"),
        ImageRecord::new("partial_ok_b", "/partial/b.jpg"),
    ];
    let probe = StaticProbe::new()
        .with("/partial/a.jpg", 1200, 800)
        .with("/partial/b.jpg", 800, 1200);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();
    canvas.set_viewport(1440.0, 900.0);
    assert!(block_on(canvas.initialize(&probe, &mut rng())));

    let broken = canvas.get(ImageId::intern("partial_broken")).unwrap();
    assert_eq!(broken.width(), 220.0);
    assert_eq!(broken.aspect_ratio(), 0.75);
    assert_eq!(broken.rotation_degrees, 0.0);

    let z: Vec<u32> = canvas.images().iter().map(|i| i.z_index).collect();
    assert_eq!(z, vec![1, 2, 3]);
    assert_eq!(canvas.z_top(), 4);
}

#[test]
fn view_json_matches_host_contract() {
    let records = vec![
        ImageRecord::new("json_0", "/json/0.jpg").with_alt("Studio shot"),
        ImageRecord::new("json_1", "/json/1.jpg"),
    ];
    let probe = StaticProbe::new()
        .with("/json/0.jpg", 400, 300)
        .with("/json/1.jpg", 400, 300);
    let mut canvas = FloatingCanvas::new(records, CanvasConfig::default()).unwrap();

    canvas.set_viewport(600.0, 800.0);
    let compact = serde_json::to_value(canvas.view()).unwrap();
    assert_eq!(compact["mode"], "compact");
    assert_eq!(compact["tiles"][0]["aspect"], "portrait");
    assert_eq!(compact["tiles"][1]["alt"], "Portfolio image");
    assert_eq!(compact["tiles"][1]["revealDelayMs"], 100);
    assert_eq!(compact["tiles"][1]["visible"], false);
    assert_eq!(compact["tiles"][1]["scale"], 0.95);

    assert!(canvas.reveal());
    let compact = serde_json::to_value(canvas.view()).unwrap();
    assert_eq!(compact["tiles"][1]["visible"], true);
    assert_eq!(compact["tiles"][1]["scale"], 1.0);

    canvas.set_viewport(1200.0, 800.0);
    assert_eq!(serde_json::to_value(canvas.view()).unwrap()["mode"], "loading");

    assert!(block_on(canvas.initialize(&probe, &mut rng())));
    let free = serde_json::to_value(canvas.view()).unwrap();
    assert_eq!(free["mode"], "free");
    assert_eq!(free["images"][0]["id"], "json_0");
    assert_eq!(free["images"][0]["alt"], "Studio shot");
    assert_eq!(free["images"][1]["zIndex"], 2);
    assert_eq!(free["images"][0]["dragging"], false);
    assert_eq!(free["images"][0]["visible"], false);

    assert!(canvas.reveal());
    let free = serde_json::to_value(canvas.view()).unwrap();
    assert_eq!(free["images"][1]["visible"], true);
    assert_eq!(free["images"][1]["revealDelayMs"], 100);
}
