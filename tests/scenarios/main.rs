use std::time::Duration;

use euclid::default::{Point2D, Rect, Size2D};
use graphdeck::VERSION;
use graphdeck::probe::gesture::{PointerEvent, PointerPhase, PointerSink};
use graphdeck::probe::{ManualClock, PerfProbe, SurfaceRegistry};

#[test]
fn scenarios_binary_smoke_runs() {
    assert!(!VERSION.is_empty());
}

#[derive(Default)]
struct CountingSink {
    begins: usize,
    moves: usize,
    ends: usize,
}

impl PointerSink for CountingSink {
    fn dispatch_pointer(&mut self, event: PointerEvent) {
        match event.phase {
            PointerPhase::Begin => self.begins += 1,
            PointerPhase::Move => self.moves += 1,
            PointerPhase::End => self.ends += 1,
        }
    }
}

#[test]
fn benchmark_run_end_to_end_under_manual_clock() {
    let clock = ManualClock::new();
    let mut probe = PerfProbe::new(clock.clone());
    let mut registry = SurfaceRegistry::new();
    registry.register(
        "graph-canvas",
        Rect::new(Point2D::new(0.0, 0.0), Size2D::new(800.0, 600.0)),
    );
    let mut sink = CountingSink::default();

    probe.start("graph-canvas", &registry).unwrap();
    for _ in 0..1000 {
        if !probe.is_running() {
            break;
        }
        clock.advance(Duration::from_millis(16));
        probe.on_frame();
        probe.tick(&mut sink);
    }

    assert!(!probe.is_running());
    let result = probe.last_result().expect("run should produce a result");
    assert_eq!(result.interaction_duration_ms, 960.0);
    assert!(result.average_fps > 0.0);
    assert_eq!(sink.begins, 1);
    assert_eq!(sink.moves, 60);
    assert_eq!(sink.ends, 1);
}
