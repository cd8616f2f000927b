use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    foundation::{
        core::{Raster, Size},
        error::PrimitiveError,
    },
    options::opts::EngineOptions,
    render::{pixmap::PixmapSurface, surface::OutputDescriptor},
    step::stage::sync_hook,
    test_support::{FakeEngine, FakeModel, MemoryHost, RecordingSurface, png_bytes},
};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn steps(n: u32) -> EngineOptions {
    EngineOptions {
        num_steps: n,
        ..EngineOptions::default()
    }
}

#[test]
fn scaled_output_shows_the_model() {
    let mut host = MemoryHost::default().with_resource("red.png", png_bytes(64, 64, RED));
    let mut surface = PixmapSurface::new(Size::new(32, 32));
    let mut engine = FakeEngine::default();

    let opts = PrimitiveOpts::new("red.png")
        .output(OutputDescriptor::Surface(&mut surface))
        .engine(steps(1));
    let model = pollster::block_on(primitive(&mut engine, &mut host, opts)).unwrap();

    assert_eq!(model.current.size(), Size::new(64, 64));
    assert_eq!(engine.targets, vec![Size::new(64, 64)]);
    assert!(surface.image_smoothing());
    for (x, y) in [(0, 0), (31, 0), (0, 31), (31, 31), (16, 16)] {
        assert_eq!(surface.raster().pixel(x, y), Some(RED));
    }
}

#[test]
fn invalid_opts_fail_before_any_fetch() {
    let mut host = MemoryHost::default();
    let mut engine = FakeEngine::default();

    let err = pollster::block_on(primitive(
        &mut engine,
        &mut host,
        PrimitiveOpts::<FakeModel>::new(""),
    ))
    .err()
    .unwrap();

    assert_eq!(err.field(), Some("input"));
    assert_eq!(host.fetches(), 0);
    assert!(engine.targets.is_empty());
}

#[test]
fn absent_output_runs_without_drawing() {
    let mut host = MemoryHost::default();
    let mut engine = FakeEngine::default();
    let opts = PrimitiveOpts::new(Raster::filled(Size::new(3, 3), BLUE)).engine(steps(4));

    let model = pollster::block_on(primitive(&mut engine, &mut host, opts)).unwrap();
    assert_eq!(model.current.pixel(2, 2), Some(BLUE));
    assert_eq!(engine.steps_run, 4);
}

#[test]
fn hook_runs_before_redraw_every_step() {
    let mut host = MemoryHost::default();
    let mut surface = RecordingSurface::new(Size::new(2, 2));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let mut engine = FakeEngine::default();

    let opts = PrimitiveOpts::new(Raster::filled(Size::new(2, 2), RED))
        .output(OutputDescriptor::Surface(&mut surface))
        .engine(steps(3))
        .on_step(sync_hook(move |_: &FakeModel, step| {
            log.borrow_mut().push(step);
            Ok(())
        }));
    pollster::block_on(primitive(&mut engine, &mut host, opts)).unwrap();

    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert_eq!(
        surface.calls,
        vec![
            "set_image_smoothing",
            "put_image_data",
            "put_image_data",
            "put_image_data"
        ]
    );
    assert_eq!(surface.smoothing, Some(true));
}

#[test]
fn failing_hook_skips_redraw_and_ends_run() {
    let mut host = MemoryHost::default();
    let mut surface = PixmapSurface::new(Size::new(2, 2));
    let mut engine = FakeEngine {
        palette: vec![BLUE],
        ..FakeEngine::default()
    };

    let opts = PrimitiveOpts::new(Raster::filled(Size::new(2, 2), RED))
        .output(OutputDescriptor::Surface(&mut surface))
        .engine(steps(5))
        .on_step(sync_hook(|_: &FakeModel, _| {
            Err(PrimitiveError::hook("stop"))
        }));
    let err = pollster::block_on(primitive(&mut engine, &mut host, opts))
        .err()
        .unwrap();

    assert!(matches!(err, PrimitiveError::Hook(_)));
    assert_eq!(engine.steps_run, 0);
    assert_eq!(surface.raster().pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn named_output_is_drawn_through_host() {
    let mut host = MemoryHost::default()
        .with_resource("blue.png", png_bytes(4, 4, BLUE))
        .with_surface("canvas", PixmapSurface::new(Size::new(4, 4)));
    let mut engine = FakeEngine::default();

    let opts = PrimitiveOpts::new("blue.png")
        .output(OutputDescriptor::Named("canvas".into()))
        .engine(steps(2));
    pollster::block_on(primitive(&mut engine, &mut host, opts)).unwrap();

    let canvas = host.pixmap("canvas").unwrap();
    assert_eq!(canvas.raster().pixel(3, 3), Some(BLUE));
    assert!(canvas.image_smoothing());
}

#[test]
fn unknown_output_fails_before_engine_starts() {
    let mut host = MemoryHost::default();
    let mut engine = FakeEngine::default();
    let opts = PrimitiveOpts::new(Raster::filled(Size::new(1, 1), RED))
        .output(OutputDescriptor::Named("missing".into()));

    let err = pollster::block_on(primitive(&mut engine, &mut host, opts))
        .err()
        .unwrap();
    assert!(matches!(err, PrimitiveError::SurfaceNotFound(_)));
    assert!(engine.targets.is_empty());
}
