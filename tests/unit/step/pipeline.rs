use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    foundation::{
        core::{Raster, Size},
        error::PrimitiveError,
    },
    render::{pixmap::PixmapSurface, surface::ResolvedOutput},
    step::stage::{RedrawStage, hook_fn, sync_hook},
    test_support::FakeModel,
};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    tag: &'static str,
    log: Log,
    fail_at: Option<usize>,
}

impl StepStage<FakeModel> for Recorder {
    fn on_step<'a>(&'a mut self, model: &'a FakeModel, step: usize) -> StepFuture<'a> {
        Box::pin(async move {
            self.log
                .borrow_mut()
                .push(format!("{}:{step}:{}", self.tag, model.current.width));
            if self.fail_at == Some(step) {
                return Err(PrimitiveError::hook(format!("{} refused step {step}", self.tag)));
            }
            Ok(())
        })
    }
}

fn recorder(tag: &'static str, log: &Log, fail_at: Option<usize>) -> Box<Recorder> {
    Box::new(Recorder {
        tag,
        log: log.clone(),
        fail_at,
    })
}

#[test]
fn stages_run_in_insertion_order() {
    let log = Log::default();
    let mut p = StepPipeline::<FakeModel>::new()
        .with_stage("user", recorder("user", &log, None))
        .with_stage("redraw", recorder("redraw", &log, None));
    let model = FakeModel::filled(Size::new(3, 1), [0, 0, 0, 255]);

    pollster::block_on(p.run(&model, 0)).unwrap();
    pollster::block_on(p.run(&model, 1)).unwrap();

    assert_eq!(p.stage_names(), vec!["user", "redraw"]);
    assert_eq!(
        *log.borrow(),
        vec!["user:0:3", "redraw:0:3", "user:1:3", "redraw:1:3"]
    );
}

#[test]
fn first_failure_skips_remaining_stages() {
    let log = Log::default();
    let mut p = StepPipeline::<FakeModel>::new()
        .with_stage("user", recorder("user", &log, Some(1)))
        .with_stage("redraw", recorder("redraw", &log, None));
    let model = FakeModel::filled(Size::new(2, 2), [0, 0, 0, 255]);

    pollster::block_on(p.run(&model, 0)).unwrap();
    let err = pollster::block_on(p.run(&model, 1)).unwrap_err();

    assert!(matches!(err, PrimitiveError::Hook(_)));
    assert_eq!(*log.borrow(), vec!["user:0:2", "redraw:0:2", "user:1:2"]);
}

#[test]
fn failing_user_hook_leaves_surface_at_previous_frame() {
    let mut surface = PixmapSurface::new(Size::new(2, 2));
    {
        let log = Log::default();
        let mut p = StepPipeline::<FakeModel>::new()
            .with_stage("user", recorder("user", &log, Some(1)))
            .with_stage(
                "redraw",
                Box::new(RedrawStage::new(ResolvedOutput::Surface(&mut surface))),
            );

        let first = FakeModel::filled(Size::new(2, 2), [255, 0, 0, 255]);
        let second = FakeModel::filled(Size::new(2, 2), [0, 0, 255, 255]);
        pollster::block_on(p.on_step(&first, 0)).unwrap();
        assert!(pollster::block_on(p.on_step(&second, 1)).is_err());
    }
    assert_eq!(
        surface.raster(),
        &Raster::filled(Size::new(2, 2), [255, 0, 0, 255])
    );
}

#[test]
fn closure_adapters_compose() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_async = seen.clone();
    let seen_sync = seen.clone();

    let mut p: StepPipeline<'_, FakeModel> = StepPipeline::new();
    p.push(
        "async",
        Box::new(hook_fn(move |model: &FakeModel, step| {
            let width = model.current.width;
            let seen = seen_async.clone();
            Box::pin(async move {
                seen.borrow_mut().push(("async", step, width));
                Ok(())
            })
        })),
    );
    p.push(
        "sync",
        Box::new(sync_hook(move |model: &FakeModel, step| {
            seen_sync
                .borrow_mut()
                .push(("sync", step, model.current.width));
            Ok(())
        })),
    );

    let model = FakeModel::filled(Size::new(5, 1), [0; 4]);
    pollster::block_on(p.run(&model, 7)).unwrap();

    assert_eq!(p.len(), 2);
    assert_eq!(*seen.borrow(), vec![("async", 7, 5), ("sync", 7, 5)]);
}

#[test]
fn empty_pipeline_is_ok() {
    let mut p: StepPipeline<'_, FakeModel> = StepPipeline::default();
    assert!(p.is_empty());
    pollster::block_on(p.run(&FakeModel::filled(Size::new(1, 1), [0; 4]), 0)).unwrap();
}

#[test]
fn redraw_stage_counts_paths() {
    let mut surface = PixmapSurface::new(Size::new(4, 4));
    let mut stage = RedrawStage::new(ResolvedOutput::Surface(&mut surface));

    pollster::block_on(stage.on_step(&FakeModel::filled(Size::new(4, 4), [0; 4]), 0)).unwrap();
    pollster::block_on(stage.on_step(&FakeModel::filled(Size::new(2, 2), [0; 4]), 1)).unwrap();

    let st = stage.compositor().stats();
    assert_eq!(st.fast_path_frames, 1);
    assert_eq!(st.slow_path_frames, 1);
}
