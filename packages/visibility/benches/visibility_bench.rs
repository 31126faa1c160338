use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fxlayout_visibility::*;
use std::rc::Rc;

fn decide_with_fallback(c: &mut Criterion) {
    let mut inputs = InputCache::new();
    inputs.set(BreakpointKey::Base, InputValue::empty());
    inputs.set(BreakpointKey::GtSm, InputValue::from("false"));
    let resolver = BreakpointActivationResolver::with_active(BreakpointKey::Lg);
    let default = Polarity::Hide.default_value();

    c.bench_function("decide_with_fallback", |b| {
        b.iter(|| {
            let resolution = resolver.resolve(black_box(&inputs), &default);
            VisibilityEngine::decide(Polarity::Hide, &resolution, false, "block")
        })
    });
}

fn breakpoint_sweep(c: &mut Criterion) {
    let monitor = Rc::new(MediaMonitor::new());
    let recorder = Rc::new(StyleRecorder::new());
    let context = DirectiveContext::new(monitor.clone(), recorder.clone()).with_connector(Connector::new());

    let directives: Vec<VisibilityDirective> = (0..50)
        .map(|id| {
            let directive = VisibilityDirective::hide(ElementRef::with_display(id, "block"), &context);
            directive.set_input(BreakpointKey::Sm, true);
            directive.set_input(BreakpointKey::Md, "false");
            directive.mount();
            directive
        })
        .collect();

    c.bench_function("breakpoint_sweep_50_elements", |b| {
        b.iter(|| {
            for key in BreakpointKey::responsive() {
                monitor.activate(black_box(key));
            }
            monitor.activate(BreakpointKey::Base);
            recorder.clear();
        })
    });

    drop(directives);
}

criterion_group!(benches, decide_with_fallback, breakpoint_sweep);
criterion_main!(benches);
