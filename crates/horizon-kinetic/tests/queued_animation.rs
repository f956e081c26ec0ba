//! Integration tests for queued animations driven by a shared scheduler.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use horizon_kinetic::easing::{Easing, ease};
use horizon_kinetic::{
    Animation, AnimationOptions, EngineConfig, Fx, ManualClock, StyleElement, SystemClock,
};
use parking_lot::Mutex;

fn setup() -> (Arc<ManualClock>, Arc<Fx>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let clock = Arc::new(ManualClock::new());
    let fx = Arc::new(Fx::new(clock.clone()));
    (clock, fx)
}

fn drain(clock: &ManualClock, fx: &Fx) {
    while fx.is_running() {
        clock.advance(fx.interval());
        fx.process_expired();
    }
}

fn first_write(element: &StyleElement, property: &str) -> usize {
    element
        .writes()
        .iter()
        .position(|(p, _)| p == property)
        .unwrap()
}

fn last_write(element: &StyleElement, property: &str) -> usize {
    element
        .writes()
        .iter()
        .rposition(|(p, _)| p == property)
        .unwrap()
}

#[test]
fn three_requests_run_in_order() {
    let (clock, fx) = setup();
    let element = Arc::new(StyleElement::new());
    let completed = Arc::new(Mutex::new(Vec::new()));

    let animation = Animation::with_fx(element.clone(), fx.clone());
    for (label, property) in [(1, "left"), (2, "top"), (3, "width")] {
        let log = completed.clone();
        animation.animate(
            [(property, 10.0 * label as f64)],
            AnimationOptions::new()
                .duration_ms(48)
                .on_complete(move || log.lock().push(label)),
        );
    }

    drain(&clock, &fx);

    assert_eq!(*completed.lock(), vec![1, 2, 3]);
    assert!(last_write(&element, "left") < first_write(&element, "top"));
    assert!(last_write(&element, "top") < first_write(&element, "width"));
    assert_eq!(element.style("left").as_deref(), Some("10px"));
    assert_eq!(element.style("top").as_deref(), Some("20px"));
    assert_eq!(element.style("width").as_deref(), Some("30px"));
    assert!(!animation.is_animating());
}

#[test]
fn written_value_follows_easing() {
    let (clock, fx) = setup();
    let element = Arc::new(StyleElement::new().with_style("left", "20px"));

    Animation::with_fx(element.clone(), fx.clone())
        .animate([("left", 120.0)], AnimationOptions::new().duration_ms(400));

    clock.advance(Duration::from_millis(100));
    fx.process_expired();

    let remaining = Duration::from_millis(300).as_secs_f64();
    let progress = 1.0 - remaining / Duration::from_millis(400).as_secs_f64();
    let expected = 20.0 + (120.0 - 20.0) * ease(Easing::EaseInOut, progress);
    assert_eq!(element.style("left"), Some(format!("{expected}px")));
}

#[test]
fn one_timer_for_concurrent_handles() {
    let (clock, fx) = setup();
    let element = Arc::new(StyleElement::new());

    // Independent handles on the same element do not wait on each other.
    let a = Animation::with_fx(element.clone(), fx.clone());
    let b = Animation::with_fx(element.clone(), fx.clone());
    a.animate([("left", 10.0)], AnimationOptions::new().duration_ms(64));
    b.animate([("top", 10.0)], AnimationOptions::new().duration_ms(32));

    assert_eq!(fx.active_count(), 2);
    assert!(a.is_animating() && b.is_animating());
    assert_eq!(fx.time_until_next(), Some(fx.interval()));

    drain(&clock, &fx);
    assert!(!fx.is_running());
    assert_eq!(fx.time_until_next(), None);

    // The scheduler restarts on demand.
    a.animate([("left", 0.0)], AnimationOptions::new().duration_ms(32));
    assert!(fx.is_running());
    drain(&clock, &fx);
    assert_eq!(element.style("left").as_deref(), Some("0px"));
}

#[test]
fn cloned_handles_share_a_queue() {
    let (clock, fx) = setup();
    let element = Arc::new(StyleElement::new());

    let a = Animation::with_fx(element.clone(), fx.clone());
    let b = a.clone();
    a.animate([("left", 10.0)], AnimationOptions::new().duration_ms(32));
    b.animate([("top", 10.0)], AnimationOptions::new().duration_ms(32));

    assert_eq!(fx.active_count(), 1);
    assert_eq!(b.queue().pending_count(), 1);

    drain(&clock, &fx);
    assert!(last_write(&element, "left") < first_write(&element, "top"));
}

#[test]
fn stop_skips_completion_and_advances_queue() {
    let (clock, fx) = setup();
    let element = Arc::new(StyleElement::new());
    let completed = Arc::new(AtomicUsize::new(0));

    let animation = Animation::with_fx(element.clone(), fx.clone());
    let c = completed.clone();
    animation
        .animate(
            [("left", 100.0)],
            AnimationOptions::new()
                .duration_ms(1000)
                .on_complete(move || {
                    c.fetch_add(1, Ordering::SeqCst);
                }),
        )
        .animate([("top", 8.0)], AnimationOptions::new().duration_ms(32));

    clock.advance(Duration::from_millis(16));
    fx.process_expired();
    assert!(animation.stop());

    drain(&clock, &fx);
    assert_eq!(completed.load(Ordering::SeqCst), 0);
    assert_ne!(element.style("left").as_deref(), Some("100px"));
    assert_eq!(element.style("top").as_deref(), Some("8px"));
}

#[test]
fn step_callback_and_zero_duration() {
    let (_clock, fx) = setup();
    let element = Arc::new(StyleElement::new().with_style("opacity", "1"));
    let steps = Arc::new(Mutex::new(Vec::new()));

    let s = steps.clone();
    Animation::with_fx(element.clone(), fx.clone()).animate(
        [("opacity", 0.0), ("zIndex", 5.0)],
        AnimationOptions::new()
            .duration(Duration::ZERO)
            .on_step(move |property, value| s.lock().push((property.to_owned(), value))),
    );

    // Finished before animate returned.
    assert!(!fx.is_running());
    assert_eq!(
        *steps.lock(),
        vec![("opacity".to_string(), 0.0), ("zIndex".to_string(), 5.0)]
    );
    assert_eq!(element.style("opacity").as_deref(), Some("0"));
    assert_eq!(element.style("zIndex").as_deref(), Some("5"));
}

#[test]
fn configured_engine() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tick_interval_ms = 8").unwrap();
    writeln!(file, "[defaults]").unwrap();
    writeln!(file, "duration_ms = 32").unwrap();
    writeln!(file, "easing = \"linear\"").unwrap();
    let config = EngineConfig::load(file.path()).unwrap();

    let clock = Arc::new(ManualClock::new());
    let fx = Arc::new(config.build_fx(clock.clone()));
    let element = Arc::new(StyleElement::new());
    let animation =
        Animation::with_fx(element.clone(), fx.clone()).with_defaults(config.defaults.clone());

    animation.animate([("left", 100.0)], AnimationOptions::new());
    clock.advance(Duration::from_millis(16));
    fx.process_expired();
    assert_eq!(element.style("left").as_deref(), Some("50px"));

    drain(&clock, &fx);
    assert_eq!(element.style("left").as_deref(), Some("100px"));
}

#[test]
fn runs_to_completion_on_system_clock() {
    let fx = Arc::new(Fx::new(Arc::new(SystemClock::new())));
    let element = Arc::new(StyleElement::new().with_style("height", "10px"));

    Animation::with_fx(element.clone(), fx.clone())
        .animate([("height", 0.0)], AnimationOptions::new().duration_ms(40))
        .animate([("height", 30.0)], AnimationOptions::new().duration_ms(40));

    fx.run_until_idle();
    assert_eq!(element.style("height").as_deref(), Some("30px"));
    assert!(element.writes_to("height").len() >= 4);
}
