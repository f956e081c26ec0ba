//! Slide an element to the right, then fade it out.
//!
//! Logs at debug level, so the scheduler starting and going idle is visible.

use std::sync::Arc;

use horizon_kinetic::{
    Animation, AnimationOptions, Easing, Fx, StyleElement, SystemClock,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .init();

    let fx = Arc::new(Fx::new(Arc::new(SystemClock::new())));
    let element = Arc::new(
        StyleElement::new()
            .with_style("left", "0px")
            .with_style("opacity", "1"),
    );

    Animation::with_fx(element.clone(), fx.clone())
        .animate(
            [("left", 240.0)],
            AnimationOptions::new()
                .duration_ms(600)
                .easing_fn(Easing::EaseInOut)
                .on_step(|property, value| println!("{property:>8} = {value:8.2}")),
        )
        .animate(
            [("opacity", 0.0)],
            AnimationOptions::new()
                .duration_ms(300)
                .easing_fn(Easing::Linear)
                .on_complete(|| println!("faded out")),
        );

    fx.run_until_idle();

    println!(
        "final: left={} opacity={} ({} writes)",
        element.style("left").unwrap_or_default(),
        element.style("opacity").unwrap_or_default(),
        element.writes().len(),
    );
}
