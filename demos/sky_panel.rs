//! Sky tuning panel: live sliders for the atmosphere and burst tunables.
//!
//! Run with: cargo run --example sky_panel --features egui

use skyburst::prelude::*;

fn main() {
    env_logger::init();

    let dawn = SkyParams {
        elevation: 1.5,
        turbidity: 6.0,
        exposure: 0.35,
        ..SkyParams::default()
    };

    let result = Fireworks::new()
        .with_sky(dawn)
        .with_control_panel()
        .run();

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
