//! Basic fireworks display: spherical bursts only, default dusk sky.
//!
//! Run with: cargo run --example fireworks
//!
//! Left click to launch, right drag to orbit, scroll to zoom, Escape to quit.

use skyburst::prelude::*;

fn main() {
    env_logger::init();

    if let Err(e) = Fireworks::new().run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
