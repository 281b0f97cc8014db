use skyburst::prelude::*;

fn main() {
    env_logger::init();

    let result = Fireworks::new()
        .with_reference_mesh(ReferenceMesh::heart(600, 1.0))
        .with_radius_range(0.5, 1.5)
        .run();

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
