//! Print a seeded scatter arrangement as JSON.
//!
//! Usage: cargo run -p collage-core --example scatter_preview [seed]
//!
//! One of the sample URLs is deliberately missing from the probe table so
//! the output shows a fallback placement next to loaded ones.

use collage_core::layout::{Viewport, scatter};
use collage_core::probe::{StaticProbe, probe_all};
use collage_core::{CanvasConfig, ImageRecord};
use futures::executor::block_on;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    env_logger::init();

    let seed = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Invalid seed: {e}");
            std::process::exit(1);
        }
        None => 0,
    };

    let records = vec![
        ImageRecord::new("editorial", "/hero/editorial.jpg").with_alt("Editorial shoot"),
        ImageRecord::new("billboard", "/hero/billboard.jpg"),
        ImageRecord::new("missing", "/hero/missing.jpg"),
        ImageRecord::new("poster", "/hero/poster.jpg"),
        ImageRecord::new("still", "/hero/still.jpg"),
    ];
    let probe = StaticProbe::new()
        .with("/hero/editorial.jpg", 1600, 2000)
        .with("/hero/billboard.jpg", 2400, 1000)
        .with("/hero/poster.jpg", 1000, 1500)
        .with("/hero/still.jpg", 1920, 1080);

    let probes = block_on(probe_all(&probe, &records));
    let arrangement = match scatter(
        &records,
        &probes,
        Viewport::new(1280.0, 800.0),
        &CanvasConfig::default(),
        &mut StdRng::seed_from_u64(seed),
    ) {
        Ok(arrangement) => arrangement,
        Err(e) => {
            eprintln!("Layout failed: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&arrangement.images) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        }
    }
    eprintln!("next z-index: {}", arrangement.z_order.top() + 1);
}
