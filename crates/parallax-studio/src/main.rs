mod app;
mod args;

use clap::Parser;

use parallax_engine::logging::init_logging;
use parallax_engine::window::Runtime;

use app::ParallaxApp;
use args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.logging_config());

    let config = args.scene_config();
    log::info!(
        "base {} / grid {} / depth {}",
        config.assets.base,
        config.assets.grid,
        config.assets.depth.as_ref().map_or("none".to_string(), ToString::to_string),
    );

    Runtime::run(args.runtime_config(), args.gpu_init(), ParallaxApp::new(config))
}
