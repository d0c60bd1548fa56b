//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use winit::dpi::LogicalSize;

use parallax_engine::assets::{AssetManifest, AssetSource};
use parallax_engine::device::GpuInit;
use parallax_engine::logging::LoggingConfig;
use parallax_engine::scene::SceneConfig;
use parallax_engine::window::RuntimeConfig;

#[derive(Parser, Debug)]
#[command(
    name = "parallax-studio",
    about = "Photo viewer with a pointer-tracking, depth-displaced grid overlay"
)]
pub struct Args {
    /// Photo shown on the plane.
    #[arg(default_value = "resources/20230521_164044.jpg")]
    pub image: PathBuf,

    /// Grid pattern composited over the photo.
    #[arg(default_value = "resources/grid.jpeg")]
    pub grid: PathBuf,

    /// Depth map for the photo (red/green channels, brighter is nearer).
    pub depth: Option<PathBuf>,

    /// Grid repetitions per plane height (depth mode only).
    #[arg(long, default_value_t = 10.0)]
    pub grid_scale: f32,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Present without vsync.
    #[arg(long)]
    pub no_vsync: bool,

    /// Log filter, overrides `RUST_LOG`.
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    pub fn scene_config(&self) -> SceneConfig {
        SceneConfig {
            assets: AssetManifest {
                base: AssetSource::File(self.image.clone()),
                depth: self.depth.clone().map(AssetSource::File),
                grid: AssetSource::File(self.grid.clone()),
            },
            grid_scale: self.grid_scale,
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: "parallax".to_string(),
            initial_size: LogicalSize::new(self.width.max(1) as f64, self.height.max(1) as f64),
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        let mut init = GpuInit::default();
        if self.no_vsync {
            init.present_mode = wgpu::PresentMode::AutoNoVsync;
        }
        init
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_bundled_resources() {
        let args = Args::parse_from(["parallax-studio"]);
        let scene = args.scene_config();
        assert_eq!(scene.assets, AssetManifest::default());
        assert_eq!(scene.grid_scale, 10.0);
    }

    #[test]
    fn positional_depth_enables_depth_asset() {
        let args = Args::parse_from(["parallax-studio", "a.png", "g.png", "d.png"]);
        let manifest = args.scene_config().assets;
        assert_eq!(manifest.base, AssetSource::file("a.png"));
        assert_eq!(manifest.depth, Some(AssetSource::file("d.png")));
    }

    #[test]
    fn no_vsync_switches_present_mode() {
        let args = Args::parse_from(["parallax-studio", "--no-vsync"]);
        assert_eq!(args.gpu_init().present_mode, wgpu::PresentMode::AutoNoVsync);
    }
}
