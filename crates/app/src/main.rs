//! Entry point: load one mesh, flatten it, draw it until the window closes.

use anyhow::{Context, Result};
use platform::ViewerConfig;
use renderer::SceneSettings;

mod cli;

use cli::CliOptions;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = CliOptions::from_env();
    log::info!(
        "Starting Mesh Viewer. Mesh: {}, backend: {:?}, show_fps={}, window_size={}x{}",
        opts.mesh.display(),
        opts.backends,
        opts.show_fps,
        opts.width,
        opts.height
    );

    let mesh = asset::load(&opts.mesh)
        .with_context(|| format!("Failed to load mesh {}", opts.mesh.display()))?;
    if let Some((lo, hi)) = mesh.bounds() {
        log::info!("Mesh bounds: min={:?} max={:?}", lo, hi);
    }
    let buffers = asset::build(&mesh);

    let config = ViewerConfig {
        width: opts.width,
        height: opts.height,
        backends: opts.backends,
        show_fps: opts.show_fps,
        ..ViewerConfig::default()
    };
    platform::run_with_renderer(config, buffers, SceneSettings::default())?;

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
