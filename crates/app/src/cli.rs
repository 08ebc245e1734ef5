//! Command line flags (`--name=value`). Unknown values fall back to defaults.

use std::path::PathBuf;

pub const DEFAULT_MESH: &str = "bunny.obj";
pub const DEFAULT_SIZE: u32 = 1280;

#[derive(Clone, Debug, PartialEq)]
pub struct CliOptions {
    pub mesh: PathBuf,
    pub backends: wgpu::Backends,
    pub show_fps: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            mesh: PathBuf::from(DEFAULT_MESH),
            backends: wgpu::Backends::all(),
            show_fps: true,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
        }
    }
}

impl CliOptions {
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Single pass over `args`; when a flag repeats, the last one wins.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--mesh=") {
                if !v.is_empty() {
                    opts.mesh = PathBuf::from(v);
                }
            } else if let Some(v) = arg.strip_prefix("--gpu-backend=") {
                opts.backends = parse_backend(v);
            } else if arg == "--show-fps" {
                opts.show_fps = true;
            } else if let Some(v) = arg.strip_prefix("--show-fps=") {
                opts.show_fps = matches!(
                    v.to_ascii_lowercase().as_str(),
                    "1" | "true" | "on" | "yes"
                );
            } else if let Some(v) = arg.strip_prefix("--size=") {
                if let Some((w, h)) = parse_size(v) {
                    opts.width = w;
                    opts.height = h;
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                if let Ok(w) = v.parse() {
                    opts.width = w;
                }
            } else if let Some(v) = arg.strip_prefix("--height=") {
                if let Ok(h) = v.parse() {
                    opts.height = h;
                }
            } else {
                log::warn!("Ignoring unknown argument '{}'", arg);
            }
        }
        opts.width = opts.width.max(1);
        opts.height = opts.height.max(1);
        opts
    }
}

// auto|vulkan|dx12|metal|gl
fn parse_backend(val: &str) -> wgpu::Backends {
    match val.to_ascii_lowercase().as_str() {
        "auto" => wgpu::Backends::all(),
        "vulkan" | "vk" => wgpu::Backends::VULKAN,
        "dx12" | "d3d12" => wgpu::Backends::DX12,
        "metal" | "mtl" => wgpu::Backends::METAL,
        "gl" | "opengl" | "gles" => wgpu::Backends::GL,
        other => {
            log::warn!("Unknown backend '{}', falling back to auto.", other);
            wgpu::Backends::all()
        }
    }
}

// WxH, either case of the separator
fn parse_size(val: &str) -> Option<(u32, u32)> {
    let (w, h) = val.split_once('x').or_else(|| val.split_once('X'))?;
    Some((w.parse().ok()?, h.parse().ok()?))
}
