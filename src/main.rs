//! Standalone viewer for the 3D scatter plot.
//!
//! Usage: `scatterplot3d [CONFIG.json|CONFIG.yaml] [--export-x3d OUT.x3d]`
//!
//! With `--export-x3d` the scene markup is written to the given file and no
//! window is opened.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use scatterplot3d::persistence::load_config;
    use scatterplot3d::{ContainerSize, ScatterPlot, ScatterPlotConfig};

    struct Args {
        config: Option<PathBuf>,
        export_x3d: Option<PathBuf>,
    }

    fn parse_args() -> Result<Args, String> {
        let mut args = Args {
            config: None,
            export_x3d: None,
        };
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--export-x3d" => {
                    let path = it.next().ok_or("--export-x3d needs a file path")?;
                    args.export_x3d = Some(PathBuf::from(path));
                }
                s if s.starts_with("--") => return Err(format!("unknown option {s}")),
                _ if args.config.is_none() => args.config = Some(PathBuf::from(&arg)),
                _ => return Err(format!("unexpected argument {arg}")),
            }
        }
        Ok(args)
    }

    fn export_x3d(config: ScatterPlotConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let [w, h] = config.window_size;
        let plot = ScatterPlot::with_sample_data(ContainerSize::new(w, h), config)?;
        let bytes = plot.write_x3d(path)?;
        log::info!("wrote {bytes} bytes of X3D scene to {}", path.display());
        Ok(())
    }

    pub fn main() -> Result<(), Box<dyn std::error::Error>> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args = parse_args()?;
        let config = match &args.config {
            Some(path) => load_config(path)?,
            None => ScatterPlotConfig::default(),
        };

        if let Some(path) = &args.export_x3d {
            return export_x3d(config, path);
        }
        scatterplot3d::run_scatter_plot(config)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    native::main()
}

// The browser build starts through `app::start_web` instead.
#[cfg(target_arch = "wasm32")]
fn main() {}
