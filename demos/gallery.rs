//! Widget gallery: loads `demos/gallery.toml` (or the file given as the first
//! argument) and runs it in the terminal.
//!
//! Narrow terminals get a single stacked column; from 100 columns up the wide
//! layout applies. Esc or Ctrl+C quits. Logs go to `$TMPDIR/trellis/logs`.

use std::path::PathBuf;

use trellis::logging;
use trellis::{AppConfig, Runtime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args_os().nth(1).map_or_else(
        || PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join("gallery.toml"),
        PathBuf::from,
    );

    let _logging = logging::init(&logging::default_log_dir());

    let config = AppConfig::load_from_path(&path)?;
    let mut engine = config.build_engine()?;

    {
        let mut runtime = Runtime::with_config(config.runtime_config())?;
        runtime.run(&mut engine)?;
    }

    for tag in engine.take_emitted() {
        println!("emitted: {tag}");
    }
    Ok(())
}
