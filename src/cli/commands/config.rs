use anyhow::Result;

use super::config_manager;
use crate::cli::GlobalArgs;
use crate::config::render_effective;
use crate::ui::Style;

/// Shows the effective configuration, or writes a starter file with `--init`.
pub fn run_config(init: bool, global: &GlobalArgs) -> Result<()> {
    let manager = config_manager(global)?;
    let path = manager.config_path().display().to_string();

    if init {
        if manager.init()? {
            println!("{} Wrote {}", Style::success("✓"), Style::value(&path));
        } else {
            println!("{} already exists, leaving it unchanged", Style::value(&path));
        }
        return Ok(());
    }

    let config = manager.load_or_default()?;
    if manager.exists() {
        println!("{} {}", Style::label("# config file:"), path);
    } else {
        println!(
            "{} {} {}",
            Style::label("# config file:"),
            path,
            Style::secondary("(not found, showing defaults)")
        );
    }
    print!("{}", render_effective(&config)?);

    Ok(())
}
