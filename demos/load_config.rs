//! Build a grid from a TOML configuration.
use segment_grid::prelude::*;

const CONFIG: &str = r#"
tolerance = 1e-6

[region]
min = { x = -500.0, y = -250.0 }
max = { x = 500.0, y = 250.0 }

[resolution]
kind = "cell_size"
width = 25.0
height = 25.0
"#;

fn main() -> Result<(), GridError> {
    env_logger::init();

    let config = GridConfig::from_toml_str(CONFIG)?;
    let grid = GridIndex::from_config(&config)?;
    println!(
        "{}x{} grid of {}x{} cells over {:?}",
        grid.columns(),
        grid.rows(),
        grid.cell_width(),
        grid.cell_height(),
        grid.region()
    );
    assert_eq!(grid.columns(), 40);
    assert_eq!(grid.rows(), 20);

    // Write it back out
    println!("{}", config.to_toml_string()?);
    Ok(())
}
