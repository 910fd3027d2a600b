use std::error::Error;
use std::path::Path;

use shearfig_core::figure::FlowFigure;
use shearfig_plot::FigureApp;

/// Fixed output path, relative to the working directory.
const OUTPUT_PATH: &str = "figures/figure_04.png";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let figure = FlowFigure::compose();

    shearfig_render::render_to_file(&figure, Path::new(OUTPUT_PATH))?;
    log::info!("wrote {OUTPUT_PATH}");

    FigureApp::new(figure).run("Shear-flow stability")?;
    Ok(())
}
