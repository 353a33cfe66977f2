// What you SEE:
// • One window, two curves on shared axes:
//   blue = the gamma LUT against its index (0..10),
//   orange = x^(1/2.2) against x over [0, 1].
// • Caption shows the power-law exponent that best fits the LUT.
// • Close the window or press ESC to quit.
// With `--output chart.png` nothing opens; the same chart is written to disk.

mod chart;
mod draw;
mod error;
mod export;
mod gamma;
mod types;

use chart::{Chart, SERIES_COLORS};
use clap::Parser;
use draw::Drawer;
use error::Error;
use gamma::{GAMMA, GammaCurves, fit_exponent, max_deviation};
use log::info;
use std::path::PathBuf;
use types::Series;

#[derive(Debug, Parser)]
#[command(author, version, about = "Plot a gamma lookup table against x^(1/2.2)", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(64..=8192))]
    /// Chart width in pixels.
    width: u32,

    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(64..=8192))]
    /// Chart height in pixels.
    height: u32,

    #[arg(short = 'o', long)]
    /// Write the chart to this PNG instead of opening a window.
    output: Option<PathBuf>,
}

/// LUT against index, reference against domain, one set of axes.
fn gamma_chart(curves: &GammaCurves, fitted: f64, max_dev: f64) -> Chart {
    Chart::new()
        .title(format!("GAMMA LUT VS X^(1/{GAMMA})"))
        .caption(format!("LUT FIT: X^{fitted:.4}  MAX DEV: {max_dev:.4}"))
        .plot(Series::indexed("LUT", SERIES_COLORS[0], &curves.lut))
        .plot(Series::xy(
            &format!("X^(1/{GAMMA})"),
            SERIES_COLORS[1],
            &curves.domain,
            &curves.reference,
        ))
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let curves = GammaCurves::new();
    let fitted = fit_exponent(&curves.domain, &curves.lut)?;
    info!(
        "LUT best fits x^{fitted:.4} (1/{:.3}); reference is x^{:.4}",
        1.0 / fitted,
        1.0 / GAMMA
    );
    let (dev_x, max_dev) = max_deviation(&curves.lut, GAMMA, 1001);
    info!("interpolated LUT deviates from the reference by at most {max_dev:.4} (at x = {dev_x:.3})");

    let screen = gamma_chart(&curves, fitted, max_dev).render(args.width, args.height)?;

    match &args.output {
        Some(path) => export::save(&screen, path)?,
        None => {
            let mut drawer = Drawer::new("Gamma LUT vs x^(1/2.2)", screen.width, screen.height)?;
            drawer.show(&screen)?;
        }
    }
    Ok(())
}
