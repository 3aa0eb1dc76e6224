//! Print the derived crop geometry for a survey plot.
//!
//! Usage:
//!   cargo run -p cropframe --example plot_params
//!   cargo run -p cropframe --example plot_params -- random 2025
//!
//! Default mode uses a fixed four-corner plot; `random <seed>` draws an
//! oriented rectangle instead and also reports the known inclination.

use cropframe::geom2::sample::{draw_rect, RectCfg};
use cropframe::geom2::{Boundary, Normalization};
use cropframe::params::{PdalParams, PipelineParams};

fn main() {
    let mut args = std::env::args().skip(1);
    let boundary = match args.next().as_deref() {
        None | Some("plot") => Boundary::from_pairs([
            [262986.2, 53128.25],
            [262967.5, 53029.84],
            [262870.1, 53048.72],
            [262888.9, 53148.19],
        ]),
        Some("random") => {
            let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
            let (rect, start, cw) = draw_rect(&RectCfg::default(), seed);
            println!("drawn inclination: {:.6} rad", rect.angle);
            rect.boundary(start, cw)
        }
        Some(other) => {
            eprintln!("usage: plot_params [plot|random <seed>] (got {other:?})");
            return;
        }
    };
    let boundary = match boundary {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    match Normalization::derive(boundary.points()) {
        Ok(n) => {
            println!("lower-left:  {:?}", n.corners.lower_left);
            println!("lower-right: {:?}", n.corners.lower_right);
            println!("angle:       {:.6} rad ({:.4} deg)", n.angle, n.angle.to_degrees());
        }
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    }
    match PdalParams::from_boundary(&boundary, PipelineParams::default()) {
        Ok(p) => {
            println!("polygon:     {}", p.crop.polygon);
            println!("rotation:    {}", p.matrix.transformation);
            println!("translation: {}", p.matrix.translation);
        }
        Err(e) => eprintln!("{e}"),
    }
}
