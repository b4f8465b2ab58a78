use mono_poly_decomp::{dbg_mono_chain, decomposer::Decomposer, info_label, point::Point};
use tracing::{error, info};

pub fn main() {
    tracing_subscriber::fmt()
        .pretty()
        // enable everything
        .with_max_level(tracing::Level::TRACE)
        // sets this to be the default, global collector for this application.
        .init();

    // a box whose top is notched twice, with a diamond hole
    let contour: Vec<Point> = [
        (0.0, 0.0),
        (8.0, 0.0),
        (8.0, 6.0),
        (6.0, 2.0),
        (4.0, 6.0),
        (2.0, 2.0),
        (0.0, 6.0),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect();
    let hole: Vec<Point> = [(4.0, 0.5), (3.0, 1.0), (4.0, 1.5), (5.0, 1.0)]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();

    match Decomposer::decompose(&[contour, hole]) {
        Ok(decomposition) => {
            info!(
                "{} {} monotone chains",
                info_label!("result"),
                decomposition.nb_chains
            );
            for ix in 0..decomposition.nb_chains {
                info!("{:?}", dbg_mono_chain!(&decomposition.geometry, ix));
            }
        }
        Err(e) => error!("decomposition failed: {}", e),
    }
}
