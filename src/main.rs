use std::{
    io::{self, Write},
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::bail;
use clap::{Parser, Subcommand};
use cursor::{
    AdjacentIterator, Bounds, BoundsConfig, CircleType, DistanceIterator,
    FairAdjacentIterator, OrthAdjacentIterator, RadiusIterator,
    RandomRectangleIterator, RectangleIterator,
};
use glam::{ivec2, IVec2};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use util::GameRng;

#[derive(Parser, Debug)]
#[command(about = "Walk grid cursors and print the cells they visit")]
struct Args {
    #[arg(long, value_name = "FILE")]
    /// IDM file with the grid bounds, defaults are used if omitted.
    bounds: Option<PathBuf>,

    #[arg(long, value_name = "SEED")]
    /// Fixed RNG seed for the randomized cursors.
    seed: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Every cell of the rectangle between two corners.
    Rect {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,

        #[arg(long)]
        /// Visit the cells in random order.
        shuffle: bool,
    },

    /// In-bounds neighbours of a cell.
    Adjacent {
        x: i32,
        y: i32,

        #[arg(long)]
        /// Also visit the cell itself.
        include_center: bool,

        #[arg(long)]
        /// Only the four orthogonal neighbours.
        orthogonal: bool,

        #[arg(long, conflicts_with_all = ["include_center", "orthogonal"])]
        /// Visit the neighbours in random order.
        fair: bool,
    },

    /// Cells within a radius of a center.
    Radius {
        x: i32,
        y: i32,
        r: i32,

        #[arg(long, default_value_t = CircleType::Round)]
        /// Area shape, one of circle, pointy, round or square.
        shape: CircleType,

        #[arg(long)]
        exclude_center: bool,
    },

    /// Spiral outwards from a center, printing each cell's ring.
    Distance {
        x: i32,
        y: i32,
        max_radius: i32,

        #[arg(long)]
        /// Start each ring from a random cell.
        fair: bool,

        #[arg(long)]
        exclude_center: bool,
    },
}

impl Args {
    fn bounds(&self) -> anyhow::Result<Bounds> {
        let config = match &self.bounds {
            Some(path) => BoundsConfig::load(path)?,
            None => BoundsConfig::default(),
        };
        Bounds::new(config)
    }

    fn rng(&self) -> GameRng {
        if let Some(seed) = self.seed.as_ref() {
            util::srng(seed)
        } else {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_nanos())
                .unwrap_or_default()
                .to_string();
            log::info!("generated seed: {seed}");
            util::srng(&seed)
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let bounds = args.bounds()?;
    let mut out = io::stdout().lock();

    match args.command {
        Command::Rect {
            x1,
            y1,
            x2,
            y2,
            shuffle,
        } => {
            let (a, b) = (ivec2(x1, y1), ivec2(x2, y2));
            if shuffle {
                let mut rng = args.rng();
                print_cells(
                    &mut out,
                    RandomRectangleIterator::new(a, b, &mut rng),
                )?;
            } else {
                print_cells(&mut out, RectangleIterator::new(a, b))?;
            }
        }
        Command::Adjacent {
            x,
            y,
            include_center,
            orthogonal,
            fair,
        } => {
            let center = ivec2(x, y);
            if fair {
                let mut rng = args.rng();
                print_cells(
                    &mut out,
                    FairAdjacentIterator::new(&bounds, center, &mut rng),
                )?;
            } else if orthogonal {
                print_cells(
                    &mut out,
                    OrthAdjacentIterator::new(&bounds, center, !include_center),
                )?;
            } else {
                print_cells(
                    &mut out,
                    AdjacentIterator::new(&bounds, center, !include_center),
                )?;
            }
        }
        Command::Radius {
            x,
            y,
            r,
            shape,
            exclude_center,
        } => {
            let center = ivec2(x, y);
            check_center(&bounds, center)?;
            print_cells(
                &mut out,
                RadiusIterator::new(&bounds, center, r, shape, exclude_center),
            )?;
        }
        Command::Distance {
            x,
            y,
            max_radius,
            fair,
            exclude_center,
        } => {
            let center = ivec2(x, y);
            check_center(&bounds, center)?;
            if fair {
                let mut rng = args.rng();
                let mut iter = DistanceIterator::fair(
                    &bounds,
                    center,
                    exclude_center,
                    max_radius,
                    &mut rng,
                );
                while let Some(p) = iter.next() {
                    writeln!(out, "{} {} {}", p.x, p.y, iter.radius())?;
                }
            } else {
                let mut iter = DistanceIterator::new(
                    &bounds,
                    center,
                    exclude_center,
                    max_radius,
                );
                while let Some(p) = iter.next() {
                    writeln!(out, "{} {} {}", p.x, p.y, iter.radius())?;
                }
            }
        }
    }

    Ok(())
}

/// Radius and spiral cursors must start inside the map.
fn check_center(bounds: &Bounds, center: IVec2) -> anyhow::Result<()> {
    if !bounds.map_bounds(center) {
        let map = bounds.map();
        bail!(
            "center {center} is outside map bounds {} to {}",
            map.min(),
            map.max()
        );
    }
    Ok(())
}

fn print_cells(
    out: &mut impl Write,
    cells: impl Iterator<Item = IVec2>,
) -> anyhow::Result<()> {
    let mut n = 0;
    for p in cells {
        writeln!(out, "{} {}", p.x, p.y)?;
        n += 1;
    }
    log::debug!("printed {n} cells");
    Ok(())
}
