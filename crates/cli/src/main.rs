use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use miller::{flux_surface, linspace, sweep_area, AngularGrid, DEFAULT_POINTS, DEFAULT_SWEEP_SAMPLES};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod config;
mod plot;
mod provenance;
mod table;

use config::{MillerTable, Need};

/// Without a subcommand the flags describe a `surface` run.
#[derive(Parser)]
#[command(name = "miller")]
#[command(about = "Miller flux surfaces: boundary plots, enclosed area, triangularity sweeps")]
#[command(args_conflicts_with_subcommands = true)]
struct Cmd {
    #[command(flatten)]
    surface: SurfaceArgs,

    #[command(subcommand)]
    action: Option<Action>,
}

/// Shape parameters; flags override the `[miller]` table of the config file.
#[derive(Args, Debug)]
struct ShapeArgs {
    /// TOML config holding a `[miller]` table
    #[arg(long, default_value = config::DEFAULT_CONFIG)]
    filename: PathBuf,
    /// Aspect ratio A = R0 / r
    #[arg(long = "A")]
    aspect_ratio: Option<f64>,
    /// Elongation
    #[arg(long)]
    kappa: Option<f64>,
    /// Triangularity in [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    delta: Option<f64>,
    /// Major radius [m]
    #[arg(long = "R0")]
    major_radius: Option<f64>,
}

impl ShapeArgs {
    fn flags(&self) -> MillerTable {
        MillerTable {
            aspect_ratio: self.aspect_ratio,
            kappa: self.kappa,
            delta: self.delta,
            major_radius: self.major_radius,
        }
    }
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    #[command(flatten)]
    shape: ShapeArgs,
    #[arg(long, default_value = "miller.png")]
    plotname: PathBuf,
    /// Angle samples over [0, 2π]
    #[arg(long, default_value_t = DEFAULT_POINTS)]
    points: usize,
}

#[derive(Subcommand)]
enum Action {
    /// Plot the flux surface and log its enclosed area (the default)
    Surface(SurfaceArgs),
    /// Sweep triangularity and plot area against delta
    Sweep {
        #[command(flatten)]
        shape: ShapeArgs,
        #[arg(long, default_value = "AvsD.png")]
        plotname: PathBuf,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start: f64,
        #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
        stop: f64,
        #[arg(long, default_value_t = DEFAULT_SWEEP_SAMPLES)]
        samples: usize,
        #[arg(long, default_value_t = DEFAULT_POINTS)]
        points: usize,
        /// Print the sweep as a table
        #[arg(long)]
        table: bool,
    },
    /// Print a JSON block with resolved parameters and the enclosed area
    Report {
        #[command(flatten)]
        shape: ShapeArgs,
        #[arg(long, default_value_t = DEFAULT_POINTS)]
        points: usize,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        None => surface(&cmd.surface),
        Some(Action::Surface(args)) => surface(&args),
        Some(Action::Sweep {
            shape,
            plotname,
            start,
            stop,
            samples,
            points,
            table,
        }) => sweep(&shape, &plotname, (start, stop, samples), points, table),
        Some(Action::Report { shape, points }) => report(&shape, points),
    }
}

fn surface(args: &SurfaceArgs) -> Result<()> {
    let SurfaceArgs {
        shape: shape_args,
        plotname,
        points,
    } = args;
    let points = *points;
    let shape = config::resolve_shape(&shape_args.filename, shape_args.flags(), Need::Shape)?;
    let curve = flux_surface(&shape, &AngularGrid::uniform(points))?;
    let area = curve.area();
    tracing::info!(
        aspect_ratio = shape.aspect_ratio,
        kappa = shape.elongation,
        delta = shape.triangularity,
        r0 = shape.major_radius,
        points,
        area,
        "flux_surface"
    );
    let img = plot::render(&plot::PlotSpec::new(curve.r(), curve.z(), "R [m]", "Z [m]"));
    plot::save(&img, plotname)?;
    tracing::info!(plot = %plotname.display(), "wrote");
    Ok(())
}

fn sweep(
    args: &ShapeArgs,
    plotname: &Path,
    (start, stop, samples): (f64, f64, usize),
    points: usize,
    print_table: bool,
) -> Result<()> {
    let base = config::resolve_shape(&args.filename, args.flags(), Need::SweepBase)?;
    let deltas = linspace(start, stop, samples);
    let res = sweep_area(&deltas, &base, &AngularGrid::uniform(points))
        .with_context(|| format!("sweeping delta over [{start}, {stop}]"))?;
    tracing::info!(
        samples = res.len(),
        max_step = res.max_step(),
        mean_step = res.mean_step(),
        "sweep_area"
    );
    if print_table {
        let frame = table::sweep_frame(&res, &base)?;
        println!("{frame}");
        println!("{}", table::sweep_summary(&frame)?);
    }
    let img = plot::render(&plot::PlotSpec::new(&res.delta, &res.area, "Delta", "Area"));
    plot::save(&img, plotname)?;
    tracing::info!(plot = %plotname.display(), "wrote");
    Ok(())
}

fn report(args: &ShapeArgs, points: usize) -> Result<()> {
    let doc = report_document(args, points)?;
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn report_document(args: &ShapeArgs, points: usize) -> Result<Value> {
    let shape = config::resolve_shape(&args.filename, args.flags(), Need::Shape)?;
    let curve = flux_surface(&shape, &AngularGrid::uniform(points))?;
    let results = json!({
        "points": points,
        "minor_radius": shape.minor_radius(),
        "area": curve.area(),
        "bounds": curve.bounds().map(|b| json!({
            "R": [b.r_min, b.r_max],
            "Z": [b.z_min, b.z_max]
        })),
    });
    Ok(provenance::document(provenance::Payload::new(shape, results)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cmd::command().debug_assert();
    }

    #[test]
    fn parses_reference_flags() {
        let cmd = Cmd::try_parse_from([
            "miller", "surface", "--A", "2.2", "--kappa", "1.5", "--delta", "-0.3", "--R0", "2.5",
        ])
        .unwrap();
        match cmd.action {
            Some(Action::Surface(args)) => {
                assert_eq!(args.shape.flags().delta, Some(-0.3));
                assert_eq!(args.shape.filename, PathBuf::from("input.toml"));
                assert_eq!(args.plotname, PathBuf::from("miller.png"));
                assert_eq!(args.points, 50);
            }
            _ => panic!("expected surface"),
        }
    }

    #[test]
    fn bare_flags_run_surface() {
        let cmd = Cmd::try_parse_from([
            "miller", "--A", "2.2", "--kappa", "1.5", "--delta", "0.3", "--R0", "2.5",
            "--plotname", "out.png",
        ])
        .unwrap();
        assert!(cmd.action.is_none());
        assert_eq!(cmd.surface.shape.aspect_ratio, Some(2.2));
        assert_eq!(cmd.surface.shape.major_radius, Some(2.5));
        assert_eq!(cmd.surface.plotname, PathBuf::from("out.png"));
        assert_eq!(cmd.surface.points, 50);

        let cmd = Cmd::try_parse_from(["miller"]).unwrap();
        assert!(cmd.action.is_none());
        assert_eq!(cmd.surface.plotname, PathBuf::from("miller.png"));
    }

    #[test]
    fn top_level_flags_do_not_mix_with_subcommands() {
        assert!(Cmd::try_parse_from(["miller", "--A", "2.2", "sweep"]).is_err());
    }

    #[test]
    fn sweep_defaults() {
        let cmd = Cmd::try_parse_from(["miller", "sweep"]).unwrap();
        match cmd.action {
            Some(Action::Sweep {
                plotname,
                start,
                stop,
                samples,
                table,
                ..
            }) => {
                assert_eq!(plotname, PathBuf::from("AvsD.png"));
                assert_eq!((start, stop, samples), (0.0, 1.0, 100));
                assert!(!table);
            }
            _ => panic!("expected sweep"),
        }
    }

    #[test]
    fn surface_writes_plot_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("input.toml");
        std::fs::write(&cfg, "[miller]\nA = 2.2\nkappa = 1.5\ndelta = 0.3\nR0 = 2.5\n").unwrap();
        let out = dir.path().join("miller.png");
        let args = SurfaceArgs {
            shape: ShapeArgs {
                filename: cfg,
                aspect_ratio: None,
                kappa: None,
                delta: None,
                major_radius: None,
            },
            plotname: out.clone(),
            points: 50,
        };
        surface(&args).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn report_resolves_config_into_json() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("input.toml");
        std::fs::write(&cfg, "[miller]\nA = 2.2\nkappa = 1.5\ndelta = 0.3\nR0 = 2.5\n").unwrap();
        let args = ShapeArgs {
            filename: cfg,
            aspect_ratio: None,
            kappa: Some(1.2),
            delta: None,
            major_radius: None,
        };
        let doc = report_document(&args, 50).unwrap();
        assert_eq!(doc["params"]["A"], 2.2);
        assert_eq!(doc["params"]["kappa"], 1.2);
        assert_eq!(doc["results"]["points"], 50);
        let area = doc["results"]["area"].as_f64().unwrap();
        assert!(area > 0.0 && area.is_finite());
        assert!(doc["results"]["bounds"]["R"].is_array());
    }

    #[test]
    fn sweep_out_of_range_fails_without_plot() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("AvsD.png");
        let args = ShapeArgs {
            filename: dir.path().join("unused.toml"),
            aspect_ratio: Some(2.2),
            kappa: Some(1.5),
            delta: None,
            major_radius: Some(2.5),
        };
        let err = sweep(&args, &out, (0.0, 1.5, 16), 50, false).unwrap_err();
        assert!(format!("{err:#}").contains("outside [-1, 1]"));
        assert!(!out.exists());
    }
}
