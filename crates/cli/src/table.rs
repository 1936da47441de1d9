//! Tabular view of a triangularity sweep (polars).

use miller::{ShapeParams, SweepResult};
use polars::prelude::*;

/// `delta`, `area` and `area_ratio` (area over the delta = 0 ellipse) per sample.
pub fn sweep_frame(res: &SweepResult, base: &ShapeParams) -> PolarsResult<DataFrame> {
    let ratio = res.circle_ratio(base.minor_radius(), base.elongation);
    df!(
        "delta" => res.delta.as_slice(),
        "area" => res.area.as_slice(),
        "area_ratio" => ratio.as_slice()
    )
}

/// One-row summary: area extremes and mean ratio.
pub fn sweep_summary(frame: &DataFrame) -> PolarsResult<DataFrame> {
    frame
        .clone()
        .lazy()
        .select([
            col("area").min().alias("area_min"),
            col("area").max().alias("area_max"),
            col("area_ratio").mean().alias("area_ratio_mean"),
        ])
        .collect()
}
