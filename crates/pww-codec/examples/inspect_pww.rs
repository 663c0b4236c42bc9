use anyhow::{bail, Context};
use pww_codec::PwwArchive;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: inspect_pww <file.pww>");
    };

    println!("Reading PWW file: {}", path);
    let archive = PwwArchive::read_from_path(&path).with_context(|| format!("reading {path}"))?;

    let summary = json!({
        "label": archive.label,
        "start": archive.start.to_rfc3339(),
        "end": archive.end.to_rfc3339(),
        "bounding_box": archive.bounding_box,
        "stations": archive.grid.len(),
        "grid_shape": archive.grid.shape(),
        "shape_source": archive.shape_source,
        "time_steps": archive.times.len(),
        "variables": archive.variables().iter().map(|v| v.name()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    for channel in archive.channels() {
        let finite: Vec<f64> = channel
            .values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        let (min, max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        println!(
            "{}: {} samples, {} missing, range {:.2} to {:.2}",
            channel.variable.name(),
            channel.values.len(),
            channel.values.len() - finite.len(),
            min,
            max
        );
    }

    Ok(())
}
