use anyhow::{bail, Context};
use b3d_codec::B3dDocument;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: inspect_b3d <file.b3d>");
    };

    println!("Reading B3D file: {}", path);
    let doc = B3dDocument::read_from_path(&path).with_context(|| format!("reading {path}"))?;

    let summary = json!({
        "comment": doc.comment(),
        "grid_shape": doc.grid_shape(),
        "points": doc.n_points(),
        "time_steps": doc.n_times(),
        "time_0": doc.time().time_0(),
        "time_units": doc.time().units(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    for (label, channel) in [("Ex", doc.ex()), ("Ey", doc.ey())] {
        let finite: Vec<f32> = channel.iter().copied().filter(|v| v.is_finite()).collect();
        let (min, max) = finite
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        println!(
            "{}: {} samples, {} non-finite, range {:.4} to {:.4}",
            label,
            channel.len(),
            channel.len() - finite.len(),
            min,
            max
        );
        println!("  first values: {:?}", &channel[..channel.len().min(8)]);
    }

    Ok(())
}
