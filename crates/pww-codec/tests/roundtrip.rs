//! Write/read round-trip tests for the PWW codec.

use chrono::{TimeZone, Utc};
use field_common::{GridShape, Station, StationGrid};
use pww_codec::{PwwArchive, ShapeSource, WeatherDataset, WeatherVariable};

fn grid_2x2() -> StationGrid {
    let stations = vec![
        station(30.5, -84.5, "A", "FL"),
        station(30.5, -85.0, "B", "FL"),
        station(31.0, -84.5, "C", "GA"),
        station(31.0, -85.0, "D", "GA"),
    ];
    StationGrid::new(stations, GridShape::new(2, 2)).unwrap()
}

fn station(lat: f64, lon: f64, name: &str, region: &str) -> Station {
    Station {
        lat,
        lon,
        elevation_m: 25,
        name: name.into(),
        country: "US".into(),
        region: region.into(),
    }
}

fn hourly_times(count: usize) -> Vec<chrono::DateTime<Utc>> {
    (0..count)
        .map(|i| Utc.with_ymd_and_hms(2024, 6, 1, i as u32, 0, 0).unwrap())
        .collect()
}

#[test]
fn test_roundtrip_metadata() {
    let variables = vec![
        WeatherVariable::Temperature2mF,
        WeatherVariable::WindSpeed10mMph,
    ];
    let samples = vec![295.15; 3 * 2 * 4];
    let ds = WeatherDataset::new(
        "north-america-run",
        grid_2x2(),
        hourly_times(3),
        variables.clone(),
        samples,
    )
    .unwrap();

    let archive = PwwArchive::from_bytes(&ds.to_bytes()).unwrap();

    assert_eq!(archive.label.as_deref(), Some("north-america-run"));
    assert_eq!(archive.times, ds.times());
    assert_eq!(archive.start, ds.times()[0]);
    assert_eq!(archive.end, ds.times()[2]);
    assert_eq!(archive.variables(), variables);
    assert_eq!(archive.grid.shape(), GridShape::new(2, 2));
    assert_eq!(archive.shape_source, ShapeSource::Metadata);
    assert_eq!(archive.grid.stations(), ds.grid().stations());
    assert_eq!(archive.bounding_box.min_lat, 30.5);
    assert_eq!(archive.bounding_box.max_lat, 31.0);
    assert_eq!(archive.bounding_box.min_lon, -85.0);
    assert_eq!(archive.bounding_box.max_lon, -84.5);
}

#[test]
fn test_temperature_decodes_within_one_degree() {
    // 295.15 K = 71.6 degF; code 102 must recover ~72 degF.
    let ds = WeatherDataset::new(
        "temps",
        grid_2x2(),
        hourly_times(1),
        vec![WeatherVariable::Temperature2mF],
        vec![295.15; 4],
    )
    .unwrap();

    let archive = PwwArchive::from_bytes(&ds.to_bytes()).unwrap();
    let values = archive.channel(WeatherVariable::Temperature2mF).unwrap();
    for &v in values {
        assert!((v - 71.6).abs() <= 1.0, "decoded {v}, expected ~71.6 degF");
    }
}

#[test]
fn test_lossy_roundtrip_bound_across_range() {
    // Sweep each variable across its physical range; decode must land
    // within one quantization unit of the declared-unit value.
    let cases: &[(WeatherVariable, fn(f64) -> f64, f64, f64)] = &[
        // (variable, declared-unit view of the SI input, range start, range end)
        (WeatherVariable::Temperature2mF, |k| (k - 273.15) * 1.8 + 32.0, 240.0, 320.0),
        (WeatherVariable::WindSpeed10mMph, |mps| mps * 2.23694, 0.0, 100.0),
        (WeatherVariable::TotalCloudCover, |p| p, 0.0, 100.0),
        (WeatherVariable::PrecipRate, |mms| mms * 3600.0, 0.0, 0.06),
    ];

    for &(variable, declared, lo, hi) in cases {
        let n = 4;
        let steps = 16;
        let samples: Vec<f64> = (0..steps)
            .flat_map(|i| {
                let si = lo + (hi - lo) * i as f64 / (steps - 1) as f64;
                std::iter::repeat(si).take(n)
            })
            .collect();
        let ds = WeatherDataset::new(
            "sweep",
            grid_2x2(),
            hourly_times(steps),
            vec![variable],
            samples.clone(),
        )
        .unwrap();

        let archive = PwwArchive::from_bytes(&ds.to_bytes()).unwrap();
        let values = archive.channel(variable).unwrap();
        for (i, &decoded) in values.iter().enumerate() {
            let expected = declared(samples[i]);
            assert!(
                (decoded - expected).abs() <= 1.0,
                "{:?}: decoded {decoded}, expected {expected}",
                variable
            );
        }
    }
}

#[test]
fn test_station_sample_alignment() {
    // Unique value per station cell; decoded index i must match station i.
    let n = 4;
    let samples: Vec<f64> = (0..2)
        .flat_map(|t| (0..n).map(move |s| (t * 10 + s) as f64))
        .collect();
    let ds = WeatherDataset::new(
        "align",
        grid_2x2(),
        hourly_times(2),
        vec![WeatherVariable::TotalCloudCover],
        samples,
    )
    .unwrap();

    let archive = PwwArchive::from_bytes(&ds.to_bytes()).unwrap();
    let values = archive.channel(WeatherVariable::TotalCloudCover).unwrap();
    for t in 0..2 {
        for s in 0..n {
            assert_eq!(values[t * n + s], (t * 10 + s) as f64);
        }
    }
    // Grid addressing: station 1 of the flat order is (row 0, col 1).
    assert_eq!(
        archive.value(WeatherVariable::TotalCloudCover, 1, 0, 1),
        Some(11.0)
    );
    assert_eq!(
        archive.grid.station(0, 1).map(|s| s.name.as_str()),
        Some("B")
    );
}

#[test]
fn test_nan_decodes_as_missing() {
    let mut samples = vec![50.0; 4];
    samples[2] = f64::NAN;
    let ds = WeatherDataset::new(
        "gaps",
        grid_2x2(),
        hourly_times(1),
        vec![WeatherVariable::TotalCloudCover],
        samples,
    )
    .unwrap();

    let archive = PwwArchive::from_bytes(&ds.to_bytes()).unwrap();
    let values = archive.channel(WeatherVariable::TotalCloudCover).unwrap();
    assert!(values[2].is_nan());
    assert_eq!(values[0], 50.0);
}

#[test]
fn test_out_of_range_decodes_as_missing_not_aliased() {
    // 335.93 K converts to 260 under code 102; one byte cannot hold it,
    // so it must come back missing, never 260 mod 256.
    let hot = (260.0 - 115.0 - 32.0) * 5.0 / 9.0 + 273.15;
    let ds = WeatherDataset::new(
        "clip",
        grid_2x2(),
        hourly_times(1),
        vec![WeatherVariable::Temperature2mF],
        vec![hot; 4],
    )
    .unwrap();

    let archive = PwwArchive::from_bytes(&ds.to_bytes()).unwrap();
    let values = archive.channel(WeatherVariable::Temperature2mF).unwrap();
    for &v in values {
        assert!(v.is_nan(), "expected missing, got {v}");
    }
}

#[test]
fn test_write_and_read_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.pww");

    let ds = WeatherDataset::new(
        "disk",
        grid_2x2(),
        hourly_times(2),
        vec![WeatherVariable::TotalCloudCover],
        vec![25.0; 8],
    )
    .unwrap();
    ds.write_to_path(&path).unwrap();

    let archive = PwwArchive::read_from_path(&path).unwrap();
    assert_eq!(archive.label.as_deref(), Some("disk"));
    assert_eq!(archive.times.len(), 2);

    // Only the final file is visible, no temp leftovers.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("run.pww")]);
}

#[test]
fn test_validation_errors() {
    let grid = grid_2x2();

    // empty time axis
    assert!(WeatherDataset::new(
        "bad",
        grid.clone(),
        vec![],
        vec![WeatherVariable::TotalCloudCover],
        vec![],
    )
    .is_err());

    // duplicate variables
    assert!(WeatherDataset::new(
        "bad",
        grid.clone(),
        hourly_times(1),
        vec![
            WeatherVariable::TotalCloudCover,
            WeatherVariable::TotalCloudCover
        ],
        vec![0.0; 8],
    )
    .is_err());

    // sample tensor size mismatch
    assert!(WeatherDataset::new(
        "bad",
        grid.clone(),
        hourly_times(2),
        vec![WeatherVariable::TotalCloudCover],
        vec![0.0; 7],
    )
    .is_err());

    // decreasing timestamps
    let mut times = hourly_times(2);
    times.reverse();
    assert!(WeatherDataset::new(
        "bad",
        grid.clone(),
        times,
        vec![WeatherVariable::TotalCloudCover],
        vec![0.0; 8],
    )
    .is_err());

    // non-ASCII station metadata
    let mut stations = grid.stations().to_vec();
    stations[0].name = "estación".into();
    let bad_grid = StationGrid::new(stations, GridShape::new(2, 2)).unwrap();
    assert!(WeatherDataset::new(
        "bad",
        bad_grid,
        hourly_times(1),
        vec![WeatherVariable::TotalCloudCover],
        vec![0.0; 4],
    )
    .is_err());
}
