#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

use std::error::Error;

use chaining::{DEFAULT_LOAD_FACTOR, HashTable, ResizePolicy, TableConfig};
use plotters::prelude::*;
use rand::Rng;

/// Number of random keys inserted per policy
const TOTAL_KEYS: usize = 200_000;
/// Number of snapshots taken while inserting
const SAMPLES: usize = 100;

/// Resize policies to compare
const POLICIES: [(&str, ResizePolicy); 2] =
    [("Fractional", ResizePolicy::Fractional), ("Truncating", ResizePolicy::Truncating)];

/// Table state recorded after a batch of inserts
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Keys inserted so far
    keys: usize,
    /// Buckets allocated at that point
    buckets: usize,
    /// Entries per bucket
    load_factor: f64,
    /// Length of the longest chain
    longest_chain: usize,
}

/// Inserts `keys` into a fresh table using `policy`, snapshotting it every batch
fn run(policy: ResizePolicy, keys: &[u64]) -> Result<Vec<Sample>, Box<dyn Error>> {
    let mut table = HashTable::with_config(TableConfig::default().with_policy(policy))?;
    let batch = (keys.len() / SAMPLES).max(1);
    let mut samples = Vec::with_capacity(SAMPLES);

    for (inserted, &key) in keys.iter().enumerate() {
        table.put(key, inserted);
        if (inserted + 1) % batch == 0 {
            samples.push(Sample {
                keys: table.size(),
                buckets: table.bucket_count(),
                load_factor: table.load_factor(),
                longest_chain: table.longest_chain(),
            });
        }
    }

    Ok(samples)
}

/// Draws one line per policy into `path`, with an optional horizontal reference line
fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    series: &[(&str, Vec<(usize, f64)>)],
    reference: Option<(&str, f64)>,
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|(_, points)| points.iter().map(|&(_, y)| y))
        .chain(reference.map(|(_, y)| y))
        .fold(0.0, f64::max) *
        1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..TOTAL_KEYS, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    if let Some((label, y)) = reference {
        let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
        chart
            .draw_series(LineSeries::new(vec![(0, y), (TOTAL_KEYS, y)], reference_style))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));
    }

    for ((name, points), color) in series.iter().zip(colors.iter()) {
        let line_style = ShapeStyle::from(color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Compares how both resize policies grow a table fed with random keys
fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();
    let keys: Vec<u64> = (0..TOTAL_KEYS).map(|_| rng.random()).collect();

    let mut load_series: Vec<(&str, Vec<(usize, f64)>)> = Vec::with_capacity(POLICIES.len());
    let mut chain_series: Vec<(&str, Vec<(usize, f64)>)> = Vec::with_capacity(POLICIES.len());

    for (name, policy) in POLICIES {
        let samples = run(policy, &keys)?;

        println!("{name}");
        println!("{:>10} {:>10} {:>12} {:>14}", "keys", "buckets", "load factor", "longest chain");
        for sample in samples.iter().step_by(SAMPLES / 10) {
            println!(
                "{:>10} {:>10} {:>12.3} {:>14}",
                sample.keys, sample.buckets, sample.load_factor, sample.longest_chain
            );
        }

        load_series.push((
            name,
            samples.iter().map(|sample| (sample.keys, sample.load_factor)).collect(),
        ));
        chain_series.push((
            name,
            samples.iter().map(|sample| (sample.keys, sample.longest_chain as f64)).collect(),
        ));
    }

    draw_chart(
        "chain_growth.png",
        "Entries per Bucket While Growing",
        "Load Factor",
        &load_series,
        Some(("Configured Load Factor", DEFAULT_LOAD_FACTOR)),
    )?;
    draw_chart(
        "longest_chain.png",
        "Longest Chain While Growing",
        "Longest Chain (entries)",
        &chain_series,
        None,
    )?;

    println!("Generated plot images: chain_growth.png, longest_chain.png");

    Ok(())
}
