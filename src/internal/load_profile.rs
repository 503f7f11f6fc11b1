#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]

use std::error::Error;

use plotters::prelude::*;
use primemap::{
    CHAINING_LOAD_FACTOR_THRESHOLD, ChainingHashMap, HashFunction, HashMapInterface,
    OPEN_ADDRESSING_LOAD_FACTOR_THRESHOLD, OpenAddressingMap, hash_function_1, hash_function_2,
};
use rand::Rng;

// Every map starts from the same small table and grows while the keys go in
const INITIAL_CAPACITY: usize = 11;
const KEYS_INSERTED: usize = 20_000;
const SAMPLE_EVERY: usize = 100;

const LOAD_CHART: &str = "table_load.svg";
const EMPTY_BUCKETS_CHART: &str = "empty_buckets.svg";

// Map variants to compare
const METHODS: [&str; 4] =
    ["Open Addressing / hash 1", "Open Addressing / hash 2", "Chaining / hash 1", "Chaining / hash 2"];

/// State of a map after some number of insertions
#[derive(Debug, Clone, Copy)]
struct Sample {
    keys: usize,
    load: f64,
    empty_share: f64,
}

// Inserts `keys` one at a time, sampling the table every `SAMPLE_EVERY` keys
fn profile<M: HashMapInterface<usize>>(hash_function: HashFunction, keys: &[String]) -> (Vec<Sample>, M) {
    let mut map = M::with_hash_function(INITIAL_CAPACITY, hash_function);
    let mut samples = Vec::with_capacity(keys.len() / SAMPLE_EVERY);

    for (index, key) in keys.iter().enumerate() {
        map.put(key.clone(), index);

        let inserted = index + 1;
        if inserted % SAMPLE_EVERY == 0 {
            samples.push(Sample {
                keys: inserted,
                load: map.table_load(),
                empty_share: map.empty_buckets() as f64 / map.capacity() as f64,
            });
        }
    }

    (samples, map)
}

fn draw_chart(
    path: &str,
    caption: &str,
    y_desc: &str,
    y_max: f64,
    thresholds: &[(f64, &str)],
    series: &[Vec<(usize, f64)>],
) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];

    let root = SVGBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..KEYS_INSERTED, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for &(level, label) in thresholds {
        let threshold_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
        chart
            .draw_series(LineSeries::new(vec![(0, level), (KEYS_INSERTED, level)], threshold_style))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], threshold_style));
    }

    for ((points, &method), color) in series.iter().zip(METHODS.iter()).zip(colors.iter()) {
        let line_style = ShapeStyle::from(color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Same random keys for every variant to keep the comparison fair
    let mut rng = rand::rng();
    let keys: Vec<String> = (0..KEYS_INSERTED).map(|_| format!("key-{}", rng.random::<u64>())).collect();

    println!("Inserting {KEYS_INSERTED} keys, starting capacity {INITIAL_CAPACITY}");

    let (open_1, open_1_map) = profile::<OpenAddressingMap<usize>>(hash_function_1, &keys);
    let (open_2, open_2_map) = profile::<OpenAddressingMap<usize>>(hash_function_2, &keys);
    let (chained_1, chained_1_map) = profile::<ChainingHashMap<usize>>(hash_function_1, &keys);
    let (chained_2, chained_2_map) = profile::<ChainingHashMap<usize>>(hash_function_2, &keys);

    let finals: [(&str, usize, usize, f64); 4] = [
        (METHODS[0], open_1_map.len(), open_1_map.capacity(), open_1_map.table_load()),
        (METHODS[1], open_2_map.len(), open_2_map.capacity(), open_2_map.table_load()),
        (METHODS[2], chained_1_map.len(), chained_1_map.capacity(), chained_1_map.table_load()),
        (METHODS[3], chained_2_map.len(), chained_2_map.capacity(), chained_2_map.table_load()),
    ];
    for (method, len, capacity, load) in finals {
        println!("  {method}: {len} entries, capacity = {capacity}, load = {load:.2}");
    }
    println!(
        "  Longest chain: hash 1 = {}, hash 2 = {}",
        chained_1_map.longest_chain(),
        chained_2_map.longest_chain()
    );

    let runs = [open_1, open_2, chained_1, chained_2];
    let loads: Vec<Vec<(usize, f64)>> =
        runs.iter().map(|samples| samples.iter().map(|s| (s.keys, s.load)).collect()).collect();
    let empty_shares: Vec<Vec<(usize, f64)>> =
        runs.iter().map(|samples| samples.iter().map(|s| (s.keys, s.empty_share)).collect()).collect();

    draw_chart(
        LOAD_CHART,
        "Table Load While Growing",
        "Table Load (entries / buckets)",
        CHAINING_LOAD_FACTOR_THRESHOLD * 1.1,
        &[
            (OPEN_ADDRESSING_LOAD_FACTOR_THRESHOLD, "Open addressing resize threshold"),
            (CHAINING_LOAD_FACTOR_THRESHOLD, "Chaining resize threshold"),
        ],
        &loads,
    )?;

    draw_chart(
        EMPTY_BUCKETS_CHART,
        "Empty Buckets While Growing",
        "Share of Buckets Without a Live Entry",
        1.05,
        &[],
        &empty_shares,
    )?;

    println!("Generated plot images: {LOAD_CHART}, {EMPTY_BUCKETS_CHART}");

    Ok(())
}
