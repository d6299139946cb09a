#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::unwrap_used)]
#![allow(warnings)]

use plotters::prelude::*;
use primemap::{ChainedHashMap, ProbingHashMap, additive_hash, find_mode, is_prime};
use rand::Rng;

// Simulation table size; prime, matching the sizing policy of the real maps.
const TABLE_SIZE: usize = 100_003;
// Load factors from 0.1 to 0.9 in equal steps
const NUM_LOAD_FACTORS: usize = 9;

// Collision strategies to compare
const METHODS: [&str; 3] = ["Linear Probing", "Quadratic Probing", "Separate Chaining"];
const MAX_PROBES: usize = 100; // Prevent unbounded scans past saturation

// Simple hash function for simulation purposes
fn hash_function(key: usize) -> usize {
    key % TABLE_SIZE
}

// Linear probing: step one slot at a time from the home slot
fn linear_probing(table: &mut Vec<Option<usize>>, key: usize) -> usize {
    let mut index = hash_function(key);
    let mut probes = 1; // Start with first probe attempt

    while table[index].is_some() && probes < MAX_PROBES {
        index = (index + 1) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key);
    }

    probes
}

// Quadratic probing: visit offsets j^2 from the home slot
fn quadratic_probing(table: &mut Vec<Option<usize>>, key: usize) -> usize {
    let home = hash_function(key);
    let mut index = home;
    let mut probes = 1; // Start with first probe attempt
    let mut j = 0;

    while table[index].is_some() && probes < MAX_PROBES {
        j += 1;
        index = (home + j * j) % TABLE_SIZE;
        probes += 1;
    }

    if table[index].is_none() {
        table[index] = Some(key);
    }

    probes
}

// Separate chaining: the probe count is the chain walk plus the new node
fn chained_insert(chain_lengths: &mut Vec<usize>, key: usize) -> usize {
    let index = hash_function(key);
    let probes = chain_lengths[index] + 1;
    chain_lengths[index] += 1;
    probes
}

// Drive the real maps through the classic demo workload: thirty inserts
// against a requested capacity of twenty, then a shrinking resize.
fn demo_maps() {
    println!("Hash map demo");
    println!("-------------");

    let mut map = ProbingHashMap::with_capacity_and_hasher(20, additive_hash);
    for i in 0..30 {
        map.insert(format!("str{i}"), i * 100);
        if i % 10 == 9 {
            println!(
                "probing after {} inserts: empty buckets = {}, load factor = {:.2}, size = {}, capacity = {}",
                i + 1,
                map.empty_buckets(),
                map.load_factor(),
                map.len(),
                map.capacity()
            );
        }
    }
    assert!(is_prime(map.capacity()));

    // Thirty entries do not fit a table of eleven; the request is rejected.
    map.resize(11);
    println!("probing resize(11) leaves capacity at {}", map.capacity());

    let mut chained = ChainedHashMap::with_capacity_and_hasher(20, additive_hash);
    for i in 0..30 {
        chained.insert(format!("str{i}"), i * 100);
    }
    // Chains absorb the same request and the load factor climbs past one.
    chained.resize(11);
    println!(
        "chained resize(11): empty buckets = {}, load factor = {:.2}, capacity = {}",
        chained.empty_buckets(),
        chained.load_factor(),
        chained.capacity()
    );

    let values: Vec<String> = ["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"]
        .iter()
        .map(ToString::to_string)
        .collect();
    if let Some((modes, frequency)) = find_mode(&values) {
        println!("mode of {values:?}: {modes:?} with frequency {frequency}");
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    demo_maps();

    // Generate load factors from 0.1 to 0.9
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.9 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Results storage
    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); METHODS.len()];
    let mut worst_case_probes: Vec<Vec<usize>> = vec![Vec::new(); METHODS.len()];

    // Generate random keys outside the loop to ensure fair comparison
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<usize> = (0..max_keys_needed).map(|_| rng.random_range(1..1_000_000)).collect();

    // Running experiments
    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (method_idx, &method) in METHODS.iter().enumerate() {
            let mut table: Vec<Option<usize>> = vec![None; TABLE_SIZE];
            let mut chain_lengths: Vec<usize> = vec![0; TABLE_SIZE];
            let mut probes_list: Vec<usize> = Vec::with_capacity(n_keys);

            for &key in keys.iter().take(n_keys) {
                let probes = match method_idx {
                    0 => linear_probing(&mut table, key),
                    1 => quadratic_probing(&mut table, key),
                    _ => chained_insert(&mut chain_lengths, key),
                };
                probes_list.push(probes);
            }

            // Calculate statistics
            let avg_probes = probes_list.iter().sum::<usize>() as f64 / probes_list.len() as f64;
            let worst_case = *probes_list.iter().max().unwrap_or(&0);

            average_probes[method_idx].push(avg_probes);
            worst_case_probes[method_idx].push(worst_case);

            println!("  {}: Avg probes = {:.2}, Worst = {}", method, avg_probes, worst_case);
        }
    }

    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];
    let line_width = 2;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: Average probes per insert
    let root = BitMapBackend::new("average_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Probes per Insert by Collision Strategy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0_f64, 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Average Probes per Insert")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                load_factors
                    .iter()
                    .zip(average_probes[method_idx].iter())
                    .map(|(&load, &avg)| (load, avg)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            load_factors
                .iter()
                .zip(average_probes[method_idx].iter())
                .map(|(&load, &avg)| Circle::new((load, avg), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Worst-case probes
    let root = BitMapBackend::new("worst_case_probes.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_worst = worst_case_probes
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Worst-Case Probes by Collision Strategy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0_f64, 0.0..max_worst)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Worst-Case Probes")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    // Reference line where open addressing is guaranteed short probes
    let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![(0.5, 0.0), (0.5, max_worst)],
            reference_style,
        ))?
        .label("0.5 Load Factor")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    for (method_idx, &method) in METHODS.iter().enumerate() {
        let color = &colors[method_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                load_factors
                    .iter()
                    .zip(worst_case_probes[method_idx].iter())
                    .map(|(&load, &worst)| (load, worst as f64)),
                line_style,
            ))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            load_factors
                .iter()
                .zip(worst_case_probes[method_idx].iter())
                .map(|(&load, &worst)| Circle::new((load, worst as f64), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: average_probes.png, worst_case_probes.png");

    Ok(())
}
