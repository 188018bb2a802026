//! Performance profiling example for insert and query
//!
//! Designed to be used with low-level profilers like `samply`:
//!
//! ```bash
//! samply record cargo run --release --example perf
//! ```

use segment_grid::prelude::*;
use std::time::Instant;

/// Simple LCG random number generator, returns a value in 0..1
fn next(rng: &mut u64) -> f64 {
    *rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (*rng >> 32) as f64 / u32::MAX as f64
}

fn main() -> Result<(), GridError> {
    let region = BoundingBox::from_coords(0.0, 0.0, 1000.0, 1000.0);
    let mut grid = GridIndex::with_cell_size(region, 10.0, 10.0)?;

    let mut rng = 12345u64;
    let build_start = Instant::now();
    for id in 0..1_000_000 {
        let x = next(&mut rng) * 1000.0;
        let y = next(&mut rng) * 1000.0;
        let dx = (next(&mut rng) - 0.5) * 50.0;
        let dy = (next(&mut rng) - 0.5) * 50.0;
        let b = Point::new((x + dx).clamp(0.0, 1000.0), (y + dy).clamp(0.0, 1000.0));
        grid.insert(id, LineSegment::new(Point::new(x, y), b))?;
    }
    let build_duration = build_start.elapsed();

    let mut results = Vec::new();
    let mut total = 0usize;
    let query_start = Instant::now();
    for _ in 0..100_000 {
        let center_x = next(&mut rng) * 1000.0;
        let center_y = next(&mut rng) * 1000.0;
        let query = BoundingBox::from_coords(center_x - 50.0, center_y - 50.0, center_x + 50.0, center_y + 50.0);
        grid.query_into(&query, &mut results);
        total += results.len();
    }
    let query_duration = query_start.elapsed();

    println!("Inserted {} segments in {:.2}ms", grid.len(), build_duration.as_secs_f64() * 1000.0);
    println!(
        "100000 queries in {:.2}ms ({:.1} candidates/query)",
        query_duration.as_secs_f64() * 1000.0,
        total as f64 / 100_000.0
    );
    Ok(())
}
