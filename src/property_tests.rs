//! Seeded randomized checks of the index guarantees: coordinate round trip,
//! full coverage, no false negatives, query monotonicity and bounded traversal.

#[cfg(test)]
mod tests {
    use crate::{BoundingBox, Cell, FeatureId, GridConfig, GridIndex, LineSegment, Point, Resolution};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SEED: u64 = 95756739;

    fn random_point<R: Rng>(rng: &mut R, region: &BoundingBox) -> Point {
        Point::new(
            rng.random_range(region.min.x..=region.max.x),
            rng.random_range(region.min.y..=region.max.y),
        )
    }

    fn random_segment<R: Rng>(rng: &mut R, region: &BoundingBox) -> LineSegment {
        LineSegment::new(random_point(rng, region), random_point(rng, region))
    }

    /// Grids exercised by every property: unit cells, and an offset region
    /// with non-square cells whose last column/row overhang the region
    fn grids() -> Vec<GridIndex> {
        vec![
            GridIndex::with_counts(BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0), 100, 100).unwrap(),
            GridIndex::with_cell_size(BoundingBox::from_coords(-37.5, 12.25, 41.0, 58.0), 0.7, 1.3).unwrap(),
        ]
    }

    /// Point on side `side` of `region`, pushed outward by at most `tolerance`
    fn band_point<R: Rng>(rng: &mut R, region: &BoundingBox, tolerance: f64, side: u8) -> Point {
        let out = rng.random_range(0.0..=tolerance);
        let p = random_point(rng, region);
        match side {
            0 => Point::new(region.min.x - out, p.y),
            1 => Point::new(region.max.x + out, p.y),
            2 => Point::new(p.x, region.min.y - out),
            _ => Point::new(p.x, region.max.y + out),
        }
    }

    fn lattice<R: Rng>(rng: &mut R) -> f64 {
        f64::from(rng.random_range(0..=20_u8))
    }

    fn adjacent(a: Cell, b: Cell) -> bool {
        a != b && a.column.abs_diff(b.column) <= 1 && a.row.abs_diff(b.row) <= 1
    }

    // ============================================================================
    // COORDINATE MAPPING
    // ============================================================================

    #[test]
    fn test_cell_of_round_trip() {
        let mut rng = StdRng::seed_from_u64(SEED);
        for grid in grids() {
            let region = grid.region();
            for _ in 0..10_000 {
                let p = random_point(&mut rng, &region);
                let cell = grid.cell_of(p).unwrap();
                assert!(grid.contains_cell(cell), "{cell:?} outside the grid");
                assert!(
                    grid.cell_bounds(cell).contains_with_tolerance(p, 1e-8),
                    "{p:?} not inside its cell {cell:?}"
                );
            }
        }
    }

    // ============================================================================
    // TRAVERSAL
    // ============================================================================

    #[test]
    fn test_traversal_is_connected_and_unique() {
        let mut rng = StdRng::seed_from_u64(SEED + 1);
        for grid in grids() {
            let region = grid.region();
            for _ in 0..2_000 {
                let segment = random_segment(&mut rng, &region);
                let cells = grid.cells_of_segment(&segment).unwrap();

                assert_eq!(cells[0], grid.cell_of(segment.a()).unwrap(), "walk starts at the first endpoint");
                assert!(cells.windows(2).all(|w| adjacent(w[0], w[1])), "consecutive cells must touch");

                let mut sorted = cells.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(sorted.len(), cells.len(), "no cell is visited twice");
            }
        }
    }

    #[test]
    fn test_full_coverage() {
        let mut rng = StdRng::seed_from_u64(SEED + 2);
        for grid in grids() {
            let region = grid.region();
            for _ in 0..500 {
                let segment = random_segment(&mut rng, &region);
                let cells = grid.cells_of_segment(&segment).unwrap();
                let boxes: Vec<BoundingBox> = cells.iter().map(|&cell| grid.cell_bounds(cell)).collect();

                for i in 0..=200 {
                    let p = segment.point_at(f64::from(i) / 200.0);
                    assert!(
                        boxes.iter().any(|b| b.contains_with_tolerance(p, 1e-6)),
                        "{p:?} on {segment:?} is not covered"
                    );
                }
            }
        }
    }

    #[test]
    fn test_termination_on_grid_lines() {
        let mut rng = StdRng::seed_from_u64(SEED + 3);
        let grid = GridIndex::with_counts(BoundingBox::from_coords(0.0, 0.0, 20.0, 20.0), 20, 20).unwrap();
        let bound = grid.columns() + grid.rows();

        for _ in 0..5_000 {
            // Endpoints on grid lines and corners
            let a = Point::new(lattice(&mut rng), lattice(&mut rng));
            let b = if rng.random_bool(0.5) {
                Point::new(a.x, lattice(&mut rng))
            } else {
                Point::new(lattice(&mut rng), lattice(&mut rng))
            };
            let segment = LineSegment::new(a, b);
            let cells = grid.cells_of_segment(&segment).unwrap();
            assert!(cells.len() <= bound, "{segment:?} took {} steps", cells.len());
        }
    }

    #[test]
    fn test_traversal_from_tolerance_band() {
        let mut rng = StdRng::seed_from_u64(SEED + 7);
        let offset = GridConfig::new(
            BoundingBox::from_coords(-37.5, 12.25, 41.0, 58.0),
            Resolution::CellSize { width: 0.7, height: 1.3 },
        )
        .with_tolerance(1e-6);
        let band_grids = [
            GridIndex::with_counts(BoundingBox::from_coords(0.0, 0.0, 1.0, 1.0), 1000, 1000).unwrap(),
            GridIndex::from_config(&offset).unwrap(),
        ];

        for mut grid in band_grids {
            let region = grid.region();
            let tolerance = grid.tolerance();
            for id in 0..2_000 {
                let side = rng.random_range(0..4_u8);
                let a = band_point(&mut rng, &region, tolerance, side);
                // Half run along the same side, half head into the region
                let b = if rng.random_bool(0.5) {
                    band_point(&mut rng, &region, tolerance, side)
                } else {
                    random_point(&mut rng, &region)
                };
                let segment = LineSegment::new(a, b);

                let cells = grid.cells_of_segment(&segment).unwrap();
                assert_eq!(cells[0], grid.cell_of(a).unwrap(), "walk starts at the first endpoint");
                assert!(cells.iter().all(|&cell| grid.contains_cell(cell)), "walk stays inside the grid");
                assert!(cells.windows(2).all(|w| adjacent(w[0], w[1])), "consecutive cells must touch");
                assert!(grid.insert(id, segment).is_ok(), "{segment:?} lies within tolerance");
            }
            assert_eq!(grid.len(), 2_000);
        }
    }

    // ============================================================================
    // QUERIES
    // ============================================================================

    #[test]
    fn test_no_false_negatives() {
        let mut rng = StdRng::seed_from_u64(SEED + 4);
        for mut grid in grids() {
            let region = grid.region();
            let mut segments = Vec::new();
            for id in 0..300 {
                let segment = random_segment(&mut rng, &region);
                grid.insert(id, segment).unwrap();
                segments.push(segment);
            }

            for (id, segment) in segments.iter().enumerate() {
                let id = id as FeatureId;
                for cell in grid.cells_of_segment(segment).unwrap() {
                    let hits = grid.query(&grid.cell_bounds(cell));
                    assert!(hits.contains(&id), "feature {id} missing from {cell:?}");
                }
            }
        }
    }

    #[test]
    fn test_query_finds_segments_crossing_box() {
        let mut rng = StdRng::seed_from_u64(SEED + 5);
        for mut grid in grids() {
            let region = grid.region();
            let mut segments = Vec::new();
            for id in 0..300 {
                let segment = random_segment(&mut rng, &region);
                grid.insert(id, segment).unwrap();
                segments.push(segment);
            }

            for _ in 0..200 {
                let corner = random_point(&mut rng, &region);
                let query = BoundingBox::new(corner, corner + Point::new(rng.random_range(0.0..5.0), rng.random_range(0.0..5.0)));
                let hits = grid.query(&query);

                // A segment with a sample point inside the box must be a candidate
                for (id, segment) in segments.iter().enumerate() {
                    let touches = (0..=100).any(|i| query.contains(segment.point_at(f64::from(i) / 100.0)));
                    if touches {
                        assert!(hits.contains(&(id as FeatureId)), "feature {id} missing for {query:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_query_monotonicity() {
        let mut rng = StdRng::seed_from_u64(SEED + 6);
        for mut grid in grids() {
            let region = grid.region();
            for id in 0..300 {
                grid.insert(id, random_segment(&mut rng, &region)).unwrap();
            }

            let mut small = Vec::new();
            let mut large = Vec::new();
            for _ in 0..500 {
                let corner = random_point(&mut rng, &region);
                let query = BoundingBox::new(corner, corner + Point::new(rng.random_range(0.0..3.0), rng.random_range(0.0..3.0)));
                let grown = query.expand(rng.random_range(0.0..4.0));

                grid.query_into(&query, &mut small);
                grid.query_into(&grown, &mut large);
                assert!(
                    small.iter().all(|id| large.binary_search(id).is_ok()),
                    "growing {query:?} lost candidates"
                );
            }
        }
    }
}
