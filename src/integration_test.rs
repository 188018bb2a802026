#[cfg(test)]
mod integration_tests {
    use crate::prelude::*;
    use std::thread;

    #[test]
    fn test_grid_tools_scenario() {
        let region = BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0);
        // Divide the region into 100x100 cells
        let grid = GridIndex::with_counts(region, 100, 100).unwrap();

        assert_eq!(grid.cell_of(Point::new(12.5, 13.7)).unwrap(), Cell::new(12, 13));

        let segment = LineSegment::new(Point::new(2.5, 3.5), Point::new(10.0, 3.5));
        let intersects = grid.cell_segment_intersections(Cell::new(2, 3), &segment);
        assert_eq!(intersects.len(), 1);
        assert!(intersects[0].approx_eq(Point::new(3.0, 3.5), 1e-12));
    }

    #[test]
    fn test_range_query_scenario() {
        let region = BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0);
        let mut grid = GridIndex::with_counts(region, 100, 100).unwrap();

        grid.insert(0, LineSegment::new(Point::new(0.0, 0.0), Point::new(0.5, 0.5))).unwrap();
        let edges = grid.query(&BoundingBox::from_coords(0.0, 0.0, 0.5, 0.5));
        assert_eq!(edges.len(), 1);
        assert!(edges.contains(&0));

        let edges = grid.query(&BoundingBox::from_coords(1.6, 1.6, 2.0, 2.0));
        assert!(edges.is_empty(), "cell (1, 1) and beyond hold nothing");

        grid.insert(7, LineSegment::new(Point::new(2.5, 3.5), Point::new(10.0, 3.5))).unwrap();
        assert!(grid.query(&BoundingBox::from_coords(2.0, 3.0, 11.0, 4.0)).contains(&7));
        assert!(!grid.query(&BoundingBox::from_coords(50.0, 50.0, 60.0, 60.0)).contains(&7));
    }

    #[test]
    fn test_road_network() {
        // A small street grid with a diagonal avenue, ids are edge ids
        let region = BoundingBox::from_coords(-1000.0, -1000.0, 1000.0, 1000.0);
        let mut grid = GridIndex::with_cell_size(region, 50.0, 50.0).unwrap();
        assert_eq!(grid.columns(), 40);
        assert_eq!(grid.rows(), 40);

        let mut next_id = 0;
        let mut streets = Vec::new();
        for k in -4..=4 {
            let offset = k as f64 * 200.0;
            streets.push(LineSegment::new(Point::new(-900.0, offset), Point::new(900.0, offset)));
            streets.push(LineSegment::new(Point::new(offset, -900.0), Point::new(offset, 900.0)));
        }
        streets.push(LineSegment::new(Point::new(-950.0, -950.0), Point::new(950.0, 950.0)));
        for street in &streets {
            grid.insert(next_id, *street).unwrap();
            next_id += 1;
        }
        assert_eq!(grid.len(), streets.len());

        // Exact filtering of candidates is the caller's job
        let query = BoundingBox::from_coords(110.0, 110.0, 140.0, 140.0);
        let candidates = grid.query(&query);
        let diagonal = (streets.len() - 1) as FeatureId;
        assert!(candidates.contains(&diagonal), "the avenue crosses the query box");
        for id in candidates {
            let street = streets[id as usize];
            assert!(
                street.bounding_box().intersects(&query.expand(grid.cell_width())),
                "candidate {id} should lie within one cell of the query"
            );
        }
    }

    #[test]
    fn test_concurrent_queries() {
        let region = BoundingBox::from_coords(0.0, 0.0, 64.0, 64.0);
        let mut grid = GridIndex::with_counts(region, 64, 64).unwrap();
        for i in 0..64u32 {
            let y = f64::from(i) + 0.5;
            grid.insert(i, LineSegment::new(Point::new(0.5, y), Point::new(63.5, y))).unwrap();
        }

        let grid = &grid;
        thread::scope(|scope| {
            let handles: Vec<_> = (0..8u32)
                .map(|t| {
                    scope.spawn(move || {
                        let row = f64::from(t * 8);
                        let mut results = Vec::new();
                        grid.query_into(&BoundingBox::from_coords(10.2, row + 0.2, 10.8, row + 0.8), &mut results);
                        results
                    })
                })
                .collect();

            for (t, handle) in handles.into_iter().enumerate() {
                let results = handle.join().unwrap();
                assert_eq!(results, vec![(t * 8) as FeatureId], "thread {t} sees its row");
            }
        });
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GridIndex>();
    }
}
