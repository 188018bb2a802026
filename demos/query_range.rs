//! Find segments that may touch a query rectangle.
use segment_grid::prelude::*;

fn main() -> Result<(), GridError> {
    env_logger::init();

    let region = BoundingBox::from_coords(0.0, 0.0, 100.0, 100.0);
    let mut grid = GridIndex::with_counts(region, 100, 100)?;

    grid.insert(7, LineSegment::new(Point::new(2.5, 3.5), Point::new(10.0, 3.5)))?; // Segment 7
    grid.insert(8, LineSegment::new(Point::new(40.0, 40.0), Point::new(60.0, 60.0)))?; // Segment 8 (outside query)
    grid.insert(9, LineSegment::new(Point::new(5.5, 0.5), Point::new(5.5, 9.5)))?; // Segment 9

    let mut results = Vec::new();
    grid.query_into(&BoundingBox::from_coords(2.0, 3.0, 11.0, 4.0), &mut results);
    println!("Candidates: {:?}", results);

    // Query rectangle (2, 3, 11, 4) touches segments 7 and 9, but not 8
    assert_eq!(results, vec![7, 9], "Expected segments 7 and 9");

    // Nothing outside the region
    let outside = grid.query(&BoundingBox::from_coords(150.0, 150.0, 160.0, 160.0));
    assert!(outside.is_empty(), "Query outside the region should be empty");
    Ok(())
}
