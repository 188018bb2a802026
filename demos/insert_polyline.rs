//! Index a polyline under a single feature id and inspect the cells it covers.
use segment_grid::prelude::*;

fn main() -> Result<(), GridError> {
    env_logger::init();

    let region = BoundingBox::from_coords(0.0, 0.0, 10.0, 10.0);
    let mut grid = GridIndex::with_cell_size(region, 1.0, 1.0)?;

    let polyline = [
        Point::new(0.5, 0.5),
        Point::new(4.5, 2.5),
        Point::new(4.5, 7.5),
        Point::new(9.0, 9.0),
    ];

    for pair in polyline.windows(2) {
        let segment = LineSegment::new(pair[0], pair[1]);
        let cells = grid.cells_of_segment(&segment)?;
        println!("{:?} -> {:?}", segment, cells);
        grid.insert(1, segment)?;
    }

    println!(
        "{} segments, {} cells occupied, {} bucket entries",
        grid.len(),
        grid.occupied_cells(),
        grid.entry_count()
    );
    // Shared corner cells hold the id once
    assert_eq!(grid.occupied_cells(), grid.entry_count());

    // An out-of-region segment is rejected without touching the index
    let before = grid.entry_count();
    let result = grid.insert(2, LineSegment::new(Point::new(5.0, 5.0), Point::new(12.0, 5.0)));
    println!("Out-of-region insert: {:?}", result);
    assert!(result.is_err());
    assert_eq!(grid.entry_count(), before);
    Ok(())
}
