use std::fs::File;
use std::io::Read;
use std::path::Path;

use error_stack::{Report, ResultExt};
use log::info;

use crate::error::{Result, SummaryError};
use crate::geometry::Point;

/// Names of the header columns holding the x and y coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordColumns {
    pub x: String,
    pub y: String,
}

impl Default for CoordColumns {
    fn default() -> Self {
        CoordColumns {
            x: String::from("Easting"),
            y: String::from("Northing"),
        }
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers.iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| Report::new(SummaryError::MissingColumn)
            .attach_printable(format!("column {:?} not in header {:?}", name, headers)))
}

fn parse_field(record: &csv::StringRecord, idx: usize, name: &str) -> Result<f64> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let field = record.get(idx)
        .ok_or_else(|| Report::new(SummaryError::MalformedRow)
            .attach_printable(format!("line {}: no value for column {:?}", line, name)))?;

    field.trim().parse::<f64>()
        .change_context(SummaryError::MalformedRow)
        .attach_printable_lazy(|| format!("line {}: {:?} = {:?} is not a number", line, name, field))
}

/// Reads coordinate pairs from delimited text with a header row.
pub fn read_points_from_reader<R: Read>(reader: R, columns: &CoordColumns) -> Result<Vec<Point>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()
        .change_context(SummaryError::Io)
        .attach_printable("could not read header row")?
        .clone();
    let x_idx = column_index(&headers, &columns.x)?;
    let y_idx = column_index(&headers, &columns.y)?;

    let mut points = Vec::new();
    for record in rdr.records() {
        let record = record.change_context(SummaryError::MalformedRow)?;
        let x = parse_field(&record, x_idx, &columns.x)?;
        let y = parse_field(&record, y_idx, &columns.y)?;
        points.push(Point::new(x, y));
    }

    Ok(points)
}

pub fn read_points<P: AsRef<Path>>(path: P, columns: &CoordColumns) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let file = File::open(path)
        .change_context(SummaryError::Io)
        .attach_printable_lazy(|| format!("could not open {}", path.display()))?;

    let points = read_points_from_reader(file, columns)
        .attach_printable_lazy(|| format!("while reading {}", path.display()))?;
    info!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_points_from_reader() {
        let data = "Id,Easting,Northing\n1,500000,4649776\n2,500010.5,4649780\n";
        let points = read_points_from_reader(data.as_bytes(), &CoordColumns::default()).unwrap();
        assert_eq!(points, vec![Point::new(500000.0, 4649776.0), Point::new(500010.5, 4649780.0)]);
    }

    #[test]
    fn test_custom_columns() {
        let data = "lon, lat\n-115.7, 44.4\n";
        let columns = CoordColumns { x: "lon".into(), y: "lat".into() };
        let points = read_points_from_reader(data.as_bytes(), &columns).unwrap();
        assert_eq!(points, vec![Point::new(-115.7, 44.4)]);
    }

    #[test]
    fn test_missing_column() {
        let data = "Easting,Elevation\n1,2\n";
        let err = read_points_from_reader(data.as_bytes(), &CoordColumns::default()).unwrap_err();
        assert_eq!(*err.current_context(), SummaryError::MissingColumn);
    }

    #[test]
    fn test_malformed_row() {
        let data = "Easting,Northing\n1,2\n3,north\n";
        let err = read_points_from_reader(data.as_bytes(), &CoordColumns::default()).unwrap_err();
        assert_eq!(*err.current_context(), SummaryError::MalformedRow);
        assert!(format!("{:?}", err).contains("line 3"));
    }

    #[test]
    fn test_header_only() {
        let data = "Easting,Northing\n";
        let points = read_points_from_reader(data.as_bytes(), &CoordColumns::default()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_points("tests/fixtures/does_not_exist.csv", &CoordColumns::default()).unwrap_err();
        assert_eq!(*err.current_context(), SummaryError::Io);
    }

    #[test]
    fn test_read_fixture() {
        let points = read_points("tests/fixtures/utm_path.csv", &CoordColumns::default()).unwrap();
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], Point::new(500000.0, 4649776.0));
    }
}
