use std::fs::File;
use std::io::Write;
use std::path::Path;

use error_stack::ResultExt;
use geojson::{Feature, FeatureCollection, Geometry};
use geojson::Value::{LineString, Point as GeoPoint};

use crate::error::{Result, SummaryError};
use crate::geometry::Point;

pub fn write_summary_csv_to<W: Write>(writer: W, points: &[Point]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["Easting", "Northing"])
        .change_context(SummaryError::Output)?;

    for p in points {
        writer.write_record([p.x.to_string(), p.y.to_string()])
            .change_context(SummaryError::Output)?;
    }

    writer.flush().change_context(SummaryError::Output)?;
    Ok(())
}

pub fn write_summary_csv<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .change_context(SummaryError::Io)
        .attach_printable_lazy(|| format!("could not create {}", path.display()))?;
    write_summary_csv_to(file, points)
}

/// Wraps the summary in a one-feature collection. `crs` is written as a
/// legacy named CRS member, e.g. `urn:ogc:def:crs:EPSG::32611`.
///
/// A one-point summary becomes a `Point` feature, since a `LineString`
/// needs at least two positions.
pub fn summary_to_geojson(points: &[Point], crs: Option<&str>) -> FeatureCollection {
    let mut coords: Vec<Vec<f64>> = points.iter().map(|p| vec![p.x, p.y]).collect();
    let geometry = if coords.len() == 1 {
        Geometry::new(GeoPoint(coords.remove(0)))
    } else {
        Geometry::new(LineString(coords))
    };

    let mut properties = serde_json::Map::new();
    properties.insert(String::from("n_points"),
        serde_json::Value::Number(serde_json::Number::from(points.len() as u64)));

    let feature = Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };

    let foreign_members = crs.map(|name| {
        let mut members = serde_json::Map::new();
        members.insert(String::from("crs"), serde_json::json!({
            "type": "name",
            "properties": { "name": name }
        }));
        members
    });

    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members,
    }
}

pub fn write_summary_geojson<P: AsRef<Path>>(path: P, points: &[Point], crs: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    let collection = summary_to_geojson(points, crs);
    let geojson_string = serde_json::to_string_pretty(&collection)
        .change_context(SummaryError::Output)?;

    let mut file = File::create(path)
        .change_context(SummaryError::Io)
        .attach_printable_lazy(|| format!("could not create {}", path.display()))?;
    file.write_all(geojson_string.as_bytes())
        .change_context(SummaryError::Output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0), Point::new(4.5, 4.0)]
    }

    #[test]
    fn test_write_summary_csv_to() {
        let mut buf = Vec::new();
        write_summary_csv_to(&mut buf, &summary()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Easting,Northing\n0,0\n2,2\n4.5,4\n");
    }

    #[test]
    fn test_summary_to_geojson() {
        let value = serde_json::to_value(summary_to_geojson(&summary(), None)).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert!(value.get("crs").is_none());

        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["type"], "LineString");
        assert_eq!(feature["geometry"]["coordinates"][2], serde_json::json!([4.5, 4.0]));
        assert_eq!(feature["properties"]["n_points"], 3);
    }

    #[test]
    fn test_single_point_summary_to_geojson() {
        let value = serde_json::to_value(
            summary_to_geojson(&[Point::new(500000.0, 4649776.0)], None)).unwrap();

        let geometry = &value["features"][0]["geometry"];
        assert_eq!(geometry["type"], "Point");
        assert_eq!(geometry["coordinates"], serde_json::json!([500000.0, 4649776.0]));
        assert_eq!(value["features"][0]["properties"]["n_points"], 1);
    }

    #[test]
    fn test_summary_to_geojson_with_crs() {
        let value = serde_json::to_value(
            summary_to_geojson(&summary(), Some("urn:ogc:def:crs:EPSG::32611"))).unwrap();
        assert_eq!(value["crs"]["properties"]["name"], "urn:ogc:def:crs:EPSG::32611");
    }

    #[test]
    fn test_write_summary_geojson() {
        let path = std::env::temp_dir().join(format!("path_summary_{}.geojson", std::process::id()));
        write_summary_geojson(&path, &summary(), None).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: geojson::GeoJson = text.parse().unwrap();
        assert!(matches!(parsed, geojson::GeoJson::FeatureCollection(_)));
        let _ = std::fs::remove_file(&path);
    }
}
