use serde::{Deserialize, Serialize};

/// A 2-D coordinate pair, e.g. a UTM easting/northing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Squared perpendicular distance from `candidate` to the infinite line
/// through `segment_start` and `segment_end`.
///
/// The line is not clipped to the segment, so points beyond either end are
/// measured against the extension of the chord. When both ends coincide the
/// result is the squared distance from `candidate` to that point.
pub fn deviation_sq(segment_start: Point, segment_end: Point, candidate: Point) -> f64 {
    let dx = segment_end.x - segment_start.x;
    let dy = segment_end.y - segment_start.y;
    let px = candidate.x - segment_start.x;
    let py = candidate.y - segment_start.y;

    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return px * px + py * py;
    }

    let cross = dx * py - dy * px;
    cross * cross / length_sq
}
