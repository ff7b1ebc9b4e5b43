use log::trace;

use crate::geometry::Point;

/// Observer of a running summarization, e.g. a map view drawing the chord
/// currently being tested and each vertex as it is finalized.
///
/// Calls are one-way; nothing a reporter does can change the summary.
pub trait ProgressReporter {
    /// Called once per visited range, before its interior is scanned.
    fn mark_candidate_segment(&mut self, a: Point, b: Point);

    /// Called once per accepted range with the vertex appended to the summary.
    fn accept_point(&mut self, point: Point);

    /// Called once after the whole path has been summarized.
    fn clear_candidates(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn mark_candidate_segment(&mut self, _a: Point, _b: Point) {}
    fn accept_point(&mut self, _point: Point) {}
}

/// Writes every event to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn mark_candidate_segment(&mut self, a: Point, b: Point) {
        trace!("candidate segment ({}, {}) -> ({}, {})", a.x, a.y, b.x, b.y);
    }

    fn accept_point(&mut self, point: Point) {
        trace!("accepted ({}, {})", point.x, point.y);
    }

    fn clear_candidates(&mut self) {
        trace!("cleared candidate segments");
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent {
    Candidate(Point, Point),
    Accepted(Point),
    Cleared,
}

/// Keeps every event so a viewer can replay the run afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingProgress {
    pub events: Vec<ProgressEvent>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        RecordingProgress::default()
    }

    pub fn accepted(&self) -> Vec<Point> {
        self.events.iter()
            .filter_map(|e| match e {
                ProgressEvent::Accepted(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    pub fn candidate_count(&self) -> usize {
        self.events.iter()
            .filter(|e| matches!(e, ProgressEvent::Candidate(_, _)))
            .count()
    }
}

impl ProgressReporter for RecordingProgress {
    fn mark_candidate_segment(&mut self, a: Point, b: Point) {
        self.events.push(ProgressEvent::Candidate(a, b));
    }

    fn accept_point(&mut self, point: Point) {
        self.events.push(ProgressEvent::Accepted(point));
    }

    fn clear_candidates(&mut self) {
        self.events.push(ProgressEvent::Cleared);
    }
}
