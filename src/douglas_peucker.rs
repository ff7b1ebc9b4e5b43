use error_stack::Report;
use log::debug;

use crate::error::{Result, SummaryError};
use crate::geometry::{deviation_sq, Point};
use crate::progress::{NoProgress, ProgressReporter};

/// Ranges spanning fewer points than this are not split across rayon tasks.
const PAR_MIN_SPAN: usize = 1024;

fn check_input(path: &[Point], tolerance: f64) -> Result<f64> {
    if path.is_empty() {
        return Err(Report::new(SummaryError::InvalidInput).attach_printable("path is empty"));
    }

    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(Report::new(SummaryError::InvalidInput)
            .attach_printable(format!("tolerance must be finite and >= 0, got {}", tolerance)));
    }

    if let Some(i) = path.iter().position(|p| !p.is_finite()) {
        return Err(Report::new(SummaryError::InvalidInput)
            .attach_printable(format!("point {} is not finite: {:?}", i, path[i])));
    }

    Ok(tolerance * tolerance)
}

/// Returns `(max_val, p)` for the interior of `[start, end]`.
///
/// Only deviations above `epsilon` are candidates and ties keep the first
/// index, so `max_val <= epsilon` means the range needs no split.
fn find_split(path: &[Point], start: usize, end: usize, epsilon: f64) -> (f64, usize) {
    let mut max_val = 0.0;
    let mut p = start;

    for i in start + 1..end {
        let cur = deviation_sq(path[start], path[end], path[i]);
        if cur > epsilon && cur > max_val {
            max_val = cur;
            p = i;
        }
    }

    (max_val, p)
}

/// Appends the retained indices in `(start, end]` to `summary`.
///
/// Ranges are visited depth first, left half before right half, from an
/// explicit stack so uneven splits cannot exhaust the call stack.
fn douglas_peucker_ranges(
    path: &[Point],
    start: usize,
    end: usize,
    epsilon: f64,
    summary: &mut Vec<usize>,
    reporter: &mut dyn ProgressReporter
) {
    let mut stack = vec![(start, end)];

    while let Some((start, end)) = stack.pop() {
        debug!("Simplifying from {}: {:?} to {}: {:?}", start, path[start], end, path[end]);
        reporter.mark_candidate_segment(path[start], path[end]);

        let (max_val, p) = find_split(path, start, end, epsilon);

        if max_val <= epsilon {
            debug!("Reached base case at {}, summary has {} points", end, summary.len() + 1);
            reporter.accept_point(path[end]);
            summary.push(end);
        } else {
            // right half first so the left half pops next
            stack.push((p, end));
            stack.push((start, p));
        }
    }
}

/// Returns the retained indices in `(start, end]`. Only splits with both
/// halves of at least `PAR_MIN_SPAN` points fork onto rayon, which bounds
/// the fork depth by `(end - start) / PAR_MIN_SPAN`.
fn douglas_peucker_par(path: &[Point], start: usize, end: usize, epsilon: f64) -> Vec<usize> {
    let mut summary = Vec::new();
    // small right halves set aside while walking down a large left half
    let mut deferred: Vec<(usize, usize)> = Vec::new();
    let (mut start, mut end) = (start, end);

    loop {
        if end - start < PAR_MIN_SPAN {
            douglas_peucker_ranges(path, start, end, epsilon, &mut summary, &mut NoProgress);
            break;
        }

        let (max_val, p) = find_split(path, start, end, epsilon);
        if max_val <= epsilon {
            summary.push(end);
            break;
        }

        let left_large = p - start >= PAR_MIN_SPAN;
        let right_large = end - p >= PAR_MIN_SPAN;

        if left_large && right_large {
            let (left, right) = rayon::join(
                || douglas_peucker_par(path, start, p, epsilon),
                || douglas_peucker_par(path, p, end, epsilon));
            summary.extend(left);
            summary.extend(right);
            break;
        } else if left_large {
            deferred.push((p, end));
            end = p;
        } else {
            douglas_peucker_ranges(path, start, p, epsilon, &mut summary, &mut NoProgress);
            start = p;
        }
    }

    while let Some((start, end)) = deferred.pop() {
        douglas_peucker_ranges(path, start, end, epsilon, &mut summary, &mut NoProgress);
    }

    summary
}

/// Indices of the points kept by [`summarize_with`], strictly increasing,
/// starting at `0` and ending at `path.len() - 1`.
pub fn summarize_indices_with(
    path: &[Point],
    tolerance: f64,
    reporter: &mut dyn ProgressReporter
) -> Result<Vec<usize>> {
    let epsilon = check_input(path, tolerance)?;

    let mut summary = vec![0];
    if path.len() > 1 {
        douglas_peucker_ranges(path, 0, path.len() - 1, epsilon, &mut summary, reporter);
    }
    reporter.clear_candidates();

    Ok(summary)
}

pub fn summarize_indices(path: &[Point], tolerance: f64) -> Result<Vec<usize>> {
    summarize_indices_with(path, tolerance, &mut NoProgress)
}

/// Summarizes `path`, reporting each tested chord and accepted vertex to
/// `reporter`. The result does not depend on the reporter.
pub fn summarize_with(
    path: &[Point],
    tolerance: f64,
    reporter: &mut dyn ProgressReporter
) -> Result<Vec<Point>> {
    let indices = summarize_indices_with(path, tolerance, reporter)?;
    Ok(indices.into_iter().map(|i| path[i]).collect())
}

/// Reduces `path` to the vertices needed to stay within `tolerance`
/// (in coordinate units) of every original point.
///
/// The first and last points are always kept, a single point summarizes to
/// itself and an empty path is rejected with `SummaryError::InvalidInput`.
///
/// ```
/// use path_summary::{summarize, Point};
///
/// let path: Vec<Point> = [(0., 0.), (1., 1.), (2., 2.), (2., 3.), (2., 4.), (3., 4.), (4., 4.)]
///     .into_iter().map(Point::from).collect();
/// let summary = summarize(&path, 0.5).unwrap();
/// assert_eq!(summary, vec![path[0], path[2], path[4], path[6]]);
/// ```
pub fn summarize(path: &[Point], tolerance: f64) -> Result<Vec<Point>> {
    summarize_with(path, tolerance, &mut NoProgress)
}

/// Parallel variant of [`summarize_indices`] using the rayon thread pool.
pub fn summarize_indices_par(path: &[Point], tolerance: f64) -> Result<Vec<usize>> {
    let epsilon = check_input(path, tolerance)?;

    let mut summary = vec![0];
    if path.len() > 1 {
        summary.extend(douglas_peucker_par(path, 0, path.len() - 1, epsilon));
    }
    Ok(summary)
}

/// Parallel variant of [`summarize`]; returns exactly the same points.
pub fn summarize_par(path: &[Point], tolerance: f64) -> Result<Vec<Point>> {
    let indices = summarize_indices_par(path, tolerance)?;
    Ok(indices.into_iter().map(|i| path[i]).collect())
}
