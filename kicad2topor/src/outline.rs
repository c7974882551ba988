//! Board outline reconstruction.
//!
//! The source file stores outline figures in arbitrary order, and its arcs
//! have no literal end point (only center, start and sweep). This module
//! first materializes every arc's end point, then stitches the unordered
//! pool into one ordered contour by greedy nearest-endpoint matching.

use thiserror::Error;
use tracing::debug;

use crate::board::{Figure, Point};

/// Manhattan tolerance for matching consecutive outline endpoints (mm).
pub const STITCH_TOLERANCE: f64 = 0.5;

/// Angular step used to trace arc end points, in degrees. The stepped
/// approximation (rather than a closed-form endpoint) is kept deliberately:
/// output files are compared against the legacy converter, and the step
/// quantization shifts endpoints by up to `radius * 0.1°`.
const ARC_STEP_DEG: f64 = 0.1;

#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("board outline is empty")]
    Empty,
    #[error(
        "board outline is disconnected: nothing continues from ({x:.3}, {y:.3}) \
         after {placed} placed figure(s), {remaining} left in pool"
    )]
    Disconnected {
        x: f64,
        y: f64,
        placed: usize,
        remaining: usize,
    },
    #[error(
        "board outline does not close: last endpoint ({lx:.3}, {ly:.3}) is \
         {gap:.3} mm from the starting point ({sx:.3}, {sy:.3})"
    )]
    NotClosed {
        lx: f64,
        ly: f64,
        sx: f64,
        sy: f64,
        gap: f64,
    },
}

/// Compute the literal end point of an arc from its start point, center and
/// sweep, by stepping the angle in fixed increments until the sweep is
/// covered. The last stepped point is the end point.
pub fn arc_endpoint(start: Point, center: Point, sweep_deg: f64) -> Point {
    let radius = start.distance(&center);
    if radius == 0.0 || sweep_deg == 0.0 {
        return start;
    }
    let start_angle = (start.y - center.y).atan2(start.x - center.x).to_degrees();
    let step = ARC_STEP_DEG * sweep_deg.signum();
    let mut swept: f64 = 0.0;
    let mut point = start;
    while swept.abs() < sweep_deg.abs() {
        swept += step;
        let a = (start_angle + swept).to_radians();
        point = Point::new(center.x + radius * a.cos(), center.y + radius * a.sin());
    }
    point
}

/// Replace every arc's `end` field (holding the center after extraction)
/// with its computed literal end point.
pub fn resolve_arc_ends(figures: &mut [Figure]) {
    for figure in figures {
        if let Figure::Arc {
            start, end, angle, ..
        } = figure
        {
            *end = arc_endpoint(*start, *end, *angle);
        }
    }
}

/// Stitch an unordered pool of outline figures into one ordered contour.
///
/// The contour is seeded with the first figure in source order. Each round
/// scans the remaining pool for a figure whose start (or, reversed, whose
/// end) lies within [`STITCH_TOLERANCE`] of the running end point. Every
/// round either shrinks the pool by one or fails, so the loop terminates on
/// any input.
pub fn stitch(figures: Vec<Figure>) -> Result<Vec<Figure>, OutlineError> {
    let mut pool = figures;
    if pool.is_empty() {
        return Err(OutlineError::Empty);
    }
    let mut ordered = vec![pool.remove(0)];

    while !pool.is_empty() {
        let tail = ordered.last().map(Figure::end_point).unwrap_or_default();
        let mut next = None;
        for (i, figure) in pool.iter().enumerate() {
            if figure.start_point().manhattan(&tail) < STITCH_TOLERANCE {
                next = Some((i, false));
                break;
            }
            if figure.end_point().manhattan(&tail) < STITCH_TOLERANCE {
                next = Some((i, true));
                break;
            }
        }
        match next {
            Some((i, reversed)) => {
                let mut figure = pool.remove(i);
                if reversed {
                    figure.reverse();
                }
                ordered.push(figure);
            }
            None => {
                return Err(OutlineError::Disconnected {
                    x: tail.x,
                    y: tail.y,
                    placed: ordered.len(),
                    remaining: pool.len(),
                })
            }
        }
    }

    debug!(figures = ordered.len(), "stitched board outline");
    Ok(ordered)
}

/// Check that an ordered contour closes on itself.
pub fn verify_closed(ordered: &[Figure]) -> Result<(), OutlineError> {
    let Some(first) = ordered.first() else {
        return Err(OutlineError::Empty);
    };
    let start = first.start_point();
    let last = ordered.last().map(Figure::end_point).unwrap_or_default();
    let gap = last.manhattan(&start);
    if gap < STITCH_TOLERANCE {
        Ok(())
    } else {
        Err(OutlineError::NotClosed {
            lx: last.x,
            ly: last.y,
            sx: start.x,
            sy: start.y,
            gap,
        })
    }
}

/// Full outline pass: materialize arc end points, then order the pool.
pub fn build(mut figures: Vec<Figure>) -> Result<Vec<Figure>, OutlineError> {
    resolve_arc_ends(&mut figures);
    stitch(figures)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sx: f64, sy: f64, ex: f64, ey: f64) -> Figure {
        Figure::Line {
            layer: "Edge.Cuts".to_string(),
            width: 0.1,
            start: Point::new(sx, sy),
            end: Point::new(ex, ey),
        }
    }

    #[test]
    fn test_arc_endpoint_quarter_ccw() {
        let end = arc_endpoint(Point::new(10.0, 0.0), Point::new(0.0, 0.0), 90.0);
        // Step quantization may overshoot by less than one 0.1° step.
        assert!(end.distance(&Point::new(0.0, 10.0)) < 0.05, "got {:?}", end);
    }

    #[test]
    fn test_arc_endpoint_quarter_cw() {
        let end = arc_endpoint(Point::new(10.0, 0.0), Point::new(0.0, 0.0), -90.0);
        assert!(end.distance(&Point::new(0.0, -10.0)) < 0.05, "got {:?}", end);
    }

    #[test]
    fn test_arc_endpoint_zero_sweep_is_start() {
        let start = Point::new(3.0, 4.0);
        assert_eq!(arc_endpoint(start, Point::new(0.0, 0.0), 0.0), start);
    }

    #[test]
    fn test_stitch_shuffled_square_with_reversed_side() {
        // Unit square, shuffled, one side stored end-to-start.
        let figures = vec![
            line(0.0, 0.0, 1.0, 0.0),
            line(0.0, 1.0, 0.0, 0.0),
            line(0.0, 1.0, 1.0, 1.0), // reversed orientation
            line(1.0, 0.0, 1.0, 1.0),
        ];
        let ordered = stitch(figures).expect("square should stitch");
        assert_eq!(ordered.len(), 4);
        for pair in ordered.windows(2) {
            assert!(pair[0].end_point().manhattan(&pair[1].start_point()) < STITCH_TOLERANCE);
        }
        verify_closed(&ordered).expect("square should close");
    }

    #[test]
    fn test_stitch_disconnected_fails_instead_of_hanging() {
        let figures = vec![
            line(0.0, 0.0, 1.0, 0.0),
            line(1.0, 0.0, 1.0, 1.0),
            line(1.0, 1.0, 0.0, 1.0),
            line(0.0, 1.0, 0.0, 0.0),
            line(5.0, 5.0, 6.0, 5.0), // disconnected
        ];
        match stitch(figures) {
            Err(OutlineError::Disconnected { placed, remaining, .. }) => {
                assert_eq!(placed, 4);
                assert_eq!(remaining, 1);
            }
            other => panic!("expected disconnected outline, got {:?}", other),
        }
    }

    #[test]
    fn test_stitch_empty_pool_fails() {
        assert!(matches!(stitch(Vec::new()), Err(OutlineError::Empty)));
    }

    #[test]
    fn test_verify_open_chain_fails() {
        let ordered = vec![line(0.0, 0.0, 1.0, 0.0), line(1.0, 0.0, 1.0, 1.0)];
        assert!(matches!(
            verify_closed(&ordered),
            Err(OutlineError::NotClosed { .. })
        ));
    }

    #[test]
    fn test_build_resolves_arc_then_stitches() {
        // Half-round right side: bottom line, ccw arc up, top line back,
        // left line down.
        let figures = vec![
            line(0.0, 0.0, 10.0, 0.0),
            Figure::Arc {
                layer: "Edge.Cuts".to_string(),
                width: 0.1,
                start: Point::new(10.0, 0.0),
                // Still the center at this stage, as after extraction.
                end: Point::new(10.0, 5.0),
                angle: 180.0,
            },
            line(10.0, 10.0, 0.0, 10.0),
            line(0.0, 10.0, 0.0, 0.0),
        ];
        let ordered = build(figures).expect("contour should build");
        assert_eq!(ordered.len(), 4);
        match &ordered[1] {
            Figure::Arc { end, .. } => {
                assert!(end.distance(&Point::new(10.0, 10.0)) < 0.05);
            }
            other => panic!("expected arc second, got {:?}", other),
        }
        verify_closed(&ordered).expect("contour should close");
    }
}
