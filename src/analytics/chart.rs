use super::{validate_month_key, EarningsPoint};
use crate::error::{AnalyticsError, Result};

/// Logical drawing area for the trend chart, with symmetric padding on
/// all four sides.
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 240.0,
            padding: 24.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Pixel-space rendering of an earnings series: a moveto/lineto path plus
/// the per-point coordinates for drawing markers. Recomputed whenever the
/// source series changes; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub path: String,
    pub points: Vec<ChartPoint>,
}

/// Map an earnings series onto canvas coordinates.
///
/// Points are sorted ascending by month key before any computation, so any
/// permutation of the same series produces identical geometry. When all
/// values are equal the value range is substituted with 1 to avoid dividing
/// by zero; the series then renders as a flat line along the bottom band of
/// the canvas. Larger amounts plot higher (y grows downward).
pub fn build_chart(earnings: &[EarningsPoint], canvas: Canvas) -> Result<ChartGeometry> {
    for point in earnings {
        validate_month_key(&point.month_key)?;
        if !point.total_amount.is_finite() {
            return Err(AnalyticsError::NonFiniteAmount(point.month_key.clone()));
        }
    }

    let mut ordered: Vec<&EarningsPoint> = earnings.iter().collect();
    ordered.sort_by(|a, b| a.month_key.cmp(&b.month_key));

    if ordered.is_empty() {
        return Ok(ChartGeometry {
            width: canvas.width,
            height: canvas.height,
            path: String::new(),
            points: Vec::new(),
        });
    }

    let min = ordered
        .iter()
        .map(|p| p.total_amount)
        .fold(f64::INFINITY, f64::min);
    let max = ordered
        .iter()
        .map(|p| p.total_amount)
        .fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min == 0.0 { 1.0 } else { max - min };

    let step = if ordered.len() == 1 {
        0.0
    } else {
        (canvas.width - canvas.padding * 2.0) / (ordered.len() - 1) as f64
    };

    let points: Vec<ChartPoint> = ordered
        .iter()
        .enumerate()
        .map(|(i, p)| ChartPoint {
            x: canvas.padding + step * i as f64,
            y: canvas.padding
                + (canvas.height - canvas.padding * 2.0)
                    * (1.0 - (p.total_amount - min) / range),
        })
        .collect();

    Ok(ChartGeometry {
        width: canvas.width,
        height: canvas.height,
        path: build_line_path(&points),
        points,
    })
}

fn build_line_path(points: &[ChartPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month_key: &str, amount: f64) -> EarningsPoint {
        EarningsPoint {
            month_key: month_key.to_string(),
            total_amount: amount,
        }
    }

    #[test]
    fn empty_series_yields_empty_geometry() {
        let geom = build_chart(&[], Canvas::default()).unwrap();
        assert_eq!(geom.width, 640.0);
        assert_eq!(geom.height, 240.0);
        assert_eq!(geom.path, "");
        assert!(geom.points.is_empty());
    }

    #[test]
    fn two_points_span_the_padded_canvas() {
        let series = vec![point("2025-01", 100.0), point("2025-02", 200.0)];
        let geom = build_chart(&series, Canvas::default()).unwrap();

        // min value sits at the bottom band, max at the top
        assert_eq!(geom.points[0], ChartPoint { x: 24.0, y: 216.0 });
        assert_eq!(geom.points[1], ChartPoint { x: 616.0, y: 24.0 });
        assert_eq!(geom.path, "M 24 216 L 616 24");
    }

    #[test]
    fn input_order_does_not_matter() {
        let forward = vec![point("2025-01", 100.0), point("2025-02", 200.0)];
        let reversed = vec![point("2025-02", 200.0), point("2025-01", 100.0)];
        let a = build_chart(&forward, Canvas::default()).unwrap();
        let b = build_chart(&reversed, Canvas::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_point_sits_at_left_padding() {
        let geom = build_chart(&[point("2025-01", 500.0)], Canvas::default()).unwrap();
        // range is substituted with 1, so the normalized value is 0:
        // y = padding + (height - 2 * padding) * (1 - 0)
        assert_eq!(geom.points.len(), 1);
        assert_eq!(geom.points[0], ChartPoint { x: 24.0, y: 216.0 });
        assert_eq!(geom.path, "M 24 216");
    }

    #[test]
    fn constant_series_avoids_division_by_zero() {
        let series = vec![
            point("2025-01", 100.0),
            point("2025-02", 100.0),
            point("2025-03", 100.0),
        ];
        let geom = build_chart(&series, Canvas::default()).unwrap();
        for p in &geom.points {
            assert!(p.x.is_finite() && p.y.is_finite());
            assert_eq!(p.y, 216.0);
        }
        assert_eq!(geom.points[0].x, 24.0);
        assert_eq!(geom.points[1].x, 320.0);
        assert_eq!(geom.points[2].x, 616.0);
    }

    #[test]
    fn evenly_spaced_x_coordinates() {
        let series = vec![
            point("2025-01", 10.0),
            point("2025-02", 20.0),
            point("2025-03", 30.0),
            point("2025-04", 40.0),
            point("2025-05", 50.0),
        ];
        let geom = build_chart(&series, Canvas::default()).unwrap();
        let step = (640.0 - 48.0) / 4.0;
        for (i, p) in geom.points.iter().enumerate() {
            assert_eq!(p.x, 24.0 + step * i as f64);
        }
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let series = vec![point("2025-01", f64::NAN)];
        assert!(build_chart(&series, Canvas::default()).is_err());

        let series = vec![point("2025-01", f64::INFINITY)];
        assert!(build_chart(&series, Canvas::default()).is_err());
    }

    #[test]
    fn malformed_month_key_is_rejected() {
        let series = vec![point("2025-1", 100.0)];
        assert!(build_chart(&series, Canvas::default()).is_err());
    }
}
