//! SVG document rendering for the earnings trend chart.

use crate::analytics::ChartGeometry;

const LINE_COLOR: &str = "#60A5FA";
const MARKER_COLOR: &str = "#93C5FD";

/// Render chart geometry as a standalone SVG document: one path for the
/// trend line and one circle marker per data point. Empty geometry yields
/// a valid document with no path element.
pub fn render_chart(geometry: &ChartGeometry) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\">\n",
        geometry.width, geometry.height
    ));

    if !geometry.path.is_empty() {
        out.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" />\n",
            geometry.path, LINE_COLOR
        ));
    }

    for point in &geometry.points {
        out.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"3\" fill=\"{}\" />\n",
            point.x, point.y, MARKER_COLOR
        ));
    }

    out.push_str("</svg>\n");
    out
}
