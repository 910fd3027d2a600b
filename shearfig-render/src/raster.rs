use std::{fs, path::Path};

use plotters::{
    coord::{Shift, cartesian::Cartesian2d, types::RangedCoordf64},
    prelude::*,
    style::{
        FontDesc, FontFamily, FontStyle, TextStyle,
        text_anchor::{HPos, Pos, VPos},
    },
};
use shearfig_core::figure::{FlowFigure, Panel, TAG_ANCHOR};

use crate::error::RenderError;

/// Output bitmap size in pixels.
///
/// The printed figure is 6 in wide at 200 dpi; the height makes each of the
/// eight 4×2 split regions exactly square, which keeps the equal-aspect
/// convention of the panels.
pub const IMAGE_SIZE: (u32, u32) = (1200, 2400);

/// Pixels per typographic point at the output resolution.
const PX_PER_PT: f64 = 200.0 / 72.0;

/// Axes-fraction window drawn for every panel.
///
/// Wider than the unit data box so the arrows, labels, and tags anchored
/// outside it are never clipped.
const FRACTION_WINDOW_X: (f64, f64) = (-0.30, 1.15);
const FRACTION_WINDOW_Y: (f64, f64) = (-0.15, 1.30);

/// Arrowhead length for the coordinate-axis indicators, in fraction units.
const AXIS_HEAD_LENGTH: f64 = 0.035;

/// Arrowhead length for the flow-direction arrows, in fraction units.
const FLOW_HEAD_LENGTH: f64 = 0.05;

/// Arrowhead half-width as a fraction of its length.
const HEAD_WIDTH_RATIO: f64 = 0.4;

/// Marker radius in points (half the printed 8 pt marker).
const MARKER_RADIUS_PT: f64 = 4.0;

/// A panel drawing area with axes-fraction coordinates applied.
type FractionArea<'a> = DrawingArea<BitMapBackend<'a>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders the composed figure to a PNG at `path`, overwriting any previous
/// output. The parent directory is created if missing.
///
/// # Errors
///
/// Returns a [`RenderError`] if the output directory cannot be created or
/// the drawing backend fails (unwritable path, missing fonts).
pub fn render_to_file(figure: &FlowFigure, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RenderError::OutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, panel) in root.split_evenly((4, 2)).iter().zip(figure.panels()) {
        draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

/// Draws one panel into its split region of the root area.
///
/// Every element is positioned in axes-fraction coordinates; data points go
/// through [`shearfig_core::figure::PanelSpec::to_fraction`] first.
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
) -> Result<(), RenderError> {
    let chart = ChartBuilder::on(area).build_cartesian_2d(
        FRACTION_WINDOW_X.0..FRACTION_WINDOW_X.1,
        FRACTION_WINDOW_Y.0..FRACTION_WINDOW_Y.1,
    )?;
    let plot = chart.plotting_area();

    for arrow in panel.spec.frame.axis_arrows() {
        draw_arrow(plot, arrow.from, arrow.to, pt(1.5), AXIS_HEAD_LENGTH)?;
    }

    for arrow in &panel.flow_arrows {
        let from = panel.spec.to_fraction(arrow.from);
        let to = panel.spec.to_fraction(arrow.to);
        draw_arrow(plot, from, to, pt(1.2), FLOW_HEAD_LENGTH)?;
    }

    for run in panel.clipped_curve() {
        let points: Vec<(f64, f64)> = run
            .into_iter()
            .map(|point| {
                let [fx, fy] = panel.spec.to_fraction(point);
                (fx, fy)
            })
            .collect();
        plot.draw(&PathElement::new(points, BLACK.stroke_width(pt(2.0))))?;
    }

    let [mx, my] = panel.spec.to_fraction(panel.marker);
    #[allow(clippy::cast_possible_wrap)]
    plot.draw(&Circle::new((mx, my), pt(MARKER_RADIUS_PT) as i32, BLACK.filled()))?;

    let frame = panel.spec.frame;
    draw_text(plot, "x", frame.x_label_anchor(), 14.0, FontStyle::Normal)?;
    draw_text(plot, panel.spec.y_label, frame.y_label_anchor(), 14.0, FontStyle::Normal)?;
    draw_text(plot, panel.spec.tag, TAG_ANCHOR, 16.0, FontStyle::Bold)?;

    Ok(())
}

/// Draws a straight arrow with a filled triangular head at `to`.
///
/// The shaft stops at the head's base so the stroke cap never pokes past
/// the tip. Callers pass arrows of nonzero length.
fn draw_arrow(
    area: &FractionArea<'_>,
    from: [f64; 2],
    to: [f64; 2],
    stroke: u32,
    head_length: f64,
) -> Result<(), RenderError> {
    let head = arrow_head(from, to, head_length, HEAD_WIDTH_RATIO * head_length);
    let base_x = (head[1][0] + head[2][0]) / 2.0;
    let base_y = (head[1][1] + head[2][1]) / 2.0;

    area.draw(&PathElement::new(
        vec![(from[0], from[1]), (base_x, base_y)],
        BLACK.stroke_width(stroke),
    ))?;
    area.draw(&Polygon::new(
        head.map(|point| (point[0], point[1])).to_vec(),
        BLACK.filled(),
    ))?;

    Ok(())
}

/// Triangle covering an arrowhead: tip at `to`, base centered `length` back
/// along the shaft, extending `half_width` to each side.
fn arrow_head(from: [f64; 2], to: [f64; 2], length: f64, half_width: f64) -> [[f64; 2]; 3] {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];
    let norm = (dx * dx + dy * dy).sqrt();
    let (ux, uy) = (dx / norm, dy / norm);

    let base = [to[0] - length * ux, to[1] - length * uy];
    [
        to,
        [base[0] - half_width * uy, base[1] + half_width * ux],
        [base[0] + half_width * uy, base[1] - half_width * ux],
    ]
}

fn draw_text(
    area: &FractionArea<'_>,
    text: &str,
    anchor: [f64; 2],
    size_pt: f64,
    weight: FontStyle,
) -> Result<(), RenderError> {
    let font = FontDesc::new(FontFamily::SansSerif, size_pt * PX_PER_PT, weight);
    let style = TextStyle::from(font)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    area.draw(&Text::new(text.to_string(), (anchor[0], anchor[1]), style))?;
    Ok(())
}

/// Converts a printed size in points to whole output pixels.
fn pt(points: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (points * PX_PER_PT).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use shearfig_core::figure::PanelFrame;

    #[test]
    fn point_sizes_scale_with_the_output_resolution() {
        assert_eq!(pt(2.0), 6);
        assert_eq!(pt(1.5), 4);
        assert_eq!(pt(1.2), 3);
    }

    #[test]
    fn split_regions_are_square() {
        assert_eq!(IMAGE_SIZE.0 / 2, IMAGE_SIZE.1 / 4);
    }

    #[test]
    fn arrow_head_points_along_the_shaft() {
        let [tip, left, right] = arrow_head([0.0, 0.0], [0.0, 1.0], 0.1, 0.04);

        assert_relative_eq!(tip[0], 0.0);
        assert_relative_eq!(tip[1], 1.0);

        // Base corners sit symmetrically behind the tip.
        assert_relative_eq!(left[0], -0.04);
        assert_relative_eq!(left[1], 0.9);
        assert_relative_eq!(right[0], 0.04);
        assert_relative_eq!(right[1], 0.9);
    }

    #[test]
    fn arrow_head_follows_diagonal_directions() {
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        let [tip, left, right] = arrow_head([0.0, 0.0], [1.0, 1.0], 0.1, 0.04);

        assert_relative_eq!(tip[0], 1.0);
        assert_relative_eq!(tip[1], 1.0);

        let base_x = (left[0] + right[0]) / 2.0;
        let base_y = (left[1] + right[1]) / 2.0;
        assert_relative_eq!(base_x, 1.0 - 0.1 * inv_sqrt2);
        assert_relative_eq!(base_y, 1.0 - 0.1 * inv_sqrt2);
    }

    #[test]
    fn fraction_window_contains_every_annotation_anchor() {
        let anchors = [
            TAG_ANCHOR,
            PanelFrame::Edge.x_label_anchor(),
            PanelFrame::Edge.y_label_anchor(),
            PanelFrame::Centered.x_label_anchor(),
            PanelFrame::Centered.y_label_anchor(),
        ];

        for [x, y] in anchors {
            assert!(x > FRACTION_WINDOW_X.0 && x < FRACTION_WINDOW_X.1);
            assert!(y > FRACTION_WINDOW_Y.0 && y < FRACTION_WINDOW_Y.1);
        }

        for frame in [PanelFrame::Edge, PanelFrame::Centered] {
            for arrow in frame.axis_arrows() {
                for [x, y] in [arrow.from, arrow.to] {
                    assert!(x >= FRACTION_WINDOW_X.0 && x <= FRACTION_WINDOW_X.1);
                    assert!(y >= FRACTION_WINDOW_Y.0 && y <= FRACTION_WINDOW_Y.1);
                }
            }
        }
    }
}
