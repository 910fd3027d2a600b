//! The eight-panel figure model.
//!
//! Composition is pure: a [`FlowFigure`] carries data and layout only, and
//! the rendering crates decide how those become pixels. Panel geometry that
//! is not tied to data (axis-indicator arrows, label anchors, tag anchors)
//! is expressed in axes-fraction coordinates, where (0, 0) and (1, 1) are
//! the corners of a panel's data box.

use crate::{INFLECTION_X, ShearProfile, diagnostics};

/// Number of panels in the figure, laid out 4×2 row-major.
pub const PANEL_COUNT: usize = 8;

/// Bold panel tags, in layout order.
pub const PANEL_TAGS: [&str; PANEL_COUNT] =
    ["(a)", "(b)", "(c)", "(d)", "(e)", "(f)", "(g)", "(h)"];

/// Per-panel y-axis labels, in layout order.
pub const Y_LABELS: [&str; PANEL_COUNT] = ["v̄", "v̄", "ωz", "ωz", "R", "R", "F", "F"];

/// Anchor of every panel tag, in axes-fraction coordinates.
pub const TAG_ANCHOR: [f64; 2] = [-0.23, 0.9];

/// Fraction of the local velocity covered by a flow arrow.
pub const FLOW_ARROW_SCALE: f64 = 0.9;

/// Reference marker on the profile panels; v(5) = 5 for both profiles.
const PROFILE_MARKER: [f64; 2] = [INFLECTION_X, 5.0];

/// A straight annotation arrow from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub from: [f64; 2],
    pub to: [f64; 2],
}

impl Arrow {
    #[must_use]
    pub fn new(from: [f64; 2], to: [f64; 2]) -> Self {
        Self { from, to }
    }
}

/// Placement of a panel's coordinate-axis indicator arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelFrame {
    /// Arrows along the bottom and left edges; used by the profile panels.
    Edge,
    /// Arrows crossing at the panel center; used by the diagnostic panels.
    Centered,
}

impl PanelFrame {
    /// Endpoints of the horizontal and vertical indicator arrows, in
    /// axes-fraction coordinates.
    #[must_use]
    pub fn axis_arrows(self) -> [Arrow; 2] {
        match self {
            PanelFrame::Edge => [
                Arrow::new([-0.05, 0.0], [1.05, 0.0]),
                Arrow::new([0.0, -0.05], [0.0, 1.05]),
            ],
            PanelFrame::Centered => [
                Arrow::new([-0.05, 0.5], [1.05, 0.5]),
                Arrow::new([0.5, -0.05], [0.5, 1.05]),
            ],
        }
    }

    /// Anchor of the "x" axis label, in axes-fraction coordinates.
    #[must_use]
    pub fn x_label_anchor(self) -> [f64; 2] {
        match self {
            PanelFrame::Edge => [0.95, -0.1],
            PanelFrame::Centered => [0.95, 0.4],
        }
    }

    /// Anchor of the y-axis label, in axes-fraction coordinates.
    #[must_use]
    pub fn y_label_anchor(self) -> [f64; 2] {
        match self {
            PanelFrame::Edge => [-0.07, 0.5],
            PanelFrame::Centered => [0.60, 0.96],
        }
    }
}

/// Static layout of one panel, fixed before any curve is drawn on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpec {
    pub tag: &'static str,
    pub y_label: &'static str,
    pub frame: PanelFrame,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PanelSpec {
    /// Maps a data point into this panel's axes-fraction coordinates.
    #[must_use]
    pub fn to_fraction(&self, point: [f64; 2]) -> [f64; 2] {
        let (x0, x1) = self.x_range;
        let (y0, y1) = self.y_range;
        [(point[0] - x0) / (x1 - x0), (point[1] - y0) / (y1 - y0)]
    }
}

/// One composed panel: its layout plus everything drawn on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub spec: PanelSpec,
    /// The curve, as (x, y) data points.
    pub curve: Vec<[f64; 2]>,
    /// Reference marker (inflection point or origin), in data coordinates.
    pub marker: [f64; 2],
    /// Flow-direction arrows, in data coordinates; empty on diagnostic panels.
    pub flow_arrows: Vec<Arrow>,
}

impl Panel {
    /// The curve split into runs that lie inside the panel's axis limits,
    /// with boundary crossings interpolated.
    ///
    /// The steep diagnostic curves run far past the ±5 box near the domain
    /// edges; renderers draw these runs so off-scale data is cut at the
    /// data box rather than spilling into neighboring panels.
    #[must_use]
    pub fn clipped_curve(&self) -> Vec<Vec<[f64; 2]>> {
        let mut runs = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for pair in self.curve.windows(2) {
            let Some((enter, exit)) =
                clip_segment(pair[0], pair[1], self.spec.x_range, self.spec.y_range)
            else {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                continue;
            };

            if current.last() != Some(&enter) {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
                current.push(enter);
            }
            current.push(exit);
        }

        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

/// Liang–Barsky clip of the segment `from`→`to` against an axis-aligned box.
///
/// Returns the surviving sub-segment, or `None` when it misses the box.
/// Endpoints already inside pass through unchanged, so consecutive clipped
/// segments of a polyline stay exactly contiguous.
#[allow(clippy::float_cmp)]
fn clip_segment(
    from: [f64; 2],
    to: [f64; 2],
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Option<([f64; 2], [f64; 2])> {
    let dx = to[0] - from[0];
    let dy = to[1] - from[1];

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    for (p, q) in [
        (-dx, from[0] - x_range.0),
        (dx, x_range.1 - from[0]),
        (-dy, from[1] - y_range.0),
        (dy, y_range.1 - from[1]),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }

    let enter = if t0 == 0.0 {
        from
    } else {
        [from[0] + t0 * dx, from[1] + t0 * dy]
    };
    let exit = if t1 == 1.0 {
        to
    } else {
        [from[0] + t1 * dx, from[1] + t1 * dy]
    };

    Some((enter, exit))
}

/// The composed eight-panel figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowFigure {
    panels: Vec<Panel>,
}

impl FlowFigure {
    /// Composes the full figure from the two generated profiles.
    ///
    /// Deterministic: every call yields an equal figure.
    #[must_use]
    pub fn compose() -> Self {
        let stable = ShearProfile::stable();
        let unstable = ShearProfile::unstable();

        let panels = vec![
            profile_panel(0, &stable),
            profile_panel(1, &unstable),
            vorticity_panel(2, &stable),
            vorticity_panel(3, &unstable),
            curvature_panel(4, &stable),
            curvature_panel(5, &unstable),
            fjortoft_panel(6, &stable),
            fjortoft_panel(7, &unstable),
        ];

        Self { panels }
    }

    /// The eight panels, in layout order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}

/// Velocity profile panel: the curve in flow coordinates, the inflection
/// marker, and one flow arrow per integer x-position 2..=8.
fn profile_panel(index: usize, profile: &ShearProfile) -> Panel {
    let spec = PanelSpec {
        tag: PANEL_TAGS[index],
        y_label: Y_LABELS[index],
        frame: PanelFrame::Edge,
        x_range: (0.0, 10.0),
        y_range: (0.0, 10.0),
    };

    let curve = profile
        .x()
        .iter()
        .zip(profile.v())
        .map(|(&x, &v)| [x, v])
        .collect();

    Panel {
        spec,
        curve,
        marker: PROFILE_MARKER,
        flow_arrows: flow_arrows(profile),
    }
}

fn vorticity_panel(index: usize, profile: &ShearProfile) -> Panel {
    let values = diagnostics::vorticity(profile);
    let marker_y = values[profile.midpoint_index()];
    diagnostic_panel(index, profile, &values, marker_y)
}

fn curvature_panel(index: usize, profile: &ShearProfile) -> Panel {
    diagnostic_panel(index, profile, &diagnostics::curvature(profile), 0.0)
}

fn fjortoft_panel(index: usize, profile: &ShearProfile) -> Panel {
    diagnostic_panel(index, profile, &diagnostics::fjortoft(profile), 0.0)
}

/// Diagnostic panel: the derived curve against x − 5, centered axes, marker
/// on the vertical axis.
fn diagnostic_panel(index: usize, profile: &ShearProfile, values: &[f64], marker_y: f64) -> Panel {
    let spec = PanelSpec {
        tag: PANEL_TAGS[index],
        y_label: Y_LABELS[index],
        frame: PanelFrame::Centered,
        x_range: (-5.0, 5.0),
        y_range: (-5.0, 5.0),
    };

    let curve = profile
        .x()
        .iter()
        .zip(values)
        .map(|(&x, &y)| [x - INFLECTION_X, y])
        .collect();

    Panel {
        spec,
        curve,
        marker: [0.0, marker_y],
        flow_arrows: Vec::new(),
    }
}

/// Upward arrows at integer x-positions indicating the local flow speed.
fn flow_arrows(profile: &ShearProfile) -> Vec<Arrow> {
    (2..=8)
        .map(|i| {
            let x = f64::from(i);
            let tip = profile.v()[profile.nearest_index(x)] * FLOW_ARROW_SCALE;
            Arrow::new([x, 0.0], [x, tip])
        })
        .collect()
}
