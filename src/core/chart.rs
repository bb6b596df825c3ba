use super::format::format_inr;
use super::types::{ChartConfig, ProjectionSample};

/// A fixed-size vector drawing surface. Primitives accumulate until `clear`
/// drops them, and `to_svg` snapshots whatever is currently drawn into a
/// standalone document. Rendering always replaces the full element list, so
/// one surface can be reused across recalculations.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn push(&mut self, element: String) {
        self.elements.push(element);
    }

    pub fn to_svg(&self) -> String {
        let mut doc = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" \
             width=\"{}\" height=\"{}\" role=\"img\">",
            self.width, self.height, self.width, self.height
        );
        for element in &self.elements {
            doc.push_str(element);
        }
        doc.push_str("</svg>");
        doc
    }
}

/// Linear series-index/value to pixel mapping for one render pass.
///
/// Samples spread evenly across the plot width regardless of their actual
/// year gaps; the vertical axis is inverted so value 0 sits on the baseline.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ChartScale {
    pad_left: f64,
    pad_top: f64,
    inner_w: f64,
    inner_h: f64,
    max_y: f64,
    x_denom: f64,
}

impl ChartScale {
    pub(crate) fn new(series: &[ProjectionSample], config: &ChartConfig) -> Self {
        // Floor the denominator at 1 so an all-zero series still maps.
        let max_y = series
            .iter()
            .map(|p| {
                let floor = if config.show_invested { p.invested } else { 0.0 };
                p.value.max(floor)
            })
            .fold(1.0_f64, f64::max);

        Self {
            pad_left: config.pad_left,
            pad_top: config.pad_top,
            inner_w: config.inner_width(),
            inner_h: config.inner_height(),
            max_y,
            x_denom: series.len().saturating_sub(1).max(1) as f64,
        }
    }

    pub(crate) fn max_y(&self) -> f64 {
        self.max_y
    }

    pub(crate) fn x(&self, index: usize) -> f64 {
        self.pad_left + self.inner_w * index as f64 / self.x_denom
    }

    pub(crate) fn y(&self, value: f64) -> f64 {
        self.pad_top + self.inner_h - self.inner_h * value / self.max_y
    }
}

/// Renders the growth chart: gridlines, axis labels, the projected-value
/// polyline, the optional dashed invested polyline, and a marker per sample.
/// The surface is cleared first, so repeated renders are idempotent.
pub fn render_chart(surface: &mut SvgSurface, series: &[ProjectionSample], config: &ChartConfig) {
    surface.clear();

    let scale = ChartScale::new(series, config);
    let right_edge = config.width - config.pad_right;

    for i in 0..=4 {
        let gy = config.pad_top + config.inner_height() * i as f64 / 4.0;
        surface.push(format!(
            "<line x1=\"{}\" x2=\"{right_edge}\" y1=\"{gy}\" y2=\"{gy}\" \
             stroke=\"currentColor\" stroke-opacity=\"0.10\"/>",
            config.pad_left
        ));
    }

    surface.push(text_label(
        config.pad_left,
        config.pad_top + 12.0,
        &format_inr(scale.max_y()),
    ));
    surface.push(text_label(
        config.pad_left,
        config.pad_top + config.inner_height() + 20.0,
        &format_inr(0.0),
    ));

    surface.push(format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"currentColor\" stroke-opacity=\"0.95\" \
         stroke-width=\"3\" stroke-linecap=\"round\"/>",
        polyline_path(series, &scale, |p| p.value)
    ));

    if config.show_invested {
        surface.push(format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"currentColor\" stroke-opacity=\"0.55\" \
             stroke-width=\"2\" stroke-dasharray=\"6 6\" stroke-linecap=\"round\"/>",
            polyline_path(series, &scale, |p| p.invested)
        ));
    }

    for (i, sample) in series.iter().enumerate() {
        surface.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"3.5\" fill=\"currentColor\" fill-opacity=\"0.95\"/>",
            scale.x(i),
            scale.y(sample.value)
        ));
    }
}

/// Convenience wrapper producing a complete document in one call.
pub fn chart_svg(series: &[ProjectionSample], config: &ChartConfig) -> String {
    let mut surface = SvgSurface::new(config.width, config.height);
    render_chart(&mut surface, series, config);
    surface.to_svg()
}

fn text_label(x: f64, y: f64, content: &str) -> String {
    format!(
        "<text x=\"{x}\" y=\"{y}\" fill=\"currentColor\" fill-opacity=\"0.6\" \
         font-size=\"12\">{content}</text>"
    )
}

fn polyline_path<F>(series: &[ProjectionSample], scale: &ChartScale, field: F) -> String
where
    F: Fn(&ProjectionSample) -> f64,
{
    let mut d = String::new();
    for (i, sample) in series.iter().enumerate() {
        let px = scale.x(i);
        let py = scale.y(field(sample));
        if i == 0 {
            d.push_str(&format!("M {px} {py}"));
        } else {
            d.push_str(&format!(" L {px} {py}"));
        }
    }
    d
}
