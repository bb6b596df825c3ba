mod chart;
mod engine;
mod format;
mod types;

pub use chart::{SvgSurface, chart_svg, render_chart};
pub use engine::{build_series, inflation_adjust, project, sip_future_value};
pub use format::format_inr;
pub use types::{ChartConfig, ProjectionInput, ProjectionResult, ProjectionSample};
