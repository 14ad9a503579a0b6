//! HTML rendering of a [`LegendView`].
//!
//! Class names match the frontend stylesheet: `legend_bubbles` stacks its
//! `.b` children at a shared bottom edge inside a `--maxD` square, and each
//! `.tick`/`.lbl` pair is absolutely positioned by `top`.

use landslide_map_landslide_models::Metric;
use maud::{Markup, html};

use crate::LegendView;

/// Heading shown before any legend has been built.
pub const PLACEHOLDER_TITLE: &str = "Legend";

/// Renders the bubble diagram and its labels.
#[must_use]
pub fn legend_html(view: &LegendView) -> String {
    legend_markup(view).into_string()
}

fn legend_markup(view: &LegendView) -> Markup {
    html! {
        div.legend_box {
            div.legend_bubbles style=(format!("--maxD: {}px; --color: {};", view.extent, view.color)) {
                @for bubble in &view.bubbles {
                    span.b style=(format!("width: {0}px; height: {0}px;", bubble.diameter)) {}
                }
            }
            div.legend_labels {
                @for row in &view.rows {
                    span.tick style=(format!("top: {}px;", row.top)) {}
                    div.lbl style=(format!("top: {}px;", row.top)) { (row.label) }
                }
            }
        }
    }
}

/// Renders the whole legend panel: title, diagram and the metric switch
/// with `active` checked.
///
/// When `view` is `None` the body is left empty and the placeholder title
/// is shown.
#[must_use]
pub fn legend_panel_html(view: Option<&LegendView>, active: Metric) -> String {
    let title = view.map_or(PLACEHOLDER_TITLE, |v| v.title.as_str());
    html! {
        div.legend {
            div.legend_title { (title) }
            div.legend_body {
                @if let Some(view) = view {
                    (legend_markup(view))
                }
            }
            div.legend_switch style="margin-top:8px;" {
                @for (i, metric) in Metric::all().iter().enumerate() {
                    label style=[(i == 0).then_some("margin-right:10px;")] {
                        input type="radio" name="metric" value=(metric.as_ref()) checked[*metric == active];
                        " " (metric.switch_label())
                    }
                }
            }
        }
    }
    .into_string()
}
