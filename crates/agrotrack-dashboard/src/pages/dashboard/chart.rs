//! Engine RPM line chart

use leptos::*;

use crate::view::ChartSeries;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 200.0;

#[component]
pub fn RpmChart(series: ChartSeries) -> impl IntoView {
    let polyline = series.svg_points(CHART_WIDTH, CHART_HEIGHT);
    let dots = series
        .plot(CHART_WIDTH, CHART_HEIGHT)
        .into_iter()
        .map(|(x, y)| view! { <circle cx=x cy=y r="4" class="chart-point"/> })
        .collect_view();
    let labels = series
        .points
        .iter()
        .map(|point| {
            let tooltip = format!("{}: {} RPM", point.label, point.value);
            view! { <span title=tooltip>{point.label.clone()}</span> }
        })
        .collect_view();

    view! {
        <div class="chart">
            <div class="chart-header">
                <h3>{series.label.clone()}</h3>
                <span class="chart-value">{format!("max {}", series.max_value())}</span>
            </div>
            <div class="chart-body">
                <svg
                    class="line-chart"
                    viewBox=format!("0 0 {} {}", CHART_WIDTH, CHART_HEIGHT)
                    preserveAspectRatio="none"
                >
                    <line x1="0" y1="50" x2="600" y2="50" class="grid-line"/>
                    <line x1="0" y1="100" x2="600" y2="100" class="grid-line"/>
                    <line x1="0" y1="150" x2="600" y2="150" class="grid-line"/>
                    <polyline points=polyline class="chart-line-rpm" fill="none"/>
                    {dots}
                </svg>
                <div class="chart-x-labels">{labels}</div>
            </div>
        </div>
    }
}
