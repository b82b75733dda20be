use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, LineStyle, LineStyleType,
        SplitLine, TextStyle, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::{Bar, Line},
};
use chrono::Local;
use gloo::events::EventListener;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::Config;
use crate::models::{
    history::{WeatherForecast, YieldRecord},
    sensor::{DailyAggregate, SensorSample, downsample},
};

const TITLE_COLOR: &str = "#1f2937";
const AXIS_COLOR: &str = "#6b7280";
const GRID_COLOR: &str = "#e5e7eb";

const MOISTURE_COLOR: &str = "#2563eb";
const TEMPERATURE_COLOR: &str = "#dc2626";
const NITROGEN_COLOR: &str = "#16a34a";
const PHOSPHORUS_COLOR: &str = "#9333ea";
const POTASSIUM_COLOR: &str = "#ea580c";
const RAINFALL_COLOR: &str = "#0891b2";
const YIELD_COLOR: &str = "#ca8a04";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub name: &'static str,
    pub kind: SeriesKind,
    pub color: &'static str,
    pub values: Vec<f64>,
}

impl SeriesSpec {
    fn line(name: &'static str, color: &'static str, values: Vec<f64>) -> Self {
        Self {
            name,
            kind: SeriesKind::Line,
            color,
            values,
        }
    }

    fn bar(name: &'static str, color: &'static str, values: Vec<f64>) -> Self {
        Self {
            name,
            kind: SeriesKind::Bar,
            color,
            values,
        }
    }
}

/// Plain description of a chart; the component turns it into a `charming` chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// DOM id of the render target, unique per page
    pub id: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub categories: Vec<String>,
    pub series: Vec<SeriesSpec>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Raw soil moisture over the history window, every few samples.
    pub fn moisture_history(samples: &[SensorSample]) -> Self {
        let (categories, values) = downsample(samples, Config::SAMPLE_STRIDE)
            .map(|s| {
                let label = s
                    .timestamp
                    .with_timezone(&Local)
                    .format("%b %-d %H:%M")
                    .to_string();
                (label, s.soil_moisture)
            })
            .unzip();

        Self {
            id: "moisture-history-chart",
            title: "Soil Moisture History",
            y_label: "%",
            categories,
            series: vec![SeriesSpec::line("Soil Moisture", MOISTURE_COLOR, values)],
        }
    }

    pub fn yield_history(records: &[YieldRecord]) -> Self {
        Self {
            id: "yield-history-chart",
            title: "Yield History",
            y_label: "t/ha",
            categories: records.iter().map(|r| r.season.clone()).collect(),
            series: vec![SeriesSpec::bar(
                "Yield",
                YIELD_COLOR,
                records.iter().map(|r| r.yield_amount).collect(),
            )],
        }
    }

    /// Daily mean moisture and temperature.
    pub fn moisture_temperature(days: &[DailyAggregate]) -> Self {
        Self {
            id: "moisture-temperature-chart",
            title: "Moisture & Temperature Trends",
            y_label: "% / °C",
            categories: days.iter().map(DailyAggregate::label).collect(),
            series: vec![
                SeriesSpec::line(
                    "Soil Moisture (%)",
                    MOISTURE_COLOR,
                    days.iter().map(|d| d.moisture).collect(),
                ),
                SeriesSpec::line(
                    "Temperature (°C)",
                    TEMPERATURE_COLOR,
                    days.iter().map(|d| d.temperature).collect(),
                ),
            ],
        }
    }

    pub fn nutrient_trends(days: &[DailyAggregate]) -> Self {
        Self {
            id: "nutrient-trends-chart",
            title: "Soil Nutrient Trends",
            y_label: "ppm",
            categories: days.iter().map(DailyAggregate::label).collect(),
            series: vec![
                SeriesSpec::line(
                    "Nitrogen",
                    NITROGEN_COLOR,
                    days.iter().map(|d| d.nitrogen).collect(),
                ),
                SeriesSpec::line(
                    "Phosphorus",
                    PHOSPHORUS_COLOR,
                    days.iter().map(|d| d.phosphorus).collect(),
                ),
                SeriesSpec::line(
                    "Potassium",
                    POTASSIUM_COLOR,
                    days.iter().map(|d| d.potassium).collect(),
                ),
            ],
        }
    }

    /// Rainfall bars with the temperature line on top.
    pub fn forecast(forecast: &WeatherForecast) -> Self {
        let days = &forecast.forecast;
        Self {
            id: "forecast-chart",
            title: "7-Day Weather Forecast",
            y_label: "mm / °C",
            categories: days.iter().map(|d| d.label()).collect(),
            series: vec![
                SeriesSpec::bar(
                    "Rainfall (mm)",
                    RAINFALL_COLOR,
                    days.iter().map(|d| d.rainfall).collect(),
                ),
                SeriesSpec::line(
                    "Temperature (°C)",
                    TEMPERATURE_COLOR,
                    days.iter().map(|d| d.temperature).collect(),
                ),
            ],
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub spec: ChartSpec,
}

#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    let container_ref = use_node_ref();
    let id = props.spec.id;

    {
        let container_ref = container_ref.clone();

        use_effect_with(
            (props.spec.clone(), container_ref),
            move |(spec, container_ref)| {
                let listener = container_ref.cast::<HtmlElement>().and_then(|container| {
                    let chart = build_chart(spec);
                    render_chart(&container, id, &chart);

                    web_sys::window().map(|window| {
                        EventListener::new(&window, "resize", move |_| {
                            render_chart(&container, id, &chart);
                        })
                    })
                });

                move || drop(listener)
            },
        );
    }

    if props.spec.is_empty() {
        return html! {
            <div class="chart-container empty">
                <p>{"No data available"}</p>
            </div>
        };
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={id} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, id: &str, chart: &CharmingChart) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    if let Err(e) = WasmRenderer::new(width, height).render(id, chart) {
        gloo::console::error!(&format!("Render error in {id}: {e:?}"));
    }
}

/// Builds the `charming` chart for a spec.
pub fn build_chart(spec: &ChartSpec) -> CharmingChart {
    let chart = CharmingChart::new()
        .title(
            Title::new()
                .text(spec.title)
                .left("center")
                .text_style(TextStyle::new().font_size(16).color(TITLE_COLOR)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("18%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(spec.categories.clone())
                .axis_label(AxisLabel::new().rotate(45).color(AXIS_COLOR)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(spec.y_label)
                .axis_label(AxisLabel::new().color(AXIS_COLOR))
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color(GRID_COLOR)
                            .type_(LineStyleType::Dashed),
                    ),
                ),
        );

    spec.series.iter().fold(chart, |chart, series| {
        let style = ItemStyle::new().color(series.color);
        match series.kind {
            SeriesKind::Line => chart.series(
                Line::new()
                    .name(series.name)
                    .smooth(true)
                    .item_style(style)
                    .data(series.values.clone()),
            ),
            SeriesKind::Bar => chart.series(
                Bar::new()
                    .name(series.name)
                    .bar_width("60%")
                    .item_style(style)
                    .data(series.values.clone()),
            ),
        }
    })
}
