use charming::{
    Chart as CharmingChart,
    component::Title,
    element::{Color, TextStyle, Tooltip, Trigger},
    renderer::WasmRenderer,
    series::Pie,
};
use gloo::events::EventListener;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::Config;
use crate::models::cases::{Cases, DistrictCount};

const CHART_ID: &str = "district-chart";

/// Fixed slice palette. Colors are assigned by district position, which is
/// why the aggregation preserves first-occurrence order: the same snapshot
/// must color the same district identically on every render.
const PALETTE: [&str; 29] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#ff99ff", "#ffff66", "#b3e6b3", "#e6194b",
    "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#bcf60c",
    "#fabebe", "#008080", "#e6beff", "#9a6324", "#fffac8", "#800000", "#aaffc3", "#808000",
    "#ffd8b1", "#000075", "#808080", "#ffffff", "#000000",
];

/// One pie slice ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSlice {
    pub name: String,
    pub value: usize,
    pub color: &'static str,
}

/// Maps district counts onto palette-colored slices. The palette wraps when
/// there are more districts than colors.
pub fn chart_slices(counts: &[DistrictCount]) -> Vec<ChartSlice> {
    counts
        .iter()
        .enumerate()
        .map(|(index, count)| ChartSlice {
            name: count.health_care_district.clone(),
            value: count.count,
            color: PALETTE[index % PALETTE.len()],
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct CaseChartProps {
    pub cases: Rc<Cases>,
}

#[function_component(CaseChart)]
pub fn case_chart(props: &CaseChartProps) -> Html {
    let container_ref = use_node_ref();
    let slices = use_memo(props.cases.clone(), |cases| {
        chart_slices(&cases.by_district())
    });

    {
        let container_ref = container_ref.clone();

        use_effect_with((slices, container_ref), |(slices, container_ref)| {
            let listener = container_ref.cast::<HtmlElement>().map(|container| {
                render_chart(&container, slices);

                let slices = slices.clone();
                debounced_resize_listener(
                    move || render_chart(&container, &slices),
                    Config::CHART_RESIZE_DEBOUNCE_MS,
                )
            });

            move || drop(listener)
        });
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={CHART_ID} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, slices: &[ChartSlice]) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 || slices.is_empty() {
        return;
    }

    let chart = build_chart(slices);
    if let Err(e) = WasmRenderer::new(width, height).render(CHART_ID, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

fn build_chart(slices: &[ChartSlice]) -> CharmingChart {
    let colors: Vec<Color> = slices.iter().map(|slice| slice.color.into()).collect();
    let data: Vec<(f64, &str)> = slices
        .iter()
        .map(|slice| (slice.value as f64, slice.name.as_str()))
        .collect();

    CharmingChart::new()
        .title(
            Title::new()
                .text("Cases by Health Care District")
                .left("center")
                .text_style(TextStyle::new().font_size(16)),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .color(colors)
        .series(
            Pie::new()
                .name("Confirmed cases")
                .radius("70%")
                .center(vec!["50%", "50%"])
                .data(data),
        )
}

/// Re-renders at most once per quiet period while the window is being
/// resized; resize events fire continuously during a drag.
fn debounced_resize_listener<F>(callback: F, delay_ms: u32) -> EventListener
where
    F: Fn() + 'static,
{
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let callback = Rc::new(callback);

    EventListener::new(&web_sys::window().unwrap(), "resize", move |_| {
        if let Some(handle) = pending.borrow_mut().take() {
            drop(handle);
        }

        let cb = callback.clone();
        *pending.borrow_mut() = Some(Timeout::new(delay_ms, move || cb()));
    })
}
