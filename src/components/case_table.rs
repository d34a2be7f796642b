use chrono::{DateTime, Utc};
use std::rc::Rc;
use yew::prelude::*;

use crate::models::cases::{CaseRecord, Cases, SortColumn, SortOrder};
use crate::services::api::ApiVersion;

/// Table timestamp format, `DD/MM/YYYY HH:mm`.
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

#[derive(Properties, PartialEq)]
pub struct CaseTableProps {
    pub cases: Rc<Cases>,
    pub version: ApiVersion,
}

/// Sortable confirmed-case table. Clicking a header sorts by that column;
/// clicking it again flips the direction. Newest cases are shown first by
/// default.
#[function_component(CaseTable)]
pub fn case_table(props: &CaseTableProps) -> Html {
    let sort = use_state(|| (SortColumn::Date, SortOrder::Descending));
    let (column, order) = *sort;

    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |clicked: SortColumn| {
            let (column, order) = *sort;
            if clicked == column {
                sort.set((column, order.toggled()));
            } else {
                sort.set((clicked, SortOrder::Ascending));
            }
        })
    };

    let records = props.cases.sorted(column, order);
    let with_source = props.version.supports_infection_source();
    let column_count = if with_source { "3" } else { "2" };

    html! {
        <table class="case-table">
            <thead>
                <tr>
                    { header_cell("Date & Time", SortColumn::Date, column, order, &on_sort) }
                    { header_cell("Health Care District", SortColumn::District, column, order, &on_sort) }
                    if with_source {
                        { header_cell("Infection Source", SortColumn::Source, column, order, &on_sort) }
                    }
                </tr>
            </thead>
            <tbody>
                if records.is_empty() {
                    <tr>
                        <td class="empty-row" colspan={column_count}>{"No rows found"}</td>
                    </tr>
                } else {
                    { records.iter().map(|record| render_row(record, with_source)).collect::<Html>() }
                }
            </tbody>
        </table>
    }
}

fn header_cell(
    label: &'static str,
    clicked: SortColumn,
    active: SortColumn,
    order: SortOrder,
    on_sort: &Callback<SortColumn>,
) -> Html {
    let indicator = if active == clicked {
        match order {
            SortOrder::Ascending => " ▲",
            SortOrder::Descending => " ▼",
        }
    } else {
        ""
    };

    let onclick = {
        let on_sort = on_sort.clone();
        Callback::from(move |_: MouseEvent| on_sort.emit(clicked))
    };

    html! {
        <th {onclick}>{label}{indicator}</th>
    }
}

fn render_row(record: &CaseRecord, with_source: bool) -> Html {
    html! {
        <tr>
            <td>{format_timestamp(&record.date)}</td>
            <td>{record.district().to_string()}</td>
            if with_source {
                <td>{record.infection_source_country.clone().unwrap_or_default()}</td>
            }
        </tr>
    }
}
