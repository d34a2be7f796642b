use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub confirmed: usize,
    pub deaths: usize,
    /// None when the endpoint variant serves no recovered data.
    pub recovered: Option<usize>,
}

#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    html! {
        <div class="summary">
            <h2>{"Corona updates"}</h2>

            <p>{"You can sort the table below by clicking the header"}</p>
            <p>{"Total amounts per health district can be seen by hovering over the pie chart"}</p>
            <hr />

            <p>{"Total confirmed cases in Finland:"}</p>
            <h4 class="summary-number">{props.confirmed}</h4>

            <p>{"Total confirmed deaths in Finland:"}</p>
            <h4 class="summary-number">{props.deaths}</h4>

            if let Some(recovered) = props.recovered {
                <p>{"Total confirmed recovered cases in Finland:"}</p>
                <h4 class="summary-number">{recovered}</h4>
            }
            <hr />

            <div class="summary-actions">
                <a class="home-button" href="index.html">{"Go Back Home"}</a>
            </div>
            <hr />

            <p>
                {"This data is provided by: "}
                <a
                    href="https://github.com/HS-Datadesk/koronavirus-avoindata"
                    target="_blank"
                    rel="noopener"
                >
                    {"Helsingin Sanomat"}
                </a>
            </p>
        </div>
    }
}
