use yew::prelude::*;

use corona_dashboard::components::{CaseChart, CaseTable, Status, Summary};
use corona_dashboard::config::Config;
use corona_dashboard::hooks::use_cases::{use_confirmed, use_deaths, use_recovered};

#[function_component(App)]
fn app() -> Html {
    let version = Config::API_VERSION;
    let confirmed = use_confirmed(version);
    let deaths = use_deaths(version);
    let recovered = use_recovered(version);

    let confirmed_cases = confirmed.snapshot();
    let recovered_total = version
        .supports_recovered()
        .then(|| recovered.snapshot().total());

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Coronavirus disease (COVID-19) outbreak in Finland"}</h1>
            </header>

            <main class="app-main">
                <Status state={(*confirmed).clone()} />

                <section class="chart-section">
                    <CaseChart cases={confirmed_cases.clone()} />
                </section>

                <section class="summary-section">
                    <Summary
                        confirmed={confirmed_cases.total()}
                        deaths={deaths.snapshot().total()}
                        recovered={recovered_total}
                    />
                </section>

                <section class="table-section">
                    <CaseTable cases={confirmed_cases} {version} />
                </section>
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
