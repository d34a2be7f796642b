use crate::hooks::use_cases::CasesState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub state: CasesState,
}

/// Loading indicator. Fetch errors are logged to the console and the page
/// degrades to empty collections, so only the in-flight state renders
/// anything.
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    match &props.state {
        CasesState::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading data..."}</p>
            </div>
        },
        _ => Html::default(),
    }
}
