use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::cases::{Cases, CoronaReport};
use crate::services::api::{ApiVersion, fetch_report_for_version};

#[derive(Clone, PartialEq, Debug)]
pub enum CasesState {
    Loading,
    Loaded(Rc<Cases>),
    Error(String),
}

impl CasesState {
    /// Returns true if the fetch is still in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, CasesState::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<Cases>> {
        match self {
            CasesState::Loaded(cases) => Some(cases),
            _ => None,
        }
    }

    /// Current snapshot for rendering. In-flight and failed fetches read as
    /// an empty collection, so the page degrades instead of failing visibly.
    pub fn snapshot(&self) -> Rc<Cases> {
        match self {
            CasesState::Loaded(cases) => cases.clone(),
            _ => Rc::new(Cases::default()),
        }
    }
}

/// Shared fetch-on-mount machinery behind the three public hooks.
///
/// Each caller owns its own state slot and its own request; the requests
/// race freely and never coordinate. The abort flag is set on unmount, so a
/// response that arrives afterwards is discarded instead of writing state.
#[hook]
fn use_case_series(
    version: ApiVersion,
    enabled: bool,
    select: fn(CoronaReport) -> Cases,
) -> UseStateHandle<CasesState> {
    let state = use_state(|| {
        if enabled {
            CasesState::Loading
        } else {
            CasesState::Loaded(Rc::new(Cases::default()))
        }
    });

    {
        let state = state.clone();

        use_effect_with((version, enabled), move |(version, enabled)| {
            let state = state.clone();
            let version = *version;
            let aborted = Rc::new(Cell::new(false));
            let aborted_check = aborted.clone();

            if *enabled {
                spawn_local(async move {
                    match fetch_report_for_version(version).await {
                        Ok(report) if !aborted_check.get() => {
                            state.set(CasesState::Loaded(Rc::new(select(report))));
                        }
                        Err(e) if !aborted_check.get() => {
                            gloo::console::error!(format!("Fetch failed: {e}"));
                            state.set(CasesState::Error(e.to_string()));
                        }
                        _ => {} // Unmounted before the response arrived, ignore it
                    }
                });
            }

            move || {
                aborted.set(true);
            }
        });
    }

    state
}

/// Fetches the confirmed-case collection once on mount.
#[hook]
pub fn use_confirmed(version: ApiVersion) -> UseStateHandle<CasesState> {
    use_case_series(version, true, |report| report.confirmed)
}

/// Fetches the death collection once on mount.
#[hook]
pub fn use_deaths(version: ApiVersion) -> UseStateHandle<CasesState> {
    use_case_series(version, true, |report| report.deaths)
}

/// Fetches the recovered collection once on mount. The v2 endpoint dropped
/// recovered data, so for v2 no request is issued and the state holds an
/// empty collection.
#[hook]
pub fn use_recovered(version: ApiVersion) -> UseStateHandle<CasesState> {
    use_case_series(version, version.supports_recovered(), |report| {
        report.recovered
    })
}
