//! Demo shell for the range selection widget.
//! Fetches bounds from the mock service and wires the two exercise views.

use range_select::components::{Range, RangeMode};
use range_select::RangeValue;
use yew::prelude::*;

mod config;
mod services;

use config::{CURRENCY_SUFFIX, INITIAL_MAX, INITIAL_MIN};
use services::{fetch_fixed_range, fetch_normal_range, FixedRange, NormalRange};

/// Which demo page is showing. Deliberately not a router: the shell only
/// exists to feed the widget and observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Home,
    NormalDemo,
    FixedDemo,
}

/// Upstream fetch lifecycle for a demo view.
enum FetchState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

/// Renders the fetch-failure alert with its retry affordance.
fn render_fetch_error(message: &str, retry: Callback<MouseEvent>) -> Html {
    html! {
        <div role="alert" class="fetch-error">
            <p>{ "Something went wrong while loading the range data." }</p>
            <pre>{ message.to_string() }</pre>
            <button onclick={retry}>{ "Retry" }</button>
        </div>
    }
}

/// Renders the current selection reported by the widget.
fn render_selection(selection: Option<RangeValue>) -> Html {
    match selection {
        Some(value) => html! {
            <p class="selection">{ format!("Selected: {} – {}", value.min, value.max) }</p>
        },
        None => html! {},
    }
}

#[function_component(NormalRangeDemo)]
fn normal_range_demo() -> Html {
    let data = use_state(|| FetchState::<NormalRange>::Loading);
    let retries = use_state(|| 0u32);
    let selection = use_state(|| None::<RangeValue>);

    {
        let data = data.clone();
        use_effect_with(*retries, move |_| {
            data.set(FetchState::Loading);
            let data = data.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_normal_range().await {
                    Ok(range) => data.set(FetchState::Loaded(range)),
                    Err(e) => data.set(FetchState::Failed(e.to_string())),
                }
            });
            || ()
        });
    }

    let on_change = {
        let selection = selection.clone();
        Callback::from(move |value: RangeValue| {
            log::info!("normal range selection: {} - {}", value.min, value.max);
            selection.set(Some(value));
        })
    };

    let retry = {
        let retries = retries.clone();
        Callback::from(move |_: MouseEvent| retries.set(*retries + 1))
    };

    html! {
        <section class="exercise">
            <h2>{ "Exercise 1: Normal Range" }</h2>
            <ul>
                <li>{ "Click the min/max labels to edit them" }</li>
                <li>{ "Values clamp to the configured bounds" }</li>
                <li>{ "Handles never cross each other" }</li>
            </ul>
            { match &*data {
                FetchState::Loading => html! {
                    <div class="loading">{ "Loading range data..." }</div>
                },
                FetchState::Failed(message) => render_fetch_error(message, retry),
                FetchState::Loaded(range) => html! {
                    <Range
                        mode={RangeMode::Normal}
                        min={range.min}
                        max={range.max}
                        initial_min={INITIAL_MIN}
                        initial_max={INITIAL_MAX}
                        on_change={on_change}
                    />
                },
            } }
            { render_selection(*selection) }
        </section>
    }
}

#[function_component(FixedRangeDemo)]
fn fixed_range_demo() -> Html {
    let data = use_state(|| FetchState::<FixedRange>::Loading);
    let retries = use_state(|| 0u32);
    let selection = use_state(|| None::<RangeValue>);

    {
        let data = data.clone();
        use_effect_with(*retries, move |_| {
            data.set(FetchState::Loading);
            let data = data.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match fetch_fixed_range().await {
                    Ok(range) => data.set(FetchState::Loaded(range)),
                    Err(e) => data.set(FetchState::Failed(e.to_string())),
                }
            });
            || ()
        });
    }

    let on_change = {
        let selection = selection.clone();
        Callback::from(move |value: RangeValue| {
            log::info!("fixed range selection: {} - {}", value.min, value.max);
            selection.set(Some(value));
        })
    };

    let retry = {
        let retries = retries.clone();
        Callback::from(move |_: MouseEvent| retries.set(*retries + 1))
    };

    html! {
        <section class="exercise">
            <h2>{ "Exercise 2: Fixed Values Range" }</h2>
            <ul>
                <li>{ "Selection snaps to the predefined values" }</li>
                <li>{ "Labels are not editable" }</li>
                <li>{ "Handles never cross each other" }</li>
            </ul>
            { match &*data {
                FetchState::Loading => html! {
                    <div class="loading">{ "Loading range data..." }</div>
                },
                FetchState::Failed(message) => render_fetch_error(message, retry),
                FetchState::Loaded(range) => html! {
                    <Range
                        mode={RangeMode::Fixed}
                        fixed_values={range.values.clone()}
                        currency={CURRENCY_SUFFIX}
                        on_change={on_change}
                    />
                },
            } }
            { render_selection(*selection) }
        </section>
    }
}

/// Landing view: one card per exercise.
fn render_home(open_normal: Callback<MouseEvent>, open_fixed: Callback<MouseEvent>) -> Html {
    html! {
        <div class="home-content">
            <h2>{ "Range Component Demo" }</h2>
            <p>{ "A custom dual-handle range slider with two selection modes:" }</p>
            <div class="cards">
                <button class="card" onclick={open_normal}>
                    <h3>{ "Exercise 1: Normal Range" }</h3>
                    <p>{ "Continuous selection between a minimum and a maximum. \
                          Drag the handles or click a label to type a value." }</p>
                    <span class="arrow">{ "→" }</span>
                </button>
                <button class="card" onclick={open_fixed}>
                    <h3>{ "Exercise 2: Fixed Values Range" }</h3>
                    <p>{ "Selection restricted to a predefined set of values; \
                          handles snap to the nearest option." }</p>
                    <span class="arrow">{ "→" }</span>
                </button>
            </div>
        </div>
    }
}

/// Root component wiring the header, navigation, and the active view.
#[function_component(App)]
fn app() -> Html {
    let view = use_state(|| View::Home);

    let goto = {
        let view = view.clone();
        move |target: View| {
            let view = view.clone();
            Callback::from(move |_: MouseEvent| view.set(target))
        }
    };

    let nav_class = |target: View| {
        if *view == target {
            classes!("nav-link", "active")
        } else {
            classes!("nav-link")
        }
    };

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{ "Range Select" }</h1>
                </div>
            </header>
            <main class="main">
                <div class="container">
                    <nav class="nav">
                        <button class={nav_class(View::Home)} onclick={goto(View::Home)}>
                            { "Home" }
                        </button>
                        <button class={nav_class(View::NormalDemo)} onclick={goto(View::NormalDemo)}>
                            { "Exercise 1" }
                        </button>
                        <button class={nav_class(View::FixedDemo)} onclick={goto(View::FixedDemo)}>
                            { "Exercise 2" }
                        </button>
                    </nav>
                    { match *view {
                        View::Home => render_home(goto(View::NormalDemo), goto(View::FixedDemo)),
                        View::NormalDemo => html! { <NormalRangeDemo /> },
                        View::FixedDemo => html! { <FixedRangeDemo /> },
                    } }
                </div>
            </main>
        </>
    }
}

/// Entry point: installs the panic hook and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
