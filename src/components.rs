//! The dual-handle range selection widget.
//!
//! The component here is the interaction layer: it translates DOM pointer,
//! keyboard, and label-edit events into [`RangeOp`] dispatches against the
//! reducer-held [`RangeState`], and owns the transient drag/tooltip/edit
//! state that never touches the selection invariants.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent as DomPointerEvent};
use yew::prelude::*;

use crate::hooks::use_label_editor;
use crate::utils::clamp;
use crate::{
    format_value, parse_label_value, Boundary, Handle, RangeDomain, RangeOp, RangeState,
    RangeValue,
};

/// Index delta applied by PageUp/PageDown.
const PAGE_STEP: i32 = 10;

/// Selection behavior of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    /// Continuous selection within `[min, max]`.
    Normal,
    /// Selection snapped to a predefined set of values.
    Fixed,
}

#[derive(Properties, PartialEq)]
pub struct RangeProps {
    pub mode: RangeMode,
    /// Lower bound, normal mode only.
    #[prop_or(0.0)]
    pub min: f64,
    /// Upper bound, normal mode only.
    #[prop_or(100.0)]
    pub max: f64,
    /// Allowed values, fixed mode only. Order and duplicates don't matter.
    #[prop_or_default]
    pub fixed_values: Vec<f64>,
    #[prop_or_default]
    pub initial_min: Option<f64>,
    #[prop_or_default]
    pub initial_max: Option<f64>,
    /// Display-only suffix; does not affect the numeric semantics.
    #[prop_or_default]
    pub currency: Option<AttrValue>,
    /// Fired with the new selection after every accepted mutation.
    #[prop_or_default]
    pub on_change: Callback<RangeValue>,
    #[prop_or_default]
    pub class: Classes,
}

impl Reducible for RangeState {
    type Action = RangeOp;

    fn reduce(self: Rc<Self>, action: RangeOp) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

/// Transient tooltip display state. Hover and drag share this slot; the
/// most recent event wins.
#[derive(Clone, Copy, PartialEq)]
struct Tooltip {
    handle: Handle,
    /// Track-relative x offset in pixels.
    left: f64,
    value: f64,
}

/// A live drag: holding this keeps the window pointer listeners registered;
/// dropping it removes them. Released on pointer-up and on unmount.
struct DragSession {
    _listeners: [EventListener; 2],
}

type DragSlot = Rc<RefCell<Option<DragSession>>>;

/// Pointer x relative to the track, clamped to its width, as
/// `(offset_px, percent)`. `None` while the track has no layout yet.
fn track_position(track_ref: &NodeRef, client_x: f64) -> Option<(f64, f64)> {
    let track = track_ref.cast::<HtmlElement>()?;
    let rect = track.get_bounding_client_rect();
    if rect.width() <= 0.0 {
        return None;
    }
    let x = clamp(client_x - rect.left(), 0.0, rect.width());
    Some((x, x / rect.width() * 100.0))
}

#[derive(Properties, PartialEq)]
struct RangeHandleProps {
    which: Handle,
    label: AttrValue,
    lo: f64,
    hi: f64,
    value: f64,
    value_text: AttrValue,
    percent: f64,
    onpointerdown: Callback<PointerEvent>,
    onkeydown: Callback<KeyboardEvent>,
    onmouseenter: Callback<MouseEvent>,
    onmouseleave: Callback<MouseEvent>,
}

/// One draggable, focusable handle exposing the slider accessibility
/// contract.
#[function_component(RangeHandle)]
fn range_handle(props: &RangeHandleProps) -> Html {
    let side = match props.which {
        Handle::Min => "handle-min",
        Handle::Max => "handle-max",
    };
    html! {
        <div
            role="slider"
            tabindex="0"
            aria-label={props.label.clone()}
            aria-valuemin={props.lo.to_string()}
            aria-valuemax={props.hi.to_string()}
            aria-valuenow={props.value.to_string()}
            aria-valuetext={props.value_text.clone()}
            class={classes!("handle", side)}
            style={format!("left: {}%", props.percent)}
            onpointerdown={props.onpointerdown.clone()}
            onkeydown={props.onkeydown.clone()}
            onmouseenter={props.onmouseenter.clone()}
            onmouseleave={props.onmouseleave.clone()}
        />
    }
}

/// # Range
///
/// Dual-handle range selector. Users drag or keyboard-navigate the two
/// handles to pick a `(min, max)` pair, continuously in normal mode or
/// snapped to the configured set in fixed mode. Normal-mode labels are
/// click-to-edit; fixed mode renders a tick per allowed value instead.
#[function_component(Range)]
pub fn range(props: &RangeProps) -> Html {
    let state = use_reducer({
        let domain = match props.mode {
            RangeMode::Normal => RangeDomain::normal(props.min, props.max),
            RangeMode::Fixed => RangeDomain::fixed(&props.fixed_values),
        };
        let initial_min = props.initial_min;
        let initial_max = props.initial_max;
        move || RangeState::new(domain, initial_min, initial_max)
    });

    let track_ref = use_node_ref();
    let tooltip = use_state(|| None::<Tooltip>);
    let drag: DragSlot = use_mut_ref(|| None);
    let min_editor = use_label_editor();
    let max_editor = use_label_editor();

    // Notify the observer once per accepted mutation (and once for the
    // initialized value).
    {
        let on_change = props.on_change.clone();
        use_effect_with(state.value(), move |value| {
            on_change.emit(*value);
            || ()
        });
    }

    // A drag may outlive the widget; make sure unmount drops the session
    // and with it the window listeners.
    {
        let drag = drag.clone();
        use_effect_with((), move |_| {
            move || {
                drag.borrow_mut().take();
            }
        });
    }

    let start_drag = {
        let drag = drag.clone();
        let track_ref = track_ref.clone();
        let tooltip = tooltip.clone();
        let dispatch = state.dispatcher();
        let domain = state.domain().clone();
        Callback::from(move |(event, which): (PointerEvent, Handle)| {
            event.prevent_default();
            let window = gloo_utils::window();
            let on_move = {
                let track_ref = track_ref.clone();
                let tooltip = tooltip.clone();
                let dispatch = dispatch.clone();
                let domain = domain.clone();
                EventListener::new(&window, "pointermove", move |event| {
                    let Some(event) = event.dyn_ref::<DomPointerEvent>() else {
                        return;
                    };
                    let Some((x, pct)) = track_position(&track_ref, f64::from(event.client_x()))
                    else {
                        return;
                    };
                    // Tooltip shows the snapped target, not the value after
                    // clamping against the sibling handle.
                    let raw = domain.value_at_percent(pct);
                    dispatch.dispatch(RangeOp::DragTo(which, pct));
                    tooltip.set(Some(Tooltip {
                        handle: which,
                        left: x,
                        value: raw,
                    }));
                })
            };
            let on_up = {
                let drag = drag.clone();
                let tooltip = tooltip.clone();
                EventListener::new(&window, "pointerup", move |_| {
                    drag.borrow_mut().take();
                    tooltip.set(None);
                })
            };
            *drag.borrow_mut() = Some(DragSession {
                _listeners: [on_move, on_up],
            });
        })
    };

    let on_key_down = {
        let dispatch = state.dispatcher();
        Callback::from(move |(event, which): (KeyboardEvent, Handle)| {
            let op = match event.key().as_str() {
                "ArrowRight" => RangeOp::Step(which, 1),
                "ArrowLeft" => RangeOp::Step(which, -1),
                "PageUp" => RangeOp::Step(which, PAGE_STEP),
                "PageDown" => RangeOp::Step(which, -PAGE_STEP),
                "Home" => RangeOp::Jump(which, Boundary::Start),
                "End" => RangeOp::Jump(which, Boundary::End),
                _ => return,
            };
            event.prevent_default();
            dispatch.dispatch(op);
        })
    };

    let show_handle_tooltip = {
        let track_ref = track_ref.clone();
        let tooltip = tooltip.clone();
        let state = state.clone();
        Callback::from(move |which: Handle| {
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let width = track.get_bounding_client_rect().width();
            let value = state.handle_value(which);
            tooltip.set(Some(Tooltip {
                handle: which,
                left: width * state.domain().percent_of(value) / 100.0,
                value,
            }));
        })
    };

    let hide_tooltip = {
        let tooltip = tooltip.clone();
        Callback::from(move |_: MouseEvent| tooltip.set(None))
    };

    // Label commits close the editor only when the text parses; otherwise
    // the field stays open for correction and the selection is untouched.
    let commit_min = {
        let dispatch = state.dispatcher();
        let close = min_editor.close.clone();
        Callback::from(move |text: String| {
            if parse_label_value(&text).is_some() {
                close.emit(());
            }
            dispatch.dispatch(RangeOp::SubmitLabel(Handle::Min, text));
        })
    };
    let commit_max = {
        let dispatch = state.dispatcher();
        let close = max_editor.close.clone();
        Callback::from(move |text: String| {
            if parse_label_value(&text).is_some() {
                close.emit(());
            }
            dispatch.dispatch(RangeOp::SubmitLabel(Handle::Max, text));
        })
    };

    let value = state.value();
    let domain = state.domain();
    let (lo, hi) = (domain.lo(), domain.hi());
    let currency = props.currency.as_deref();
    let min_pct = domain.percent_of(value.min);
    let max_pct = domain.percent_of(value.max);

    let label_for = |which: Handle, editor: &crate::hooks::LabelEditor, commit: &Callback<String>| {
        let current = match which {
            Handle::Min => value.min,
            Handle::Max => value.max,
        };
        if domain.is_fixed() {
            html! { <span class="label">{ format_value(current, currency) }</span> }
        } else if editor.editing {
            let onblur = {
                let commit = commit.clone();
                let text = editor.text.clone();
                Callback::from(move |_: FocusEvent| commit.emit(text.clone()))
            };
            let onkeydown = {
                let commit = commit.clone();
                let text = editor.text.clone();
                Callback::from(move |e: KeyboardEvent| {
                    if e.key() == "Enter" {
                        commit.emit(text.clone());
                    }
                })
            };
            html! {
                <input
                    ref={editor.input_ref.clone()}
                    class="label-input"
                    value={editor.text.clone()}
                    oninput={editor.on_text_input.clone()}
                    {onblur}
                    {onkeydown}
                />
            }
        } else {
            let onclick = {
                let open = editor.open.clone();
                let seed = format_value(current, None);
                Callback::from(move |_: MouseEvent| open.emit(seed.clone()))
            };
            html! {
                <button class="label clickable" {onclick}>
                    { format_value(current, currency) }
                </button>
            }
        }
    };

    html! {
        <div class={classes!("range-container", props.class.clone())}>
            <div class="label-container">
                { label_for(Handle::Min, &min_editor, &commit_min) }
            </div>

            <div ref={track_ref.clone()} class="track">
                <div
                    class="range-fill"
                    style={format!("left: {min_pct}%; width: {}%", max_pct - min_pct)}
                />

                <RangeHandle
                    which={Handle::Min}
                    label="Minimum value"
                    lo={lo}
                    hi={hi}
                    value={value.min}
                    value_text={format_value(value.min, currency)}
                    percent={min_pct}
                    onpointerdown={start_drag.reform(|e: PointerEvent| (e, Handle::Min))}
                    onkeydown={on_key_down.reform(|e: KeyboardEvent| (e, Handle::Min))}
                    onmouseenter={show_handle_tooltip.reform(|_: MouseEvent| Handle::Min)}
                    onmouseleave={hide_tooltip.clone()}
                />
                <RangeHandle
                    which={Handle::Max}
                    label="Maximum value"
                    lo={lo}
                    hi={hi}
                    value={value.max}
                    value_text={format_value(value.max, currency)}
                    percent={max_pct}
                    onpointerdown={start_drag.reform(|e: PointerEvent| (e, Handle::Max))}
                    onkeydown={on_key_down.reform(|e: KeyboardEvent| (e, Handle::Max))}
                    onmouseenter={show_handle_tooltip.reform(|_: MouseEvent| Handle::Max)}
                    onmouseleave={hide_tooltip.clone()}
                />

                { if let Some(tip) = *tooltip {
                    let side = match tip.handle {
                        Handle::Min => "tooltip-min",
                        Handle::Max => "tooltip-max",
                    };
                    let text = match currency {
                        Some(suffix) => format!("{:.2}{suffix}", tip.value),
                        None => format!("{}", tip.value.round()),
                    };
                    html! {
                        <div
                            class={classes!("tooltip", side)}
                            style={format!("left: {}px", tip.left)}
                            aria-hidden="true"
                        >
                            { text }
                        </div>
                    }
                } else {
                    html! {}
                } }
            </div>

            <div class="label-container">
                { label_for(Handle::Max, &max_editor, &commit_max) }
            </div>

            { if domain.is_fixed() {
                html! {
                    <div class="ticks">
                        { for domain.fixed_values().iter().map(|&v| html! {
                            <div class="tick" style={format!("left: {}%", domain.percent_of(v))}>
                                <span>{ format_value(v, currency) }</span>
                            </div>
                        }) }
                    </div>
                }
            } else {
                html! {}
            } }
        </div>
    }
}
