use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Holds the state and callbacks for one editable range label.
pub struct LabelEditor {
    /// Whether the label is currently showing its text input.
    pub editing: bool,
    /// The current text content of the edit field.
    pub text: String,
    /// Ref to the edit field, focused automatically when editing opens.
    pub input_ref: NodeRef,
    /// Callback for the edit field's `oninput` event. Updates the text state.
    pub on_text_input: Callback<InputEvent>,
    /// Opens edit mode, seeding the field with the given text.
    pub open: Callback<String>,
    /// Leaves edit mode without touching the selection.
    pub close: Callback<()>,
}

/// Custom hook managing the edit-mode lifecycle of a range label: the
/// editing flag, the text buffer, and focusing the input once it renders.
///
/// Committing the text is the caller's concern; parse failures leave edit
/// mode open so the user can correct the text.
#[hook]
pub fn use_label_editor() -> LabelEditor {
    let editing = use_state(|| false);
    let text = use_state(String::new);
    let input_ref = use_node_ref();

    let on_text_input = {
        let text_setter = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let open = {
        let editing = editing.clone();
        let text_setter = text.clone();
        Callback::from(move |seed: String| {
            text_setter.set(seed);
            editing.set(true);
        })
    };

    let close = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(false))
    };

    // Focus the input after the render that put it in the tree.
    {
        let input_ref = input_ref.clone();
        use_effect_with(*editing, move |active| {
            if *active {
                if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
            || ()
        });
    }

    LabelEditor {
        editing: *editing,
        text: (*text).clone(),
        input_ref,
        on_text_input,
        open,
        close,
    }
}
