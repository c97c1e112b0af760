use dioxus::prelude::*;
use survey::fields::{parse_attachment, submit};
use survey::{Attachment, ValidationError};

use crate::icons::FaPaperclip;
use crate::Icon;

#[component]
pub fn AttachmentSelector(on_select: EventHandler<Attachment>) -> Element {
    let mut choice = use_signal(String::new);
    let mut error = use_signal(|| Option::<ValidationError>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(submit(parse_attachment(&choice()), |a| on_select.call(a)));
    };

    rsx! {
        form {
            class: "field-form",
            onsubmit: handle_submit,
            label {
                r#for: "attachment",
                "Select Primary Attachment"
            }
            div {
                class: "field-input",
                Icon { icon: FaPaperclip, width: 16, height: 16 }
                select {
                    id: "attachment",
                    class: if error().is_some() { "invalid" } else { "" },
                    value: choice(),
                    onchange: move |evt: FormEvent| choice.set(evt.value()),
                    option { value: "", disabled: true, selected: choice().is_empty(), "-- Select Attachment --" }
                    for attachment in Attachment::ALL {
                        option { value: attachment.label(), "{attachment}" }
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "field-error", "{err}" }
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                "Confirm Attachment"
            }
        }
    }
}
