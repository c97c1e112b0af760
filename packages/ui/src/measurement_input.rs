use dioxus::prelude::*;
use survey::fields::{parse_measurement, submit};
use survey::{Measurement, ValidationError};

use crate::icons::FaRulerVertical;
use crate::Icon;

/// Pole height entry. Commits through `on_measurement` only when the value parses.
///
/// The typed text stays in the field after a successful submit.
#[component]
pub fn MeasurementInput(on_measurement: EventHandler<Measurement>) -> Element {
    let mut input = use_signal(String::new);
    let mut error = use_signal(|| Option::<ValidationError>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(submit(parse_measurement(&input()), |m| on_measurement.call(m)));
    };

    rsx! {
        form {
            class: "field-form",
            onsubmit: handle_submit,
            label {
                r#for: "measurement",
                "Pole Height Measurement (meters)"
            }
            div {
                class: "field-input",
                Icon { icon: FaRulerVertical, width: 16, height: 16 }
                input {
                    id: "measurement",
                    class: if error().is_some() { "invalid" } else { "" },
                    r#type: "number",
                    step: "0.01",
                    placeholder: "e.g., 12.5",
                    value: input(),
                    oninput: move |evt: FormEvent| input.set(evt.value()),
                }
            }
            if let Some(err) = error() {
                p { class: "field-error", "{err}" }
            }
            button {
                r#type: "submit",
                class: "btn-primary",
                "Submit Measurement"
            }
        }
    }
}
