//! New record form

use leptos::*;

use crate::form::FormField;
use super::state::use_dashboard_context;

/// Submission form bound to the dashboard's form state.
///
/// `submit` runs validation and the create call; see [`super::actions::submit_record`].
#[component]
pub fn RecordForm(submit: Action<(), ()>) -> impl IntoView {
    let ctx = use_dashboard_context();
    let form = ctx.form;

    let fields = FormField::ALL
        .into_iter()
        .map(move |field| {
            view! {
                <label class="form-field">
                    <span class="form-label">{field.label()}</span>
                    <input
                        type=field.input_type()
                        name=field.name()
                        step=field.step()
                        prop:value=move || form.with(|state| state.get(field).to_string())
                        on:input=move |e| form.update(|state| state.on_field_change(field, event_target_value(&e)))
                    />
                </label>
            }
        })
        .collect_view();

    view! {
        <form
            class="record-form"
            on:submit=move |e| {
                e.prevent_default();
                submit.dispatch(());
            }
        >
            <h2>"Add Telemetry"</h2>
            {move || ctx.form_error.get().map(|err| view! {
                <div class="form-error">{err.to_string()}</div>
            })}
            <div class="form-grid">{fields}</div>
            <button type="submit" class="submit-btn" disabled=move || ctx.submitting.get()>
                {move || if ctx.submitting.get() { "Submitting..." } else { "Submit" }}
            </button>
        </form>
    }
}
