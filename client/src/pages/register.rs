//! Registration page; a successful sign-up is also a sign-in.

use campus::session::redirect_target;
use campus::{AuthOutcome, AuthState};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AppSession;
use crate::util::validation::{Field, FieldErrors, RegisterForm, validate_register};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let errors = RwSignal::new(FieldErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if let Some(user) = auth.get().user {
            navigate(&redirect_target(&user, None), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let found = validate_register(&current);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        busy.set(true);
        form_error.set(None);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            if let AuthOutcome::Failure { message } = session.register(&current.to_request()).await {
                form_error.set(Some(message));
            }
            busy.set(false);
        });
    };

    let edit = move |field: Field, apply: fn(&mut RegisterForm, String)| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            form.update(|f| apply(f, value));
            errors.update(|e| e.clear(field));
        }
    };
    let field_error = move |field: Field| {
        move || errors.get().get(field).map(|message| view! { <span class="field-error">{message}</span> })
    };

    view! {
        <div class="auth-page">
            <div class="auth-box register-box">
                <div class="form-header register-header">
                    <h2>"Create an Account"</h2>
                    <p>"Join Campus Events to register for college events"</p>
                </div>
                <form on:submit=on_submit novalidate>
                    <Show when=move || form_error.get().is_some()>
                        <span class="error-message form-error">{move || form_error.get().unwrap_or_default()}</span>
                    </Show>

                    <div class="form-group">
                        <label for="fullName">"Full name"</label>
                        <input
                            id="fullName"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || form.with(|f| f.full_name.clone())
                            on:input=edit(Field::FullName, |f, v| f.full_name = v)
                        />
                        {field_error(Field::FullName)}
                    </div>

                    <div class="form-group">
                        <label for="email">"Email address"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="Email address"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=edit(Field::Email, |f, v| f.email = v)
                        />
                        {field_error(Field::Email)}
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            placeholder="Password"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=edit(Field::Password, |f, v| f.password = v)
                        />
                        {field_error(Field::Password)}
                    </div>

                    <div class="form-group">
                        <label for="confirmPassword">"Confirm password"</label>
                        <input
                            id="confirmPassword"
                            type="password"
                            placeholder="Confirm password"
                            prop:value=move || form.with(|f| f.confirm_password.clone())
                            on:input=edit(Field::ConfirmPassword, |f, v| f.confirm_password = v)
                        />
                        {field_error(Field::ConfirmPassword)}
                    </div>

                    <div class="form-group form-group--checkbox">
                        <label>
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.accept_terms)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    form.update(|f| f.accept_terms = checked);
                                    errors.update(|e| e.clear(Field::Terms));
                                }
                            />
                            " I accept the terms and conditions"
                        </label>
                        {field_error(Field::Terms)}
                    </div>

                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Already have an account? "
                    <A href="/login">"Login"</A>
                </p>
            </div>
        </div>
    }
}
