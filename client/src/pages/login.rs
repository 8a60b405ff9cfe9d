//! Login page with email + password sign-in.

use campus::session::redirect_target;
use campus::{AuthOutcome, AuthState};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::state::auth::AppSession;
use crate::util::validation::{Field, FieldErrors, validate_login};

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();
    let navigate = use_navigate();
    let from = use_query_map().get_untracked().get("from");

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    // Signed-in visitors leave for their landing page; this also completes a
    // successful submit.
    Effect::new(move || {
        if let Some(user) = auth.get().user {
            let target = redirect_target(&user, from.as_deref());
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        let found = validate_login(&email_value, &password_value);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        busy.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            if let AuthOutcome::Failure { message } = session.login(&email_value, &password_value).await {
                server_error.set(Some(message));
            }
            busy.set(false);
        });
    };

    let field_error = move |field: Field| {
        move || errors.get().get(field).map(|message| view! { <span class="field-error">{message}</span> })
    };

    view! {
        <div class="auth-page">
            <div class="auth-box">
                <div class="form-header">
                    <h2>"Login to your account"</h2>
                </div>
                <form on:submit=on_submit novalidate>
                    <Show when=move || server_error.get().is_some()>
                        <div class="error-message">{move || server_error.get().unwrap_or_default()}</div>
                    </Show>

                    <div class="form-group">
                        <label for="email">"Email address"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="Email address"
                            class:input-error=move || errors.get().get(Field::Email).is_some()
                            prop:value=move || email.get()
                            on:input=move |ev| {
                                email.set(event_target_value(&ev));
                                errors.update(|e| e.clear(Field::Email));
                                server_error.set(None);
                            }
                        />
                        {field_error(Field::Email)}
                    </div>

                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            placeholder="Password"
                            class:input-error=move || errors.get().get(Field::Password).is_some()
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                errors.update(|e| e.clear(Field::Password));
                                server_error.set(None);
                            }
                        />
                        {field_error(Field::Password)}
                    </div>

                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-switch">
                    "Don't have an account? "
                    <A href="/register">"Register"</A>
                </p>
            </div>
        </div>
    }
}
