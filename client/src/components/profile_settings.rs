//! Profile tab: edit the signed-in user's details.
//!
//! The form is prefilled from the session user when the tab mounts. Picking a
//! new picture reads it into a `data:` URL held in the form until saved. A
//! save sends the whole form and replaces the session user with the backend's
//! canonical copy, so the sidebar updates without a refetch.

#[cfg(test)]
#[path = "profile_settings_test.rs"]
mod profile_settings_test;

use campus::{AuthState, ProfileUpdate};
use leptos::prelude::*;

use crate::components::sidebar::avatar_src;
use crate::state::auth::AppSession;

pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";
pub const IMAGE_SELECTED: &str = "Profile picture updated! Click Save Changes to apply.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    Email,
    Department,
    Year,
    StudentId,
    PhoneNumber,
}

impl ProfileField {
    pub const ALL: [Self; 6] =
        [Self::FullName, Self::Email, Self::Department, Self::Year, Self::StudentId, Self::PhoneNumber];

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Department => "Department",
            Self::Year => "Year",
            Self::StudentId => "Student ID",
            Self::PhoneNumber => "Phone number",
        }
    }

    fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::PhoneNumber => "tel",
            _ => "text",
        }
    }

    pub fn value(self, form: &ProfileUpdate) -> &str {
        match self {
            Self::FullName => &form.full_name,
            Self::Email => &form.email,
            Self::Department => &form.department,
            Self::Year => &form.year,
            Self::StudentId => &form.student_id,
            Self::PhoneNumber => &form.phone_number,
        }
    }

    pub fn set(self, form: &mut ProfileUpdate, value: String) {
        let slot = match self {
            Self::FullName => &mut form.full_name,
            Self::Email => &mut form.email,
            Self::Department => &mut form.department,
            Self::Year => &mut form.year,
            Self::StudentId => &mut form.student_id,
            Self::PhoneNumber => &mut form.phone_number,
        };
        *slot = value;
    }
}

/// Outcome line shown under the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    ImageSelected,
    Saved,
    Failed,
}

impl SaveStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::ImageSelected => IMAGE_SELECTED,
            Self::Saved => PROFILE_UPDATED,
            Self::Failed => PROFILE_UPDATE_FAILED,
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Failed => "error-message",
            _ => "form-success",
        }
    }
}

/// Store a freshly read picture in the form; the old one is replaced.
pub fn select_image(form: &mut ProfileUpdate, data_url: String) -> SaveStatus {
    form.profile_image = Some(data_url);
    SaveStatus::ImageSelected
}

/// Read the first picked file as a `data:` URL and hand it to `on_load`.
#[cfg(feature = "csr")]
fn read_picked_image(ev: &leptos::ev::Event, on_load: impl Fn(String) + 'static) {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
        return;
    };
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return;
    };
    let Ok(reader) = web_sys::FileReader::new() else {
        log::warn!("FileReader unavailable; profile image not loaded");
        return;
    };

    let holder: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::default();
    let holder_for_cb = Rc::clone(&holder);
    let reader_for_cb = reader.clone();
    let cb = Closure::wrap(Box::new(move || {
        match reader_for_cb.result().ok().and_then(|result| result.as_string()) {
            Some(data_url) => on_load(data_url),
            None => log::warn!("profile image did not load as a data URL"),
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut()>);

    reader.set_onload(Some(cb.as_ref().unchecked_ref()));
    match reader.read_as_data_url(&file) {
        Ok(()) => *holder.borrow_mut() = Some(cb),
        Err(e) => log::warn!("failed to read profile image: {e:?}"),
    }
}

#[cfg(not(feature = "csr"))]
fn read_picked_image(_ev: &leptos::ev::Event, _on_load: impl Fn(String) + 'static) {}

#[component]
pub fn ProfileSettings() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<AppSession>();

    let initial = auth.with_untracked(|a| a.user.as_ref().map(ProfileUpdate::from_user).unwrap_or_default());
    let form = RwSignal::new(initial);
    let status = RwSignal::new(None::<SaveStatus>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        status.set(None);
        let update = form.get_untracked();
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().update_profile(&update).await {
                Ok(user) => {
                    session.update_user(user);
                    status.set(Some(SaveStatus::Saved));
                }
                Err(e) => {
                    log::error!("{PROFILE_UPDATE_FAILED}: {e}");
                    status.set(Some(SaveStatus::Failed));
                }
            }
            busy.set(false);
        });
    };

    let on_image = move |ev: leptos::ev::Event| {
        read_picked_image(&ev, move |data_url| {
            let picked = form.try_update(|f| select_image(f, data_url));
            status.set(picked);
        });
    };

    view! {
        <section class="student-profile-settings">
            <h2>"Profile Settings"</h2>
            <form class="profile-form" on:submit=on_submit>
                <div class="profile-image-section">
                    <img
                        class="profile-image-preview"
                        src=move || form.with(|f| avatar_src(f.profile_image.as_deref()))
                        alt="Profile"
                    />
                    <label class="profile-image-upload">
                        "Change photo"
                        <input type="file" accept="image/*" on:change=on_image/>
                    </label>
                </div>

                {ProfileField::ALL
                    .into_iter()
                    .map(|field| {
                        view! {
                            <div class="form-group">
                                <label>
                                    {field.label()}
                                    <input
                                        type=field.input_type()
                                        prop:value=move || form.with(|f| field.value(f).to_owned())
                                        on:input=move |ev| {
                                            let value = event_target_value(&ev);
                                            form.update(|f| field.set(f, value));
                                        }
                                    />
                                </label>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()}

                <button class="auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Saving..." } else { "Save Changes" }}
                </button>
                {move || status.get().map(|s| view! { <p class=s.class()>{s.message()}</p> })}
            </form>
        </section>
    }
}
