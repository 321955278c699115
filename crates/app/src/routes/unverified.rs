use crate::routes::Route;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdMail;
use dioxus_free_icons::Icon;

/// Shown when sign-in was refused because the e-mail address is unconfirmed.
#[component]
pub fn Unverified() -> Element {
    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                div { class: "auth-icon", Icon::<LdMail> { icon: LdMail, width: 32, height: 32 } }
                h1 { class: "auth-title", "Confirm your e-mail" }
                p { class: "auth-description",
                    "Your account exists but its e-mail address has not been confirmed yet. "
                    "Follow the link in the confirmation message, then sign in again."
                }
                Link { to: Route::Login {}, class: "auth-link", "Back to sign in" }
            }
        }
    }
}
