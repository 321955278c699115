use crate::auth::use_auth;
use crate::guard::use_one_shot_redirect;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{landing_decision, Decision};
use shared_ui::{BackgroundImage, LoadingPlaceholder};

const CAMPUS: Asset = asset!("/assets/campus.svg");

/// Public entry point. Signed-in visitors continue to `/home`; anonymous
/// visitors see the welcome screen with a link to sign in.
#[component]
pub fn Landing() -> Element {
    let auth = use_auth();
    let decision = use_memo(move || landing_decision(&auth.session.read()));
    use_one_shot_redirect(decision);

    match decision() {
        Decision::Pending => rsx! { LoadingPlaceholder {} },
        Decision::Redirect(_) => rsx! {
            LoadingPlaceholder { message: "Redirecting...".to_string() }
        },
        Decision::Render => rsx! {
            BackgroundImage { src: CAMPUS.to_string(), class: "landing",
                div { class: "landing-hero",
                    h1 { class: "landing-title", "School Portal" }
                    p { class: "landing-subtitle",
                        "Records, schedules and reports for every school in the division."
                    }
                    Link { to: Route::Login {}, class: "button landing-cta", "Sign in" }
                }
            }
        },
    }
}
