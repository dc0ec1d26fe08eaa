use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, Input};

/// Login page with email/password.
/// Accepts an optional `redirect` query param — after login, navigates
/// there instead of Dashboard (set by the route guard when an
/// unauthenticated navigation was intercepted).
#[component]
pub fn Login(redirect: Option<String>) -> Element {
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Store redirect in a signal so closures can read it without moving
    // ownership
    let redirect_target = use_signal(move || redirect);

    // Navigate to the redirect target or Dashboard
    let go_to_destination = move || {
        if let Some(ref path) = *redirect_target.read() {
            navigator().push(NavigationTarget::<Route>::External(path.clone()));
        } else {
            navigator().push(Route::Dashboard {});
        }
    };

    // Redirect to dashboard if already authenticated
    if auth.is_authenticated() {
        go_to_destination();
    }

    let handle_login = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);

        match server::api::login(email(), password()).await {
            Ok(user) => {
                auth.set_user(user);
                go_to_destination();
            }
            Err(e) => {
                error_msg.set(Some(shared_types::AppError::friendly_message(
                    &e.to_string(),
                )));
            }
        }
        loading.set(false);
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card {
                class: "auth-card",

                CardHeader {
                    CardTitle { "Sign In" }
                    CardDescription { "Enter your credentials to access the fleet dashboard" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", "{err}" }
                    }

                    form { onsubmit: handle_login,
                        div { class: "auth-field",
                            Input {
                                label: "Email",
                                input_type: "email",
                                placeholder: "driver@example.com",
                                required: true,
                                value: email(),
                                on_input: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Password",
                                input_type: "password",
                                placeholder: "Enter your password",
                                required: true,
                                value: password(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            disabled: loading(),
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-link",
                        "Don't have an account? "
                        Link { to: Route::Register {}, "Create one" }
                    }
                }
            }
        }
    }
}
