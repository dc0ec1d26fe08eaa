use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_ui::{
    Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, FormSelect, Input,
};

/// Register page. The role select mirrors what the backend accepts;
/// account approval policy is the backend's concern.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| "driver".to_string());
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Redirect to dashboard if already authenticated
    if auth.is_authenticated() {
        navigator().push(Route::Dashboard {});
    }

    let handle_register = move |evt: FormEvent| async move {
        evt.prevent_default();
        loading.set(true);
        error_msg.set(None);

        match server::api::register(name(), email(), password(), Some(role())).await {
            Ok(user) => {
                auth.set_user(user);
                navigator().push(Route::Dashboard {});
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
                    CardTitle { "Create Account" }
                    CardDescription { "Join the fleet dashboard" }
                }

                CardContent {
                    if let Some(err) = error_msg() {
                        div { class: "auth-error", "{err}" }
                    }

                    form { onsubmit: handle_register,
                        div { class: "auth-field",
                            Input {
                                label: "Name",
                                placeholder: "Full name",
                                required: true,
                                value: name(),
                                on_input: move |e: FormEvent| name.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Email",
                                input_type: "email",
                                placeholder: "you@example.com",
                                required: true,
                                value: email(),
                                on_input: move |e: FormEvent| email.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            Input {
                                label: "Password",
                                input_type: "password",
                                placeholder: "At least 8 characters",
                                required: true,
                                value: password(),
                                on_input: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        div { class: "auth-field",
                            FormSelect {
                                label: "Role",
                                value: role(),
                                onchange: move |e: Event<FormData>| role.set(e.value()),
                                option { value: "driver", "Driver" }
                                option { value: "dispatcher", "Dispatcher" }
                                option { value: "admin", "Admin" }
                            }
                        }
                        button {
                            r#type: "submit",
                            class: "auth-submit button",
                            disabled: loading(),
                            if loading() { "Creating account..." } else { "Create Account" }
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-link",
                        "Already have an account? "
                        Link { to: Route::Login { redirect: None }, "Sign in" }
                    }
                }
            }
        }
    }
}
