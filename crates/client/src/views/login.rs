//! Login form.

use dioxus::prelude::*;

use crate::session::SessionContext;
use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut session = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

    // Already signed in: straight to the feed.
    use_effect(move || {
        if session.is_authenticated() {
            nav.replace(Route::Home {});
        }
    });

    let submit = move |e: Event<FormData>| {
        e.prevent_default();
        if loading() {
            return;
        }
        error.set(None);
        loading.set(true);

        let api = session.auth();
        let email_value = email.peek().clone();
        let password_value = password.peek().clone();
        spawn(async move {
            match api.login(&email_value, &password_value).await {
                Ok(payload) => {
                    session.log_in(payload);
                    nav.push(Route::Home {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div { class: "min-h-screen bg-gradient-to-br from-blue-50 to-slate-100 flex items-center justify-center p-4",
            div { class: "w-full max-w-md",
                div { class: "text-center mb-8",
                    h1 { class: "text-3xl font-bold text-gray-900", "Welcome Back" }
                    p { class: "text-gray-600 mt-2", "Sign in to continue to your account" }
                }

                div { class: "bg-white rounded-2xl shadow-xl p-8",
                    form { onsubmit: submit, class: "space-y-6",
                        if let Some(message) = error.read().as_ref() {
                            div { class: "bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-lg text-sm",
                                "{message}"
                            }
                        }

                        div {
                            label {
                                class: "block text-sm font-medium text-gray-700 mb-2",
                                r#for: "email",
                                "Email"
                            }
                            input {
                                id: "email",
                                class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                                r#type: "email",
                                placeholder: "Enter your email",
                                required: true,
                                value: "{email}",
                                oninput: move |e| email.set(e.value()),
                            }
                        }

                        div {
                            label {
                                class: "block text-sm font-medium text-gray-700 mb-2",
                                r#for: "password",
                                "Password"
                            }
                            input {
                                id: "password",
                                class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                                r#type: "password",
                                placeholder: "Enter your password",
                                required: true,
                                value: "{password}",
                                oninput: move |e| password.set(e.value()),
                            }
                        }

                        button {
                            r#type: "submit",
                            disabled: loading(),
                            class: "w-full bg-blue-600 hover:bg-blue-700 text-white font-medium py-3 rounded-lg transition disabled:opacity-50 disabled:cursor-not-allowed",
                            if loading() { "Signing in..." } else { "Sign In" }
                        }
                    }

                    div { class: "mt-6 text-center",
                        p { class: "text-gray-600",
                            "Don't have an account? "
                            Link {
                                to: Route::Register {},
                                class: "text-blue-600 hover:text-blue-700 font-medium",
                                "Sign up"
                            }
                        }
                    }
                }
            }
        }
    }
}
