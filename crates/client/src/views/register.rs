//! Registration form.

use chirp_shared::RegisterRequest;
use dioxus::prelude::*;

use crate::session::SessionContext;
use crate::Route;

#[component]
pub fn Register() -> Element {
    let mut session = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut first_name = use_signal(String::new);
    let mut last_name = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut loading = use_signal(|| false);

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

        let request = RegisterRequest {
            username: username.peek().trim().to_string(),
            email: email.peek().trim().to_string(),
            password: password.peek().clone(),
            first_name: first_name.peek().trim().to_string(),
            last_name: last_name.peek().trim().to_string(),
        };
        let api = session.auth();
        spawn(async move {
            match api.register(&request).await {
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
                    h1 { class: "text-3xl font-bold text-gray-900", "Create Account" }
                    p { class: "text-gray-600 mt-2", "Join the conversation" }
                }

                div { class: "bg-white rounded-2xl shadow-xl p-8",
                    form { onsubmit: submit, class: "space-y-4",
                        if let Some(message) = error.read().as_ref() {
                            div { class: "bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded-lg text-sm",
                                "{message}"
                            }
                        }

                        div { class: "grid grid-cols-2 gap-3",
                            input {
                                class: "px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                                r#type: "text",
                                placeholder: "First name",
                                required: true,
                                value: "{first_name}",
                                oninput: move |e| first_name.set(e.value()),
                            }
                            input {
                                class: "px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                                r#type: "text",
                                placeholder: "Last name",
                                required: true,
                                value: "{last_name}",
                                oninput: move |e| last_name.set(e.value()),
                            }
                        }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                            r#type: "text",
                            placeholder: "Username",
                            required: true,
                            value: "{username}",
                            oninput: move |e| username.set(e.value()),
                        }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                            r#type: "email",
                            placeholder: "Email",
                            required: true,
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                        input {
                            class: "w-full px-4 py-3 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500 focus:border-transparent transition",
                            r#type: "password",
                            placeholder: "Password",
                            required: true,
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                        }

                        button {
                            r#type: "submit",
                            disabled: loading(),
                            class: "w-full bg-blue-600 hover:bg-blue-700 text-white font-medium py-3 rounded-lg transition disabled:opacity-50 disabled:cursor-not-allowed",
                            if loading() { "Creating account..." } else { "Sign Up" }
                        }
                    }

                    div { class: "mt-6 text-center",
                        p { class: "text-gray-600",
                            "Already have an account? "
                            Link {
                                to: Route::Login {},
                                class: "text-blue-600 hover:text-blue-700 font-medium",
                                "Sign in"
                            }
                        }
                    }
                }
            }
        }
    }
}
