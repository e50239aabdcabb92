use crate::auth::{login, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let (user, pass) = (username.get_untracked(), password.get_untracked());
        if user.is_empty() || pass.is_empty() {
            set_error_msg.set(Some("请填写所有字段".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match login(&auth, user, pass).await {
                Ok(_) if auth.state.with_untracked(|s| s.is_authenticated) => {
                    router.navigate("/home");
                }
                Ok(_) => set_error_msg.set(Some("服务端未返回 token".to_string())),
                Err(e) => set_error_msg.set(Some(e.message)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"登录"</h1>
                    <p class="text-base-content/70">"使用您的账号访问案件库"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="login">
                                <span class="label-text">"用户名"</span>
                            </label>
                            <input
                                id="login"
                                type="text"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "登录中..." }.into_any()
                                } else {
                                    "登录".into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "还没有账号？ " <Link to="/register" class="link link-primary">"注册"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
