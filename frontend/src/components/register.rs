use crate::auth::{register, use_auth};
use crate::web::router::{Link, use_router};
use casebook_shared::NewUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = NewUser {
            login: username.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            ..NewUser::default()
        };
        if user.login.is_empty() || user.email.is_empty() || user.password.is_empty() {
            set_error_msg.set(Some("请填写所有字段".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            match register(&auth, user).await {
                Ok(res) => {
                    log::info!("registered: {}", res.message.unwrap_or_default());
                    router.navigate("/login");
                }
                Err(e) => set_error_msg.set(Some(e.message)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold mb-4">"注册"</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.with(Option::is_some)>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg_login">
                                <span class="label-text">"用户名"</span>
                            </label>
                            <input id="reg_login" type="text" required
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_email">
                                <span class="label-text">"邮箱"</span>
                            </label>
                            <input id="reg_email" type="email" required
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg_password">
                                <span class="label-text">"密码"</span>
                            </label>
                            <input id="reg_password" type="password" required
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "提交中..." } else { "注册" }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            "已有账号？ " <Link to="/login" class="link link-primary">"登录"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
