use crate::auth::{logout, use_auth};
use crate::theme::use_theme;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = use_auth();
    let theme = use_theme();

    let signed_in = move || auth.state.with(|s| s.is_authenticated);
    let is_admin = move || auth.state.with(|s| s.is_authenticated && s.is_admin());

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1 gap-2">
                <Link to="/" class="btn btn-ghost text-xl">"Casebook"</Link>
                <Link to="/home" class="btn btn-ghost">"案件"</Link>
                <Show when=is_admin>
                    <Link to="/admin" class="btn btn-ghost">"管理"</Link>
                </Show>
            </div>
            <div class="flex-none gap-2">
                <button class="btn btn-ghost btn-circle" on:click=move |_| theme.toggle_theme()>
                    {move || if theme.is_dark.get() { "☀" } else { "☾" }}
                </button>
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <Link to="/login" class="btn btn-primary">"登录"</Link>
                        <Link to="/register" class="btn btn-outline">"注册"</Link>
                    }
                >
                    <button on:click=move |_| logout(&auth) class="btn btn-outline btn-error">
                        "退出登录"
                    </button>
                </Show>
            </div>
        </div>
    }
}
