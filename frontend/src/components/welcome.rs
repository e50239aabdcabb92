use crate::auth::use_auth;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn WelcomePage() -> impl IntoView {
    let auth = use_auth();
    let signed_in = move || auth.state.with(|s| s.is_authenticated);

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-5xl font-bold">"Casebook"</h1>
                    <p>"集中管理案件记录：创建、检索、更新。"</p>
                    <Show
                        when=signed_in
                        fallback=|| view! {
                            <div class="flex gap-2 justify-center">
                                <Link to="/login" class="btn btn-primary">"登录"</Link>
                                <Link to="/register" class="btn btn-outline">"注册"</Link>
                            </div>
                        }
                    >
                        <Link to="/home" class="btn btn-primary">"进入案件列表"</Link>
                    </Show>
                </div>
            </div>
        </div>
    }
}
