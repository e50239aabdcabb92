use crate::auth::use_auth;
use casebook_shared::UserProfile;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 管理页：展示当前用户资料
#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = use_auth();
    let (profile, set_profile) = signal(Option::<UserProfile>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let session = auth.session();
    spawn_local(async move {
        match session.users().get_user_data().await {
            Ok(data) => set_profile.set(Some(data)),
            Err(e) => set_error_msg.set(Some(e.message)),
        }
    });

    let field = move |pick: fn(&UserProfile) -> Option<String>| {
        move || {
            profile
                .with(|p| p.as_ref().and_then(pick))
                .unwrap_or_else(|| "-".to_string())
        }
    };

    view! {
        <div class="max-w-3xl mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title">"管理面板"</h2>
                    <Show when=move || error_msg.with(Option::is_some)>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                    <Show
                        when=move || profile.with(Option::is_some)
                        fallback=|| view! { <span class="loading loading-spinner loading-md"></span> }
                    >
                        <dl class="grid grid-cols-2 gap-2">
                            <dt class="font-semibold">"用户名"</dt>
                            <dd>{field(|p| p.login.clone())}</dd>
                            <dt class="font-semibold">"邮箱"</dt>
                            <dd>{field(|p| p.email.clone())}</dd>
                            <dt class="font-semibold">"角色"</dt>
                            <dd><span class="badge badge-primary">{field(|p| p.role.clone())}</span></dd>
                        </dl>
                    </Show>
                </div>
            </div>
        </div>
    }
}
