use crate::api::{describe_error, use_cases};
use crate::components::case_form::{CaseForm, CaseFormState};
use casebook_shared::{Case, CaseDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HomePage() -> impl IntoView {
    let cases_api = StoredValue::new(use_cases());

    let (cases, set_cases) = signal(Vec::<Case>::new());
    let (loading, set_loading) = signal(true);
    let (query, set_query) = signal(String::new());
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // 消息内容, 是否出错
    let form = CaseFormState::new();

    let load_cases = move || {
        let api = cases_api.get_value();
        set_loading.set(true);
        spawn_local(async move {
            match api.get_case_list().await {
                Ok(data) => set_cases.set(data),
                Err(e) => set_notification.set(Some((describe_error("加载案件", &e), true))),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load_cases();

    let run_search = move || {
        let q = query.get_untracked();
        if q.trim().is_empty() {
            load_cases();
            return;
        }
        let api = cases_api.get_value();
        set_loading.set(true);
        spawn_local(async move {
            match api.search_cases(&q).await {
                Ok(found) => set_cases.set(found.cases),
                Err(e) => set_notification.set(Some((describe_error("搜索", &e), true))),
            }
            set_loading.set(false);
        });
    };

    let handle_submit = move |(editing, draft): (Option<String>, CaseDraft)| {
        let api = cases_api.get_value();
        spawn_local(async move {
            let outcome = match editing {
                Some(id) => api
                    .update_case(&id, draft)
                    .await
                    .map(|res| res.message.unwrap_or_else(|| "案件已更新".to_string()))
                    .map_err(|e| describe_error("更新案件", &e)),
                None => api
                    .create_case(draft)
                    .await
                    .map(|_| "案件已创建".to_string())
                    .map_err(|e| describe_error("创建案件", &e)),
            };
            match outcome {
                Ok(msg) => {
                    set_notification.set(Some((msg, false)));
                    form.reset();
                    load_cases();
                }
                Err(msg) => set_notification.set(Some((msg, true))),
            }
        });
    };

    let handle_delete = move |id: String| {
        let api = cases_api.get_value();
        spawn_local(async move {
            match api.delete_case(&id).await {
                Ok(_) => {
                    set_notification.set(Some(("案件已删除".to_string(), false)));
                    set_cases.update(|list| list.retain(|c| c.id != id));
                }
                Err(e) => set_notification.set(Some((describe_error("删除案件", &e), true))),
            }
        });
    };

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.with(Option::is_some) {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let total_cases = move || cases.with(Vec::len);

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            // 通知提示框
            <Show when=move || notification.with(Option::is_some)>
                <div class="toast toast-top toast-end z-50">
                    <div class=move || {
                        if notification.with(|n| n.as_ref().is_some_and(|(_, is_err)| *is_err)) {
                            "alert alert-error shadow-lg"
                        } else {
                            "alert alert-success shadow-lg"
                        }
                    }>
                        <span>{move || notification.with(|n| n.as_ref().map(|(msg, _)| msg.clone()).unwrap_or_default())}</span>
                    </div>
                </div>
            </Show>

            <div class="stats shadow w-full bg-base-100">
                <div class="stat">
                    <div class="stat-title">"案件总数"</div>
                    <div class="stat-value text-primary">{total_cases}</div>
                </div>
            </div>

            <CaseForm state=form on_submit=handle_submit />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <form
                        class="flex items-center gap-2 p-6 pb-2"
                        on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                            ev.prevent_default();
                            run_search();
                        }
                    >
                        <input
                            type="search"
                            placeholder="搜索案件"
                            on:input=move |ev| set_query.set(event_target_value(&ev))
                            prop:value=query
                            class="input input-bordered w-full"
                        />
                        <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                            "搜索"
                        </button>
                    </form>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"标题"</th>
                                    <th>"状态"</th>
                                    <th class="hidden md:table-cell">"更新时间"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || total_cases() == 0 && !loading.get()>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            "暂无案件。"
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && total_cases() == 0>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span> " 加载中..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || cases.get()
                                    key=|c| c.id.clone()
                                    children=move |case| {
                                        let id = case.id.clone();
                                        let editable = case.clone();
                                        let updated = case
                                            .updated_at
                                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                                            .unwrap_or_default();
                                        view! {
                                            <tr>
                                                <td>
                                                    <div class="font-bold">{case.title}</div>
                                                    <div class="text-sm opacity-60">{case.description.unwrap_or_default()}</div>
                                                </td>
                                                <td>
                                                    <div class="badge badge-accent badge-outline">
                                                        {case.status.unwrap_or_else(|| "-".to_string())}
                                                    </div>
                                                </td>
                                                <td class="hidden md:table-cell font-mono text-xs opacity-50">{updated}</td>
                                                <td class="flex gap-2 justify-end">
                                                    <button class="btn btn-ghost btn-sm" on:click=move |_| form.load(&editable)>
                                                        "编辑"
                                                    </button>
                                                    <button class="btn btn-ghost btn-sm text-error" on:click=move |_| handle_delete(id.clone())>
                                                        "删除"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
