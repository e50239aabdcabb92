//! 案件表单
//!
//! 将零散的 signal 整合为 `CaseFormState`，负责：
//! - 数据的持有与重置
//! - 编辑时从已有案件回填
//! - 数据到 `CaseDraft` 的转换

use casebook_shared::{Case, CaseDraft};
use leptos::prelude::*;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct CaseFormState {
    pub title: RwSignal<String>,
    pub description: RwSignal<String>,
    pub status: RwSignal<String>,
    /// 正在编辑的案件 id，`None` 表示新建
    pub editing: RwSignal<Option<String>>,
}

impl CaseFormState {
    pub fn new() -> Self {
        Self {
            title: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            status: RwSignal::new(String::new()),
            editing: RwSignal::new(None),
        }
    }

    pub fn reset(&self) {
        self.title.set(String::new());
        self.description.set(String::new());
        self.status.set(String::new());
        self.editing.set(None);
    }

    /// 编辑已有案件
    pub fn load(&self, case: &Case) {
        self.title.set(case.title.clone());
        self.description
            .set(case.description.clone().unwrap_or_default());
        self.status.set(case.status.clone().unwrap_or_default());
        self.editing.set(Some(case.id.clone()));
    }

    /// 标题为空时返回 `None`；编辑时清空的字段以空串提交
    pub fn to_draft(&self) -> Option<CaseDraft> {
        CaseDraft::from_form(
            &self.title.get_untracked(),
            &self.description.get_untracked(),
            &self.status.get_untracked(),
            self.editing.with_untracked(Option::is_some),
        )
    }
}

impl Default for CaseFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 新建 / 编辑案件表单
#[component]
pub fn CaseForm(
    state: CaseFormState,
    /// 提交：(编辑中的 id, 草稿)
    #[prop(into)]
    on_submit: Callback<(Option<String>, CaseDraft)>,
) -> impl IntoView {
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match state.to_draft() {
            Some(draft) => {
                set_error_msg.set(None);
                on_submit.run((state.editing.get_untracked(), draft));
            }
            None => set_error_msg.set(Some("标题不能为空".to_string())),
        }
    };

    let is_editing = move || state.editing.with(Option::is_some);

    view! {
        <form class="card bg-base-100 shadow-xl" on:submit=submit>
            <div class="card-body gap-3">
                <h3 class="card-title">
                    {move || if is_editing() { "编辑案件" } else { "新建案件" }}
                </h3>

                <Show when=move || error_msg.with(Option::is_some)>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="form-control">
                    <label for="case_title" class="label">
                        <span class="label-text">"标题"</span>
                    </label>
                    <input id="case_title"
                        type="text"
                        placeholder="State v. Doe"
                        on:input=move |ev| state.title.set(event_target_value(&ev))
                        prop:value=move || state.title.get()
                        class="input input-bordered w-full"
                    />
                </div>

                <div class="form-control">
                    <label for="case_status" class="label">
                        <span class="label-text">"状态"</span>
                    </label>
                    <input id="case_status"
                        type="text"
                        placeholder="open"
                        on:input=move |ev| state.status.set(event_target_value(&ev))
                        prop:value=move || state.status.get()
                        class="input input-bordered w-full"
                    />
                </div>

                <div class="form-control">
                    <label for="case_description" class="label">
                        <span class="label-text">"描述"</span>
                    </label>
                    <textarea id="case_description"
                        on:input=move |ev| state.description.set(event_target_value(&ev))
                        prop:value=move || state.description.get()
                        class="textarea textarea-bordered w-full"
                    ></textarea>
                </div>

                <div class="card-actions justify-end">
                    <Show when=is_editing>
                        <button type="button" class="btn btn-ghost" on:click=move |_| state.reset()>
                            "取消"
                        </button>
                    </Show>
                    <button type="submit" class="btn btn-primary">
                        {move || if is_editing() { "保存" } else { "创建" }}
                    </button>
                </div>
            </div>
        </form>
    }
}
