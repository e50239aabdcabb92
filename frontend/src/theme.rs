//! 主题上下文
//!
//! `ThemeProvider` 读取初值并在每次变化 (包括首次挂载) 时写回存储和
//! `data-theme` 属性；子组件通过 `use_theme()` 获取。

use casebook::{ThemeMode, ThemeStore};
use leptos::prelude::*;

use crate::web::document;

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub is_dark: RwSignal<bool>,
}

impl ThemeContext {
    pub fn toggle_theme(&self) {
        self.is_dark.update(|dark| *dark = !*dark);
    }

    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(self.is_dark.get())
    }
}

#[component]
pub fn ThemeProvider(store: ThemeStore, children: Children) -> impl IntoView {
    let is_dark = RwSignal::new(store.initial_is_dark(document::prefers_dark()));
    let ctx = ThemeContext { is_dark };
    provide_context(ctx);

    Effect::new(move |_| {
        let mode = ctx.mode();
        store.persist(mode);
        document::apply_theme(mode);
    });

    children()
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext should be provided by ThemeProvider")
}
