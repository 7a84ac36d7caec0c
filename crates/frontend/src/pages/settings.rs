use async_trait::async_trait;
use leptos::children::ViewFn;
use leptos::prelude::*;

use super::Frame;
use crate::lifecycle::{Page, PageContext, PageError};

pub const MODULE_ID: &str = "pages/settings";

pub struct SettingsPage {
    frame: Frame,
}

impl SettingsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            frame: Frame::new(ctx),
        }
    }
}

#[async_trait(?Send)]
impl Page<ViewFn> for SettingsPage {
    async fn render(&mut self) -> Result<ViewFn, PageError> {
        let app = self.frame.ctx.app.clone();
        let dark = self.frame.layout.dark;

        Ok(self.frame.wrap(move || {
            let user = app.user();
            let name = user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
            let email = user.as_ref().map(|u| u.email.clone()).unwrap_or_default();
            let role = match user.as_ref() {
                Some(u) if u.is_admin() => "관리자",
                Some(_) => "일반 사용자",
                None => "",
            };
            let theme_app = app.clone();
            let logout_app = app.clone();

            view! {
                <div class="page settings-page">
                    <h1 class="settings-title">"설정"</h1>
                    <div class="card">
                        <div class="card-header">
                            <h3 class="card-title">"계정"</h3>
                        </div>
                        <div class="card-body">
                            <dl class="account-info">
                                <dt>"이름"</dt>
                                <dd>{name}</dd>
                                <dt>"이메일"</dt>
                                <dd>{email}</dd>
                                <dt>"권한"</dt>
                                <dd>{role}</dd>
                            </dl>
                            <button class="btn btn-outline" on:click=move |_| logout_app.logout()>
                                "로그아웃"
                            </button>
                        </div>
                    </div>
                    <div class="card">
                        <div class="card-header">
                            <h3 class="card-title">"화면"</h3>
                        </div>
                        <div class="card-body">
                            <label class="switch">
                                <input
                                    type="checkbox"
                                    prop:checked=move || dark.get()
                                    on:change=move |_| {
                                        let theme = theme_app.toggle_theme();
                                        dark.set(theme.is_dark());
                                    }
                                />
                                <span>"다크 모드"</span>
                            </label>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }))
    }

    fn mounted(&mut self) {
        self.frame.mounted("설정");
    }

    fn unmount(&mut self) {
        self.frame.unmount();
    }
}
