use async_trait::async_trait;
use chrono::{Datelike, Local};
use contracts::system::auth::LoginRequest;
use gloo_timers::future::TimeoutFuture;
use leptos::children::ViewFn;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::layout::set_document_title;
use crate::lifecycle::{Page, PageContext, PageError};
use crate::system::app_context::AppContext;
use crate::system::auth::credentials::{self, LOGIN_LATENCY_MS};

pub const MODULE_ID: &str = "pages/login";

const REMEMBERED_EMAIL_KEY: &str = "rememberedEmail";
const MOCK_TOKEN: &str = "mock-token-12345";

#[derive(Clone, Copy)]
struct LoginForm {
    email: RwSignal<String>,
    password: RwSignal<String>,
    remember: RwSignal<bool>,
    show_password: RwSignal<bool>,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl LoginForm {
    fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            remember: RwSignal::new(false),
            show_password: RwSignal::new(false),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    fn request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.get_untracked().trim().to_string(),
            password: self.password.get_untracked().trim().to_string(),
        }
    }
}

fn submit(app: AppContext, form: LoginForm) {
    if form.loading.get_untracked() {
        return;
    }
    let request = form.request();
    if let Err(err) = credentials::validate(&request) {
        form.error.set(Some(err.to_string()));
        return;
    }

    form.error.set(None);
    form.loading.set(true);
    spawn_local(async move {
        TimeoutFuture::new(LOGIN_LATENCY_MS).await;
        match credentials::authenticate(&request) {
            Ok(user) => {
                if form.remember.get_untracked() {
                    app.storage().set(REMEMBERED_EMAIL_KEY, &request.email);
                } else {
                    app.storage().remove(REMEMBERED_EMAIL_KEY);
                }
                app.login(user, MOCK_TOKEN.to_string());
            }
            Err(err) => {
                log::info!("login rejected for {}: {}", request.email, err);
                form.error.set(Some(err.to_string()));
                form.loading.set(false);
            }
        }
    });
}

pub struct LoginPage {
    ctx: PageContext,
    form: LoginForm,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            form: LoginForm::new(),
        }
    }
}

#[async_trait(?Send)]
impl Page<ViewFn> for LoginPage {
    async fn render(&mut self) -> Result<ViewFn, PageError> {
        let app = self.ctx.app.clone();
        let form = self.form;
        if let Some(email) = app.storage().get(REMEMBERED_EMAIL_KEY) {
            form.email.set(email);
            form.remember.set(true);
        }
        let year = Local::now().year();

        Ok(ViewFn::from(move || {
            let app = app.clone();
            let on_submit = move |ev: SubmitEvent| {
                ev.prevent_default();
                submit(app.clone(), form);
            };

            view! {
                <div class="page login-page">
                    <div class="login-container">
                        <div class="login-card">
                            <div class="login-header">
                                <div class="logo">
                                    <img src="/public/logo.svg" alt="케빈랩 로고" class="logo-image" />
                                </div>
                                <h1 class="login-title">"케빈랩 사업관리 시스템"</h1>
                            </div>
                            <div class="login-body">
                                <form class="login-form" on:submit=on_submit>
                                    <div class="form-group">
                                        <label for="email" class="form-label">"이메일"</label>
                                        <input
                                            type="email"
                                            id="email"
                                            class="form-control"
                                            placeholder="이메일 주소를 입력하세요"
                                            autocomplete="email"
                                            prop:value=move || form.email.get()
                                            on:input=move |ev| form.email.set(event_target_value(&ev))
                                        />
                                    </div>
                                    <div class="form-group">
                                        <label for="password" class="form-label">"비밀번호"</label>
                                        <div class="password-input-wrapper">
                                            <input
                                                type=move || if form.show_password.get() { "text" } else { "password" }
                                                id="password"
                                                class="form-control"
                                                placeholder="비밀번호를 입력하세요"
                                                autocomplete="current-password"
                                                prop:value=move || form.password.get()
                                                on:input=move |ev| form.password.set(event_target_value(&ev))
                                            />
                                            <button
                                                type="button"
                                                class="password-toggle"
                                                tabindex="-1"
                                                on:click=move |_| form.show_password.update(|shown| *shown = !*shown)
                                            >
                                                <i class=move || if form.show_password.get() { "fas fa-eye-slash" } else { "fas fa-eye" }></i>
                                            </button>
                                        </div>
                                    </div>
                                    <div class="form-group">
                                        <div class="remember-me">
                                            <input
                                                type="checkbox"
                                                id="rememberMe"
                                                class="remember-checkbox"
                                                prop:checked=move || form.remember.get()
                                                on:change=move |ev| form.remember.set(event_target_checked(&ev))
                                            />
                                            <label for="rememberMe" class="remember-label">"로그인 상태 유지"</label>
                                        </div>
                                    </div>
                                    {move || form.error.get().map(|message| view! {
                                        <div class="alert alert-danger error-message">{message}</div>
                                    })}
                                    <div class="form-group">
                                        <button
                                            type="submit"
                                            class="btn btn-primary btn-lg btn-block login-button"
                                            disabled=move || form.loading.get()
                                        >
                                            {move || if form.loading.get() {
                                                view! { <i class="fas fa-spinner fa-spin"></i> }.into_any()
                                            } else {
                                                view! { <span class="button-text">"로그인"</span> }.into_any()
                                            }}
                                        </button>
                                    </div>
                                </form>
                            </div>
                            <div class="login-footer">
                                <p class="login-footer-text">{format!("© {} KevinLab. All rights reserved.", year)}</p>
                            </div>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }))
    }

    fn mounted(&mut self) {
        set_document_title(&self.ctx.app.page_title("로그인"));
    }
}
