use async_trait::async_trait;
use leptos::children::ViewFn;
use leptos::prelude::*;

use super::Frame;
use crate::lifecycle::{Page, PageContext, PageError};

pub const MODULE_ID: &str = "pages/dashboard";

const SERVICES: [&str; 4] = ["HEMS", "BEMS", "REMS", "FEMS"];

pub struct DashboardPage {
    frame: Frame,
    active_service: RwSignal<&'static str>,
}

impl DashboardPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            frame: Frame::new(ctx),
            active_service: RwSignal::new(SERVICES[0]),
        }
    }
}

#[async_trait(?Send)]
impl Page<ViewFn> for DashboardPage {
    async fn render(&mut self) -> Result<ViewFn, PageError> {
        let week = self.frame.ctx.app.current_week();
        let active_service = self.active_service;

        Ok(self.frame.wrap(move || {
            let week = week.clone();
            view! {
                <div class="page dashboard-page">
                    <div class="dashboard-header">
                        <h1 class="dashboard-title">"대시보드"</h1>
                        <div class="dashboard-actions">
                            <div class="week-indicator">
                                <i class="fas fa-calendar-week"></i>
                                <span class="current-week">{week}</span>
                            </div>
                        </div>
                    </div>
                    <div class="dashboard-content">
                        <div class="card">
                            <div class="card-header">
                                <h3 class="card-title">"바로가기"</h3>
                            </div>
                            <div class="card-body">
                                <a href="/sales" class="btn btn-outline">"영업현황"</a>
                                <a href="/contracts" class="btn btn-outline">"계약 관리"</a>
                                <a href="/backlog" class="btn btn-outline">"수주잔"</a>
                            </div>
                        </div>
                        <div class="card service-kpi-section">
                            <div class="card-header">
                                <h3 class="card-title">"서비스 KPI"</h3>
                            </div>
                            <div class="card-body">
                                <div class="service-tabs">
                                    {SERVICES
                                        .iter()
                                        .map(|service| {
                                            let service = *service;
                                            view! {
                                                <button
                                                    class="service-tab"
                                                    class:active=move || active_service.get() == service
                                                    on:click=move |_| active_service.set(service)
                                                >
                                                    {service}
                                                </button>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                                <p class="service-kpi-summary">
                                    {move || format!("{} 서비스 지표가 여기에 표시됩니다.", active_service.get())}
                                </p>
                            </div>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }))
    }

    fn mounted(&mut self) {
        self.frame.mounted("대시보드");
    }

    fn unmount(&mut self) {
        self.frame.unmount();
    }
}
