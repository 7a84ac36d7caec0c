use async_trait::async_trait;
use leptos::children::ViewFn;
use leptos::prelude::*;

use super::{label_of, select_options, Frame};
use crate::lifecycle::{Page, PageContext, PageError};

pub const MODULE_ID: &str = "pages/sales";

const PERIODS: [(&str, &str); 4] = [
    ("week", "이번 주"),
    ("month", "이번 달"),
    ("quarter", "이번 분기"),
    ("year", "올해"),
];

const STATUSES: [(&str, &str); 4] = [
    ("all", "모든 상태"),
    ("active", "진행 중"),
    ("won", "성공"),
    ("lost", "실패"),
];

pub struct SalesPage {
    frame: Frame,
    period: RwSignal<String>,
    status: RwSignal<String>,
}

impl SalesPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            frame: Frame::new(ctx),
            period: RwSignal::new("month".to_string()),
            status: RwSignal::new("all".to_string()),
        }
    }
}

#[async_trait(?Send)]
impl Page<ViewFn> for SalesPage {
    async fn render(&mut self) -> Result<ViewFn, PageError> {
        let period = self.period;
        let status = self.status;

        Ok(self.frame.wrap(move || {
            view! {
                <div class="page sales-page">
                    <div class="sales-header">
                        <h1 class="sales-title">"영업현황"</h1>
                        <div class="sales-actions">
                            <div class="filter-group">
                                <select
                                    id="period-filter"
                                    class="form-select"
                                    on:change=move |ev| period.set(event_target_value(&ev))
                                >
                                    {select_options(&PERIODS, &period.get_untracked())}
                                </select>
                                <select
                                    id="status-filter"
                                    class="form-select"
                                    on:change=move |ev| status.set(event_target_value(&ev))
                                >
                                    {select_options(&STATUSES, &status.get_untracked())}
                                </select>
                            </div>
                        </div>
                    </div>
                    <div class="sales-content">
                        <div class="card">
                            <div class="card-header">
                                <h3 class="card-title">"영업 기회"</h3>
                            </div>
                            <div class="card-body">
                                <p>
                                    {move || format!(
                                        "{} · {}",
                                        label_of(&PERIODS, &period.get()),
                                        label_of(&STATUSES, &status.get())
                                    )}
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
        self.frame.mounted("영업현황");
    }

    fn unmount(&mut self) {
        self.frame.unmount();
    }
}
