use async_trait::async_trait;
use leptos::children::ViewFn;
use leptos::prelude::*;

use super::{label_of, select_options, Frame};
use crate::lifecycle::{Page, PageContext, PageError};

pub const MODULE_ID: &str = "pages/contracts";

const STATUSES: [(&str, &str); 4] = [
    ("all", "모든 상태"),
    ("active", "진행 중"),
    ("pending", "대기 중"),
    ("expired", "만료됨"),
];

pub struct ContractsPage {
    frame: Frame,
    status: RwSignal<String>,
    search: RwSignal<String>,
}

impl ContractsPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            frame: Frame::new(ctx),
            status: RwSignal::new("all".to_string()),
            search: RwSignal::new(String::new()),
        }
    }
}

#[async_trait(?Send)]
impl Page<ViewFn> for ContractsPage {
    async fn render(&mut self) -> Result<ViewFn, PageError> {
        let status = self.status;
        let search = self.search;

        Ok(self.frame.wrap(move || {
            view! {
                <div class="page contracts-page">
                    <div class="contracts-header">
                        <h1 class="contracts-title">"계약 관리"</h1>
                        <div class="contracts-actions">
                            <select
                                id="status-filter"
                                class="form-select"
                                on:change=move |ev| status.set(event_target_value(&ev))
                            >
                                {select_options(&STATUSES, &status.get_untracked())}
                            </select>
                            <input
                                type="text"
                                class="form-control"
                                placeholder="검색..."
                                prop:value=move || search.get()
                                on:input=move |ev| search.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                    <div class="contracts-content">
                        <div class="card">
                            <div class="card-body">
                                {move || {
                                    let query = search.get();
                                    let filter = label_of(&STATUSES, &status.get());
                                    if query.trim().is_empty() {
                                        format!("{} 계약", filter)
                                    } else {
                                        format!("{} 계약 · \"{}\" 검색 결과", filter, query.trim())
                                    }
                                }}
                            </div>
                        </div>
                    </div>
                </div>
            }
            .into_any()
        }))
    }

    fn mounted(&mut self) {
        self.frame.mounted("계약 관리");
    }

    fn unmount(&mut self) {
        self.frame.unmount();
    }
}
