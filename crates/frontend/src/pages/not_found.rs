use async_trait::async_trait;
use leptos::children::ViewFn;
use leptos::prelude::*;

use super::Frame;
use crate::lifecycle::{Page, PageContext, PageError};

pub const MODULE_ID: &str = "pages/not-found";

pub struct NotFoundPage {
    frame: Frame,
}

impl NotFoundPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            frame: Frame::new(ctx),
        }
    }
}

#[async_trait(?Send)]
impl Page<ViewFn> for NotFoundPage {
    async fn render(&mut self) -> Result<ViewFn, PageError> {
        let home = self.frame.ctx.app.config.router.home_path.clone();
        Ok(self.frame.wrap(move || {
            view! {
                <div class="page not-found-page">
                    <h1>"404"</h1>
                    <p>"요청하신 페이지를 찾을 수 없습니다."</p>
                    <a href=home.clone() class="btn btn-primary">"대시보드로 이동"</a>
                </div>
            }
            .into_any()
        }))
    }

    fn mounted(&mut self) {
        self.frame.mounted("페이지를 찾을 수 없음");
    }

    fn unmount(&mut self) {
        self.frame.unmount();
    }
}
