use yew::prelude::*;
use crate::hooks::use_notice::{Notice, NoticeKind};

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Option<Notice>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    match &props.notice {
        Some(notice) => {
            let class = match notice.kind {
                NoticeKind::Info => "notice notice-info",
                NoticeKind::Error => "notice notice-error",
            };
            html! {
                <div {class} role="status">{notice.message.clone()}</div>
            }
        }
        None => html! {},
    }
}
