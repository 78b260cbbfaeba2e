use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// How long a notice stays on screen
const NOTICE_TIMEOUT_MS: u32 = 3000;

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short message shown to the operator after an action
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub struct UseNoticeResult {
    pub notice: Option<Notice>,
    pub show: Callback<Notice>,
}

#[hook]
pub fn use_notice() -> UseNoticeResult {
    let notice = use_state(|| Option::<Notice>::None);
    // Bumped on every new notice so an older timeout never clears a newer message
    let generation = use_mut_ref(|| 0u32);

    let show = {
        let notice = notice.clone();
        let generation = generation.clone();

        use_callback((), move |next: Notice, _| {
            let current = {
                let mut generation = generation.borrow_mut();
                *generation = generation.wrapping_add(1);
                *generation
            };
            notice.set(Some(next));

            let notice = notice.clone();
            let generation = generation.clone();
            spawn_local(async move {
                gloo::timers::future::TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
                if *generation.borrow() == current {
                    notice.set(None);
                }
            });
        })
    };

    UseNoticeResult {
        notice: (*notice).clone(),
        show,
    }
}
