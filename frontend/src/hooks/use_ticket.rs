use std::rc::Rc;

use chrono::Utc;
use shared::{
    build_submission, export_file_name, CatalogItem, ExportSheet, Ticket, TicketAction, TicketView,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_notice::Notice;
use crate::services::api::ApiClient;
use crate::services::export;
use crate::services::logging::Logger;

/// Reducer state wrapping the shared [`Ticket`].
///
/// Every change goes through [`TicketAction`], so two clicks can never interleave their
/// mutations and every dispatch sees the latest ticket.
#[derive(Clone, Default, PartialEq)]
pub struct TicketState {
    pub ticket: Ticket,
}

impl Reducible for TicketState {
    type Action = TicketAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut ticket = self.ticket.clone();

        if let Err(e) = ticket.apply(action) {
            Logger::error_with_component("ticket", &e.to_string());
            return self;
        }

        gloo::console::debug!(format!("Ticket items: {:?}", ticket.lines()));
        Rc::new(Self { ticket })
    }
}

pub struct UseTicketResult {
    pub view: TicketView,
    pub actions: UseTicketActions,
}

#[derive(Clone, PartialEq)]
pub struct UseTicketActions {
    pub add: Callback<CatalogItem>,
    pub increment: Callback<String>,
    pub decrement: Callback<String>,
    pub remove: Callback<String>,
    pub save: Callback<()>,
    pub export: Callback<()>,
    pub charge: Callback<()>,
}

#[hook]
pub fn use_ticket(api_client: &ApiClient, show_notice: &Callback<Notice>) -> UseTicketResult {
    let state = use_reducer(TicketState::default);

    let add = {
        let dispatcher = state.dispatcher();
        Callback::from(move |item: CatalogItem| dispatcher.dispatch(TicketAction::Add(item)))
    };

    let increment = {
        let dispatcher = state.dispatcher();
        Callback::from(move |name: String| dispatcher.dispatch(TicketAction::Increment(name)))
    };

    let decrement = {
        let dispatcher = state.dispatcher();
        Callback::from(move |name: String| dispatcher.dispatch(TicketAction::Decrement(name)))
    };

    let remove = {
        let dispatcher = state.dispatcher();
        Callback::from(move |name: String| dispatcher.dispatch(TicketAction::Remove(name)))
    };

    // Save the ticket to the manifest; the ticket itself is left as is
    let save = {
        let state = state.clone();
        let api_client = api_client.clone();
        let show_notice = show_notice.clone();

        Callback::from(move |_: ()| {
            let entries = match build_submission(&state.ticket, Utc::now()) {
                Ok(entries) => entries,
                Err(e) => {
                    Logger::warn_with_component("persistence", &e.to_string());
                    show_notice.emit(Notice::error(e.to_string()));
                    return;
                }
            };

            Logger::debug_with_component(
                "persistence",
                &format!(
                    "Ticket data to send: {}",
                    serde_json::to_string_pretty(&entries).unwrap_or_default()
                ),
            );

            let api_client = api_client.clone();
            let show_notice = show_notice.clone();
            spawn_local(async move {
                match api_client.save_ticket(&entries).await {
                    Ok(response) => {
                        Logger::info_with_component(
                            "persistence",
                            &format!("Server response: {}", response.message),
                        );
                        show_notice.emit(Notice::info("Ticket saved to manifest.json!"));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "persistence",
                            &format!("Error saving to manifest.json: {}", e),
                        );
                        show_notice.emit(Notice::error(
                            "Failed to save ticket. Check console for details.",
                        ));
                    }
                }
            });
        })
    };

    let export_ticket = {
        let state = state.clone();
        let show_notice = show_notice.clone();

        Callback::from(move |_: ()| {
            let Some(sheet) = ExportSheet::from_ticket(&state.ticket) else {
                show_notice.emit(Notice::error("No items to export!"));
                return;
            };

            let file_name = export_file_name(Utc::now().date_naive());
            Logger::debug_with_component("export", &format!("Exporting to Excel: {:?}", sheet.rows));

            match export::download_sheet(&sheet, &file_name) {
                Ok(()) => show_notice.emit(Notice::info(format!("Exported {}", file_name))),
                Err(e) => {
                    Logger::error_with_component("export", &e);
                    show_notice.emit(Notice::error(
                        "Failed to export ticket. Check console for details.",
                    ));
                }
            }
        })
    };

    // Simulated payment: nothing is charged, the ticket is cleared
    let charge = {
        let dispatcher = state.dispatcher();
        let show_notice = show_notice.clone();

        Callback::from(move |_: ()| {
            show_notice.emit(Notice::info("Processing payment..."));
            dispatcher.dispatch(TicketAction::Clear);
        })
    };

    UseTicketResult {
        view: state.ticket.view(),
        actions: UseTicketActions {
            add,
            increment,
            decrement,
            remove,
            save,
            export: export_ticket,
            charge,
        },
    }
}
