use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::catalog::Catalog;
use components::header::Header;
use components::notice_banner::NoticeBanner;
use components::ticket_panel::TicketPanel;
use hooks::use_catalog::use_catalog;
use hooks::use_notice::use_notice;
use hooks::use_ticket::use_ticket;
use services::api::ApiClient;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());

    let notice = use_notice();
    let catalog = use_catalog(&api_client);
    let ticket = use_ticket(&api_client, &notice.show);

    let actions = ticket.actions;

    html! {
        <div class="app">
            <Header
                formatted_total={ticket.view.formatted_total.clone()}
                line_count={ticket.view.lines.len()}
            />
            <NoticeBanner notice={notice.notice.clone()} />
            <main class="main">
                <div class="container register">
                    <Catalog state={catalog} on_select={actions.add.clone()} />
                    <TicketPanel
                        view={ticket.view}
                        on_increment={actions.increment.clone()}
                        on_decrement={actions.decrement.clone()}
                        on_remove={actions.remove.clone()}
                        on_save={actions.save.clone()}
                        on_export={actions.export.clone()}
                        on_charge={actions.charge.clone()}
                    />
                </div>
            </main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
