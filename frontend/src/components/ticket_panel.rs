use yew::prelude::*;
use shared::TicketView;

#[derive(Properties, PartialEq)]
pub struct TicketPanelProps {
    pub view: TicketView,
    pub on_increment: Callback<String>,
    pub on_decrement: Callback<String>,
    pub on_remove: Callback<String>,
    pub on_save: Callback<()>,
    pub on_export: Callback<()>,
    pub on_charge: Callback<()>,
}

/// The running ticket: one row per line, the total, and the ticket actions.
/// Lines are addressed by item name, never by position.
#[function_component(TicketPanel)]
pub fn ticket_panel(props: &TicketPanelProps) -> Html {
    let lines = props.view.lines.iter().map(|line| {
        let bind = |callback: &Callback<String>| {
            let name = line.name.clone();
            callback.reform(move |_: MouseEvent| name.clone())
        };

        html! {
            <li class="line" key={line.name.clone()}>
                <div class="name">{line.name.clone()}</div>
                <div class="price meta">{line.formatted_total.clone()}</div>
                <div class="qty">
                    <button onclick={bind(&props.on_decrement)}>{"-"}</button>
                    <span>{line.quantity}</span>
                    <button onclick={bind(&props.on_increment)}>{"+"}</button>
                </div>
                <button class="remove" onclick={bind(&props.on_remove)}>{"×"}</button>
            </li>
        }
    });

    html! {
        <aside class="ticket">
            <ul id="lines" class="lines">
                {for lines}
            </ul>
            <div class="ticket-total">
                <span class="total-label">{"Total"}</span>
                <span id="total" class="total-amount">{props.view.formatted_total.clone()}</span>
            </div>
            <div class="ticket-actions">
                <button id="saveBtn" onclick={props.on_save.reform(|_: MouseEvent| ())}>{"Save"}</button>
                <button id="exportBtn" onclick={props.on_export.reform(|_: MouseEvent| ())}>{"Export"}</button>
                <button id="chargeBtn" class="charge" onclick={props.on_charge.reform(|_: MouseEvent| ())}>{"Charge"}</button>
            </div>
        </aside>
    }
}
