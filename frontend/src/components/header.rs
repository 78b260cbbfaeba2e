use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub formatted_total: String,
    pub line_count: usize,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Dessert Till"}</h1>
                <div class="header-right">
                    <div class="balance-display">
                        <span class="balance-label">
                            {match props.line_count {
                                0 => "Empty ticket".to_string(),
                                1 => "1 line:".to_string(),
                                n => format!("{} lines:", n),
                            }}
                        </span>
                        <span class="balance-amount">{props.formatted_total.clone()}</span>
                    </div>
                </div>
            </div>
        </header>
    }
}
