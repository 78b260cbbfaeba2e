use yew::prelude::*;
use shared::CatalogItem;
use crate::hooks::use_catalog::CatalogState;

#[derive(Properties, PartialEq)]
pub struct CatalogProps {
    pub state: CatalogState,
    pub on_select: Callback<CatalogItem>,
}

#[function_component(Catalog)]
pub fn catalog(props: &CatalogProps) -> Html {
    let content = match &props.state {
        CatalogState::Loading => html! {
            <div class="loading">{"Loading catalog..."}</div>
        },
        CatalogState::Failed(_) => html! {
            <p class="catalog-error">{"Error loading catalog items. Check console for details."}</p>
        },
        CatalogState::Loaded(items) => html! {
            <>
            {for items.iter().map(|item| {
                let onclick = {
                    let on_select = props.on_select.clone();
                    let item = item.clone();
                    Callback::from(move |_: MouseEvent| on_select.emit(item.clone()))
                };

                html! {
                    <div key={item.name.clone()} class={classes!("card", item.image_class.clone())} {onclick}>
                        <div class="label">{item.name.clone()}</div>
                    </div>
                }
            })}
            </>
        },
    };

    html! {
        <section id="catalog" class="catalog">
            {content}
        </section>
    }
}
