use yew::prelude::*;
use shared::CatalogItem;
use wasm_bindgen_futures::spawn_local;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, Debug, PartialEq)]
pub enum CatalogState {
    Loading,
    Loaded(Vec<CatalogItem>),
    Failed(String),
}

/// Load the catalog once when the component mounts. There is no retry.
#[hook]
pub fn use_catalog(api_client: &ApiClient) -> CatalogState {
    let state = use_state(|| CatalogState::Loading);

    {
        let api_client = api_client.clone();
        let state = state.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                match api_client.get_catalog().await {
                    Ok(items) => {
                        Logger::debug_with_component(
                            "catalog",
                            &format!("Loaded {} desserts", items.len()),
                        );
                        state.set(CatalogState::Loaded(items));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "catalog",
                            &format!("Error loading desserts: {}", e),
                        );
                        state.set(CatalogState::Failed(e));
                    }
                }
            });

            || ()
        });
    }

    (*state).clone()
}
