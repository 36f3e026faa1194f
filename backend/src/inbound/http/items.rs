//! Item pages. Every route here sits behind the session guard.
//!
//! ```text
//! GET      /items/          List items
//! GET|POST /add/            Create an item
//! GET|POST /edit/{id}/      Edit an item
//! GET|POST /delete/{id}/    Confirm and delete an item
//! GET      /summary/        Items with their total price
//! ```

use actix_web::{HttpResponse, web};
use minijinja::context;
use serde::Serialize;
use tracing::{error, warn};

use crate::domain::{ErrorCode, Item, ItemId};
use crate::inbound::http::{ApiResult, SignedInResult};
use crate::inbound::http::error::see_other;
use crate::inbound::http::forms::{FormErrors, ItemForm, UNAVAILABLE};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, names};

/// Where item mutations land.
pub const ITEMS_PATH: &str = "/items/";

/// Template-facing projection of an [`Item`].
#[derive(Debug, Serialize)]
struct ItemView {
    id: i64,
    name: String,
    price: String,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id().get(),
            name: item.name().to_string(),
            price: item.price().to_string(),
        }
    }
}

fn item_views(items: &[Item]) -> Vec<ItemView> {
    items.iter().map(ItemView::from).collect()
}

fn form_page(heading: &str, id: Option<ItemId>, form: &ItemForm, errors: &FormErrors) -> HttpResponse {
    views::ok(
        names::ITEM_FORM,
        context! {
            authenticated => true,
            heading => heading,
            item_id => id.map(ItemId::get),
            name => &form.name,
            price => &form.price,
            errors => errors,
        },
    )
}

fn add_page(form: &ItemForm, errors: &FormErrors) -> HttpResponse {
    form_page("Add item", None, form, errors)
}

fn edit_page(id: ItemId, form: &ItemForm, errors: &FormErrors) -> HttpResponse {
    form_page("Edit item", Some(id), form, errors)
}

/// `GET /items/`
pub async fn list(state: web::Data<HttpState>) -> SignedInResult<HttpResponse> {
    let items = state.items_query.list_items().await?;
    Ok(views::ok(
        names::ITEM_LIST,
        context! { authenticated => true, items => item_views(&items) },
    ))
}

/// `GET /add/`
pub async fn add_form() -> HttpResponse {
    add_page(&ItemForm::default(), &FormErrors::default())
}

/// `POST /add/`
pub async fn add(state: web::Data<HttpState>, form: web::Form<ItemForm>) -> HttpResponse {
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => return add_page(&form, &errors),
    };
    match state.items_command.add_item(&draft).await {
        Ok(_) => see_other(ITEMS_PATH),
        Err(err) => {
            error!(error = %err, "item could not be added");
            add_page(&form, &FormErrors::non_field(UNAVAILABLE))
        }
    }
}

/// Look up an item for editing; `Ok(None)` means "redirect to the list".
async fn find_for_edit(state: &HttpState, id: ItemId) -> ApiResult<Option<Item>> {
    match state.items_query.get_item(id).await {
        Ok(item) => Ok(Some(item)),
        Err(err) if err.code() == ErrorCode::NotFound => {
            warn!(item_id = %id, "edit requested for missing item");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// `GET /edit/{id}/`
pub async fn edit_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> SignedInResult<HttpResponse> {
    let id = ItemId::new(path.into_inner());
    let Some(item) = find_for_edit(&state, id).await? else {
        return Ok(see_other(ITEMS_PATH));
    };
    let form = ItemForm {
        name: item.name().to_string(),
        price: item.price().to_string(),
    };
    Ok(edit_page(id, &form, &FormErrors::default()))
}

/// `POST /edit/{id}/`
///
/// Never creates a row: a missing id redirects to the list. Storage failures,
/// including during the initial lookup, re-render the form.
pub async fn edit(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    form: web::Form<ItemForm>,
) -> HttpResponse {
    let id = ItemId::new(path.into_inner());
    match find_for_edit(&state, id).await {
        Ok(Some(_)) => {}
        Ok(None) => return see_other(ITEMS_PATH),
        Err(err) => {
            error!(item_id = %id, error = %err, "item could not be loaded for editing");
            return edit_page(id, &form, &FormErrors::non_field(UNAVAILABLE));
        }
    }
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(errors) => return edit_page(id, &form, &errors),
    };
    match state.items_command.edit_item(id, &draft).await {
        Ok(_) => see_other(ITEMS_PATH),
        Err(err) if err.code() == ErrorCode::NotFound => {
            warn!(item_id = %id, "item vanished before it could be edited");
            see_other(ITEMS_PATH)
        }
        Err(err) => {
            error!(item_id = %id, error = %err, "item could not be updated");
            edit_page(id, &form, &FormErrors::non_field(UNAVAILABLE))
        }
    }
}

/// `GET /delete/{id}/`
pub async fn delete_form(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> SignedInResult<HttpResponse> {
    let item = state
        .items_query
        .get_item(ItemId::new(path.into_inner()))
        .await?;
    Ok(views::ok(
        names::ITEM_CONFIRM_DELETE,
        context! { authenticated => true, item => ItemView::from(&item) },
    ))
}

/// `POST /delete/{id}/`
///
/// Deleting a missing item renders the not-found page with status 404.
pub async fn delete(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> SignedInResult<HttpResponse> {
    state
        .items_command
        .delete_item(ItemId::new(path.into_inner()))
        .await?;
    Ok(see_other(ITEMS_PATH))
}

/// `GET /summary/`
pub async fn summary(state: web::Data<HttpState>) -> SignedInResult<HttpResponse> {
    let summary = state.items_query.summarise().await?;
    Ok(views::ok(
        names::ITEM_SUMMARY,
        context! {
            authenticated => true,
            items => item_views(&summary.items),
            total => summary.total.to_string(),
        },
    ))
}
