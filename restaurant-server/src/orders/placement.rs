//! Order placement
//!
//! Validation, price capture, persistence and stock adjustment happen in one
//! `BEGIN IMMEDIATE` transaction, so concurrent orders queue on the write lock
//! instead of failing. The `order:created` push goes out only after commit.

use rust_decimal::Decimal;
use shared::models::{Order, OrderCreate, OrderItemInput};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::inventory;
use super::money::{MAX_QUANTITY, line_total, to_decimal, to_f64, validate_price};
use crate::auth::CurrentUser;
use crate::db;
use crate::db::orders::{NewOrder, NewOrderItem};
use crate::live::LiveOrderHub;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email,
    validate_optional_text,
};
use crate::utils::{AppError, ErrorCode, ServiceResult};

/// Contact details resolved for the order header
#[derive(Debug, PartialEq)]
struct Contact {
    customer_id: Option<i64>,
    name: String,
    phone: String,
    email: Option<String>,
}

/// Line after menu lookup with its captured unit price
struct PricedLine<'a> {
    input: &'a OrderItemInput,
    price: f64,
}

/// Place an order for a guest (`caller == None`) or an authenticated user
pub async fn place_order(
    pool: &SqlitePool,
    hub: &LiveOrderHub,
    caller: Option<&CurrentUser>,
    req: OrderCreate,
) -> ServiceResult<Order> {
    validate_request(&req)?;
    let contact = resolve_contact(pool, caller, &req).await?;

    let mut tx = pool.begin_with(db::BEGIN_IMMEDIATE).await?;
    let now = now_millis();

    let mut lines = Vec::with_capacity(req.items.len());
    let mut total = Decimal::ZERO;
    for input in &req.items {
        let menu_item = db::menu_items::find_by_id_tx(&mut *tx, input.menu_item_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::MenuItemNotFound,
                    format!("Menu item {} not found", input.menu_item_id),
                )
                .with_detail("menu_item_id", input.menu_item_id)
            })?;
        if !menu_item.is_available {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("{} is currently unavailable", menu_item.name),
            )
            .with_detail("menu_item_id", menu_item.id)
            .into());
        }

        let price = to_f64(to_decimal(input.price.unwrap_or(menu_item.price)));
        total += line_total(price, input.quantity);
        lines.push(PricedLine { input, price });
    }

    let order_id = db::orders::insert_tx(
        &mut *tx,
        &NewOrder {
            customer_id: contact.customer_id,
            customer_name: &contact.name,
            customer_phone: &contact.phone,
            customer_email: contact.email.as_deref(),
            customer_address: req.customer_address.as_deref(),
            table_number: req.table_number,
            is_guest_order: contact.customer_id.is_none(),
            total_amount: to_f64(total),
            notes: req.notes.as_deref(),
            now,
        },
    )
    .await?;

    for line in &lines {
        db::orders::insert_item_tx(
            &mut *tx,
            order_id,
            &NewOrderItem {
                menu_item_id: line.input.menu_item_id,
                quantity: line.input.quantity,
                price: line.price,
                special_requests: line.input.special_requests.as_deref(),
            },
            now,
        )
        .await?;
    }

    let usage: Vec<(i64, i64)> = req
        .items
        .iter()
        .map(|i| (i.menu_item_id, i.quantity))
        .collect();
    let changes = inventory::consume(&mut *tx, &usage).await?;

    tx.commit().await?;

    for change in changes.iter().filter(|c| c.is_low) {
        tracing::warn!(
            inventory_item_id = change.inventory_item_id,
            name = %change.name,
            quantity = change.after,
            "Inventory item is low on stock"
        );
    }

    let order = db::orders::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::internal("Order vanished after commit"))?;

    let delivered = hub.publish_order_created(&order);
    tracing::info!(
        order_id = order.id,
        total = order.total_amount,
        items = order.items.len(),
        guest = order.is_guest_order,
        subscribers = delivered,
        "Order placed"
    );

    Ok(order)
}

/// Shape checks that need no storage access
fn validate_request(req: &OrderCreate) -> Result<(), AppError> {
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    for (index, item) in req.items.iter().enumerate() {
        if item.quantity < 1 || item.quantity > MAX_QUANTITY {
            return Err(AppError::with_message(
                ErrorCode::OrderInvalidQuantity,
                format!("quantity must be between 1 and {MAX_QUANTITY}"),
            )
            .with_detail("index", index)
            .with_detail("menu_item_id", item.menu_item_id));
        }
        if let Some(price) = item.price {
            validate_price(price, "price")?;
        }
        validate_optional_text(&item.special_requests, "special_requests", MAX_NOTE_LEN)?;
    }

    if let Some(table) = req.table_number
        && table < 1
    {
        return Err(AppError::validation("table_number must be a positive number"));
    }

    validate_optional_text(&req.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.customer_phone, "customer_phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.customer_address, "customer_address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&req.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(email) = non_blank(&req.customer_email) {
        validate_email(email)?;
    }
    Ok(())
}

/// Guests must give a name and phone; accounts fill in what is missing
async fn resolve_contact(
    pool: &SqlitePool,
    caller: Option<&CurrentUser>,
    req: &OrderCreate,
) -> ServiceResult<Contact> {
    let name = non_blank(&req.customer_name).map(str::to_string);
    let phone = non_blank(&req.customer_phone).map(str::to_string);
    let email = non_blank(&req.customer_email).map(str::to_string);

    let Some(user) = caller else {
        let name = name.ok_or_else(|| guest_contact_required("customer_name"))?;
        let phone = phone.ok_or_else(|| guest_contact_required("customer_phone"))?;
        return Ok(Contact {
            customer_id: None,
            name,
            phone,
            email,
        });
    };

    let account = db::users::find_by_id(pool, user.id)
        .await?
        .ok_or_else(|| AppError::invalid_token("Account no longer exists"))?;

    Ok(Contact {
        customer_id: Some(account.id),
        name: name.unwrap_or(account.name),
        phone: phone.or(account.phone).unwrap_or_default(),
        email: email.or(Some(account.email)),
    })
}

fn guest_contact_required(field: &str) -> AppError {
    AppError::with_message(
        ErrorCode::GuestContactRequired,
        format!("{field} is required for guest orders"),
    )
    .with_detail("field", field)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
