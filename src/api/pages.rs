//! Plain HTML form views
//!
//! Small operator-facing pages for manual customer upkeep and the two upload
//! forms. Markup is rendered inline; these pages are deliberately unstyled
//! and carry no template engine.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{CustomerUpdate, DeliveryType};
use crate::repository::CustomerRepository;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(customer_list))
        .route(
            "/customers/{id}/edit",
            get(customer_edit_form).post(customer_edit_submit),
        )
        .route("/upload-customers", get(upload_customers_form))
        .route("/upload-orders", get(upload_orders_form))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html dir=\"rtl\" lang=\"he\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{body}\n</body>\n</html>\n"
    ))
}

/// GET /customers - customer listing with edit links
async fn customer_list(State(state): State<AppState>) -> Result<Html<String>> {
    let customers = CustomerRepository::new(&state.db).list()?;

    let mut rows = String::new();
    for customer in &customers {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href=\"/customers/{}/edit\">עריכה</a></td></tr>\n",
            escape(&customer.full_name),
            escape(customer.phone.as_deref().unwrap_or("")),
            escape(customer.address.as_deref().unwrap_or("")),
            if customer.in_neighborhood { "בשכונה" } else { "מחוץ לשכונה" },
            customer.id,
        ));
    }

    let body = format!(
        "<h1>לקוחות</h1>\n<table border=\"1\">\n<tr><th>שם</th><th>טלפון</th><th>כתובת</th><th>אזור</th><th></th></tr>\n{rows}</table>\n"
    );
    Ok(page("לקוחות", &body))
}

/// GET /customers/:id/edit - customer edit form
async fn customer_edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let customer = CustomerRepository::new(&state.db)
        .get(id)?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    let mut delivery_options = String::new();
    for delivery in [
        DeliveryType::None,
        DeliveryType::Package,
        DeliveryType::MorningPackage,
        DeliveryType::Delivery,
        DeliveryType::MorningDelivery,
    ] {
        let selected = if delivery == customer.default_delivery {
            " selected"
        } else {
            ""
        };
        delivery_options.push_str(&format!(
            "<option value=\"{0}\"{selected}>{0}</option>",
            delivery.as_str()
        ));
    }

    let checked = if customer.in_neighborhood {
        " checked"
    } else {
        ""
    };
    let body = format!(
        "<h1>עריכת לקוח</h1>\n<form method=\"post\">\n\
         <p>שם מלא: <input name=\"full_name\" value=\"{}\"></p>\n\
         <p>אימייל: <input name=\"email\" value=\"{}\"></p>\n\
         <p>טלפון: <input name=\"phone\" value=\"{}\"></p>\n\
         <p>כתובת: <input name=\"address\" value=\"{}\"></p>\n\
         <p>משלוח: <select name=\"default_delivery\">{delivery_options}</select></p>\n\
         <p>בשכונה: <input type=\"checkbox\" name=\"in_neighborhood\"{checked}></p>\n\
         <p><button type=\"submit\">שמירה</button></p>\n\
         </form>\n<p><a href=\"/customers\">חזרה לרשימה</a></p>\n",
        escape(&customer.full_name),
        escape(customer.email.as_deref().unwrap_or("")),
        escape(customer.phone.as_deref().unwrap_or("")),
        escape(customer.address.as_deref().unwrap_or("")),
    );
    Ok(page("עריכת לקוח", &body))
}

#[derive(Debug, Deserialize)]
struct CustomerEditForm {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    default_delivery: Option<String>,
    /// Checkbox: present as "on" only when checked
    #[serde(default)]
    in_neighborhood: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// POST /customers/:id/edit - apply the form and redirect to the listing
async fn customer_edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<CustomerEditForm>,
) -> Result<Redirect> {
    let patch = CustomerUpdate {
        full_name: non_empty(form.full_name),
        email: non_empty(form.email),
        phone: non_empty(form.phone),
        address: non_empty(form.address),
        default_delivery: form.default_delivery.as_deref().map(DeliveryType::parse),
        in_neighborhood: Some(form.in_neighborhood.as_deref() == Some("on")),
        metadata: None,
    };

    CustomerRepository::new(&state.db).update(id, patch)?;
    Ok(Redirect::to("/customers"))
}

/// GET /upload-customers - CSV upload form
async fn upload_customers_form() -> Html<String> {
    page(
        "העלאת לקוחות",
        "<h1>העלאת קובץ לקוחות</h1>\n\
         <form method=\"post\" action=\"/api/customers/upload-csv\" enctype=\"multipart/form-data\">\n\
         <p><input type=\"file\" name=\"file\" accept=\".csv\"></p>\n\
         <p><button type=\"submit\">העלאה</button></p>\n\
         </form>\n",
    )
}

/// GET /upload-orders - order sheet upload form
async fn upload_orders_form() -> Html<String> {
    page(
        "העלאת הזמנות",
        "<h1>העלאת גיליון הזמנות שבועי</h1>\n\
         <form method=\"post\" action=\"/api/orders/upload-sheet\" enctype=\"multipart/form-data\">\n\
         <p><input type=\"file\" name=\"file\" accept=\".xlsx\"></p>\n\
         <p><button type=\"submit\">העלאה</button></p>\n\
         </form>\n",
    )
}
