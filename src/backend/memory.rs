//! In-process backing store
//!
//! Serves the console without any external service: a table per entity
//! kind behind an async lock, seeded with demo data on startup. Also the
//! reference implementation the mocks in tests are written against.

use super::BackendClient;
use crate::entities::EntityKind;
use crate::state::forms::{FieldValue, FormValues, RelationOption, RowDraft};
use crate::state::Record;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors surfaced by the in-process store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },
}

pub struct MemoryBackend {
    tables: RwLock<HashMap<EntityKind, Vec<Record>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-populated with a small restaurant group, enough to
    /// exercise every relation picker and repeatable group.
    pub fn with_demo_data() -> Self {
        let mut tables = HashMap::new();
        seed(&mut tables);
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn display_label(kind: EntityKind, record: &Record) -> String {
        let label = record.values.get(kind.display_field()).map(FieldValue::display_value);
        match label {
            Some(label) if !label.is_empty() => label,
            _ => record.id.clone(),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::with_demo_data()
    }
}

#[async_trait]
impl BackendClient for MemoryBackend {
    async fn check_connection(&self) -> bool {
        true
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Record>> {
        let tables = self.tables.read().await;
        Ok(tables.get(&kind).cloned().unwrap_or_default())
    }

    async fn get(&self, kind: EntityKind, id: &str) -> Result<Record> {
        let tables = self.tables.read().await;
        tables
            .get(&kind)
            .and_then(|records| records.iter().find(|r| r.id == id))
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    kind: kind.key(),
                    id: id.to_string(),
                }
                .into()
            })
    }

    async fn create(&self, kind: EntityKind, values: FormValues) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut tables = self.tables.write().await;
        tables.entry(kind).or_default().push(Record {
            id: id.clone(),
            values,
        });
        tracing::info!(kind = kind.key(), id, "record created");
        Ok(id)
    }

    async fn update(&self, kind: EntityKind, id: &str, values: FormValues) -> Result<()> {
        let mut tables = self.tables.write().await;
        let record = tables
            .get_mut(&kind)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or(StoreError::NotFound {
                kind: kind.key(),
                id: id.to_string(),
            })?;
        record.values = values;
        tracing::info!(kind = kind.key(), id, "record updated");
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        let mut tables = self.tables.write().await;
        let records = tables.get_mut(&kind).ok_or(StoreError::NotFound {
            kind: kind.key(),
            id: id.to_string(),
        })?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound {
                kind: kind.key(),
                id: id.to_string(),
            }
            .into());
        }
        tracing::info!(kind = kind.key(), id, "record deleted");
        Ok(())
    }

    async fn list_options(&self, kind: EntityKind) -> Result<Vec<RelationOption>> {
        let tables = self.tables.read().await;
        let options = tables
            .get(&kind)
            .map(|records| {
                records
                    .iter()
                    .map(|r| RelationOption::new(r.id.clone(), Self::display_label(kind, r)))
                    .collect()
            })
            .unwrap_or_default();
        Ok(options)
    }
}

fn seed(tables: &mut HashMap<EntityKind, Vec<Record>>) {
    let mut put = |kind: EntityKind, values: FormValues| -> String {
        let id = Uuid::new_v4().to_string();
        tables.entry(kind).or_default().push(Record {
            id: id.clone(),
            values,
        });
        id
    };

    let ana = put(
        EntityKind::User,
        user_values("ana@bistro.example", "Ana Costa"),
    );
    let ben = put(
        EntityKind::User,
        user_values("ben@bistro.example", "Ben Okafor"),
    );
    let mila = put(
        EntityKind::User,
        user_values("mila@bistro.example", "Mila Novak"),
    );

    let harbor = put(
        EntityKind::Restaurant,
        restaurant_values("Harborside", &ana, &[ben.as_str()]),
    );
    let canteen = put(EntityKind::Restaurant, restaurant_values("Old Canteen", &ben, &[]));

    put(
        EntityKind::Employee,
        employee_values("head chef", "kitchen:full", &ben, &harbor),
    );
    put(
        EntityKind::Employee,
        employee_values("server", "front:basic", &mila, &harbor),
    );

    put(
        EntityKind::MenuItem,
        menu_item_values("Grilled Octopus", "Char-grilled, lemon oil", 18.5, &harbor),
    );
    put(
        EntityKind::MenuItem,
        menu_item_values("Mushroom Risotto", "Arborio, porcini", 14.0, &canteen),
    );

    put(
        EntityKind::Order,
        order_values("open", 32.5, date(2024, 6, 2), &mila, &harbor),
    );
    put(
        EntityKind::Reservation,
        reservation_values(date(2024, 6, 14), 4.0, &mila, &harbor),
    );
    put(
        EntityKind::Inventory,
        inventory_values("flour", 25.0, "kg", &canteen),
    );
    put(
        EntityKind::Promotion,
        promotion_values(
            "Summer Terrace",
            date(2024, 6, 1),
            date(2024, 8, 31),
            10.0,
            &harbor,
        ),
    );
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn user_values(email: &str, display_name: &str) -> FormValues {
    let mut values = FormValues::new();
    values.insert("email", FieldValue::text(email));
    values.insert("display_name", FieldValue::text(display_name));
    values.insert("employee", FieldValue::Rows(vec![]));
    values.insert("order", FieldValue::Rows(vec![]));
    values.insert("reservation", FieldValue::Rows(vec![]));
    values.insert("restaurant", FieldValue::Rows(vec![]));
    values
}

fn restaurant_values(name: &str, owner_id: &str, staff: &[&str]) -> FormValues {
    let mut values = FormValues::new();
    values.insert("name", FieldValue::text(name));
    values.insert("owner_id", FieldValue::Relation(Some(owner_id.to_string())));

    let employees = staff
        .iter()
        .map(|user_id| {
            let mut fields = FormValues::new();
            fields.insert("role", FieldValue::text("manager"));
            fields.insert("permissions", FieldValue::text("all"));
            fields.insert("user_id", FieldValue::Relation(Some(user_id.to_string())));
            RowDraft::new(fields)
        })
        .collect();
    values.insert("employee", FieldValue::Rows(employees));
    values.insert("inventory", FieldValue::Rows(vec![]));
    values.insert("menu_item", FieldValue::Rows(vec![]));
    values.insert("order", FieldValue::Rows(vec![]));
    values.insert("promotion", FieldValue::Rows(vec![]));
    values.insert("reservation", FieldValue::Rows(vec![]));
    values
}

fn employee_values(role: &str, permissions: &str, user_id: &str, restaurant_id: &str) -> FormValues {
    let mut values = FormValues::new();
    values.insert("role", FieldValue::text(role));
    values.insert("permissions", FieldValue::text(permissions));
    values.insert("user_id", FieldValue::Relation(Some(user_id.to_string())));
    values.insert(
        "restaurant_id",
        FieldValue::Relation(Some(restaurant_id.to_string())),
    );
    values
}

fn menu_item_values(name: &str, description: &str, price: f64, restaurant_id: &str) -> FormValues {
    let mut values = FormValues::new();
    values.insert("name", FieldValue::text(name));
    values.insert("description", FieldValue::text(description));
    values.insert("price", FieldValue::Number(price));
    values.insert("image_url", FieldValue::text(""));
    values.insert(
        "restaurant_id",
        FieldValue::Relation(Some(restaurant_id.to_string())),
    );
    values
}

fn order_values(
    status: &str,
    total_price: f64,
    created_at: NaiveDate,
    customer_id: &str,
    restaurant_id: &str,
) -> FormValues {
    let mut values = FormValues::new();
    values.insert("status", FieldValue::text(status));
    values.insert("total_price", FieldValue::Number(total_price));
    values.insert("created_at", FieldValue::Date(created_at));
    values.insert(
        "customer_id",
        FieldValue::Relation(Some(customer_id.to_string())),
    );
    values.insert(
        "restaurant_id",
        FieldValue::Relation(Some(restaurant_id.to_string())),
    );
    values
}

fn reservation_values(
    when: NaiveDate,
    party_size: f64,
    customer_id: &str,
    restaurant_id: &str,
) -> FormValues {
    let mut values = FormValues::new();
    values.insert("date", FieldValue::Date(when));
    values.insert("time", FieldValue::Date(when));
    values.insert("party_size", FieldValue::Number(party_size));
    values.insert(
        "customer_id",
        FieldValue::Relation(Some(customer_id.to_string())),
    );
    values.insert(
        "restaurant_id",
        FieldValue::Relation(Some(restaurant_id.to_string())),
    );
    values
}

fn inventory_values(
    ingredient_name: &str,
    quantity: f64,
    unit: &str,
    restaurant_id: &str,
) -> FormValues {
    let mut values = FormValues::new();
    values.insert("ingredient_name", FieldValue::text(ingredient_name));
    values.insert("quantity", FieldValue::Number(quantity));
    values.insert("unit", FieldValue::text(unit));
    values.insert(
        "restaurant_id",
        FieldValue::Relation(Some(restaurant_id.to_string())),
    );
    values
}

fn promotion_values(
    title: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    discount_amount: f64,
    restaurant_id: &str,
) -> FormValues {
    let mut values = FormValues::new();
    values.insert("title", FieldValue::text(title));
    values.insert("description", FieldValue::text(""));
    values.insert("start_date", FieldValue::Date(start_date));
    values.insert("end_date", FieldValue::Date(end_date));
    values.insert("discount_amount", FieldValue::Number(discount_amount));
    values.insert(
        "restaurant_id",
        FieldValue::Relation(Some(restaurant_id.to_string())),
    );
    values
}
