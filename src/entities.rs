//! Entity registry
//!
//! Declarative description of every managed entity: which fields its form
//! carries, which of them are relations and where they point, which
//! repeatable groups hang off it, and the validation schema for the lot.
//! The form pages and list tables are generic over these specs, so adding
//! an entity means adding a table entry here, nothing else.

use crate::state::forms::{FieldValue, FormValues, GroupField, RowDraft, RowGroup};
use crate::validation::{Rule, Schema};

/// The managed entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Restaurant,
    Employee,
    MenuItem,
    Order,
    Reservation,
    Inventory,
    Promotion,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::User,
        EntityKind::Restaurant,
        EntityKind::Employee,
        EntityKind::MenuItem,
        EntityKind::Order,
        EntityKind::Reservation,
        EntityKind::Inventory,
        EntityKind::Promotion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Restaurant => "Restaurant",
            EntityKind::Employee => "Employee",
            EntityKind::MenuItem => "Menu Item",
            EntityKind::Order => "Order",
            EntityKind::Reservation => "Reservation",
            EntityKind::Inventory => "Inventory",
            EntityKind::Promotion => "Promotion",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::User => "Users",
            EntityKind::Restaurant => "Restaurants",
            EntityKind::Employee => "Employees",
            EntityKind::MenuItem => "Menu Items",
            EntityKind::Order => "Orders",
            EntityKind::Reservation => "Reservations",
            EntityKind::Inventory => "Inventory",
            EntityKind::Promotion => "Promotions",
        }
    }

    /// Stable key used in config files
    pub fn key(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Restaurant => "restaurant",
            EntityKind::Employee => "employee",
            EntityKind::MenuItem => "menu_item",
            EntityKind::Order => "order",
            EntityKind::Reservation => "reservation",
            EntityKind::Inventory => "inventory",
            EntityKind::Promotion => "promotion",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// The field whose value labels a record in option lists, tables and
    /// confirmation dialogs
    pub fn display_field(&self) -> &'static str {
        match self {
            EntityKind::User => "email",
            EntityKind::Restaurant => "name",
            EntityKind::Employee => "role",
            EntityKind::MenuItem => "name",
            EntityKind::Order => "status",
            EntityKind::Reservation => "date",
            EntityKind::Inventory => "ingredient_name",
            EntityKind::Promotion => "title",
        }
    }

    /// Columns shown on the list screen, in order
    pub fn list_columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::User => &["email", "display_name"],
            EntityKind::Restaurant => &["name", "owner_id"],
            EntityKind::Employee => &["role", "permissions", "user_id", "restaurant_id"],
            EntityKind::MenuItem => &["name", "price", "restaurant_id"],
            EntityKind::Order => &["status", "total_price", "created_at", "customer_id"],
            EntityKind::Reservation => &["date", "time", "party_size", "customer_id"],
            EntityKind::Inventory => &["ingredient_name", "quantity", "unit", "restaurant_id"],
            EntityKind::Promotion => &["title", "start_date", "end_date", "discount_amount"],
        }
    }

    pub fn form_spec(&self) -> FormSpec {
        match self {
            EntityKind::User => FormSpec {
                fields: vec![
                    FieldSpec::text("email", "Email"),
                    FieldSpec::text("display_name", "Display Name"),
                ],
                groups: vec![
                    employee_group_for_user(),
                    order_group_for_user(),
                    reservation_group_for_user(),
                    GroupSpec {
                        name: "restaurant",
                        title: "Restaurants",
                        fields: vec![FieldSpec::text("name", "name")],
                    },
                ],
                schema: Schema::new()
                    .field("email", &[Rule::Required])
                    .group("employee", Schema::new().field("role", &[Rule::Required]))
                    .group("order", Schema::new().field("status", &[Rule::Required]))
                    .group(
                        "reservation",
                        Schema::new()
                            .field("party_size", &[Rule::Integer, Rule::NonNegative]),
                    )
                    .group("restaurant", Schema::new().field("name", &[Rule::Required])),
            },
            EntityKind::Restaurant => FormSpec {
                fields: vec![
                    FieldSpec::text("name", "Restaurant Name"),
                    FieldSpec::relation("owner_id", "Owner", EntityKind::User),
                ],
                groups: vec![
                    GroupSpec {
                        name: "employee",
                        title: "Employees",
                        fields: vec![
                            FieldSpec::text("role", "role"),
                            FieldSpec::text("permissions", "permissions"),
                            FieldSpec::relation("user_id", "user", EntityKind::User),
                        ],
                    },
                    GroupSpec {
                        name: "inventory",
                        title: "Inventory",
                        fields: vec![
                            FieldSpec::text("ingredient_name", "ingredient_name"),
                            FieldSpec::number("quantity", "quantity"),
                            FieldSpec::text("unit", "unit"),
                        ],
                    },
                    GroupSpec {
                        name: "menu_item",
                        title: "Menu Items",
                        fields: vec![
                            FieldSpec::text("name", "name"),
                            FieldSpec::text("description", "description"),
                            FieldSpec::number("price", "price"),
                            FieldSpec::text("image_url", "image_url"),
                        ],
                    },
                    GroupSpec {
                        name: "order",
                        title: "Orders",
                        fields: vec![
                            FieldSpec::text("status", "status"),
                            FieldSpec::number("total_price", "total_price"),
                            FieldSpec::date("created_at", "created_at"),
                            FieldSpec::relation("customer_id", "user", EntityKind::User),
                        ],
                    },
                    GroupSpec {
                        name: "promotion",
                        title: "Promotions",
                        fields: vec![
                            FieldSpec::text("title", "title"),
                            FieldSpec::text("description", "description"),
                            FieldSpec::date("start_date", "start_date"),
                            FieldSpec::date("end_date", "end_date"),
                            FieldSpec::number("discount_amount", "discount_amount"),
                        ],
                    },
                    GroupSpec {
                        name: "reservation",
                        title: "Reservations",
                        fields: vec![
                            FieldSpec::date("date", "date"),
                            FieldSpec::date("time", "time"),
                            FieldSpec::number("party_size", "party_size"),
                            FieldSpec::relation("customer_id", "user", EntityKind::User),
                        ],
                    },
                ],
                schema: Schema::new()
                    .field("name", &[Rule::Required])
                    .field("owner_id", &[Rule::Required])
                    .group("employee", Schema::new().field("role", &[Rule::Required]))
                    .group(
                        "inventory",
                        Schema::new()
                            .field("ingredient_name", &[Rule::Required])
                            .field("quantity", &[Rule::Required, Rule::Integer])
                            .field("unit", &[Rule::Required]),
                    )
                    .group(
                        "menu_item",
                        Schema::new()
                            .field("name", &[Rule::Required])
                            .field("price", &[Rule::NonNegative]),
                    )
                    .group("order", Schema::new().field("status", &[Rule::Required]))
                    .group("promotion", Schema::new().field("title", &[Rule::Required]))
                    .group(
                        "reservation",
                        Schema::new()
                            .field("party_size", &[Rule::Integer, Rule::NonNegative]),
                    ),
            },
            EntityKind::Employee => FormSpec {
                fields: vec![
                    FieldSpec::text("role", "Role"),
                    FieldSpec::text("permissions", "Permissions"),
                    FieldSpec::relation("user_id", "User", EntityKind::User),
                    FieldSpec::relation("restaurant_id", "Restaurant", EntityKind::Restaurant),
                ],
                groups: vec![],
                schema: Schema::new()
                    .field("role", &[Rule::Required])
                    .field("user_id", &[Rule::Required])
                    .field("restaurant_id", &[Rule::Required]),
            },
            EntityKind::MenuItem => FormSpec {
                fields: vec![
                    FieldSpec::text("name", "Name"),
                    FieldSpec::text("description", "Description"),
                    FieldSpec::number("price", "Price"),
                    FieldSpec::text("image_url", "Image URL"),
                    FieldSpec::relation("restaurant_id", "Restaurant", EntityKind::Restaurant),
                ],
                groups: vec![],
                schema: Schema::new()
                    .field("name", &[Rule::Required])
                    .field("price", &[Rule::NonNegative])
                    .field("restaurant_id", &[Rule::Required]),
            },
            EntityKind::Order => FormSpec {
                fields: vec![
                    FieldSpec::text("status", "Status"),
                    FieldSpec::number("total_price", "Total Price"),
                    FieldSpec::date("created_at", "Created At"),
                    FieldSpec::relation("customer_id", "Customer", EntityKind::User),
                    FieldSpec::relation("restaurant_id", "Restaurant", EntityKind::Restaurant),
                ],
                groups: vec![],
                schema: Schema::new()
                    .field("status", &[Rule::Required])
                    .field("total_price", &[Rule::NonNegative])
                    .field("customer_id", &[Rule::Required])
                    .field("restaurant_id", &[Rule::Required]),
            },
            EntityKind::Reservation => FormSpec {
                fields: vec![
                    FieldSpec::date("date", "Date"),
                    FieldSpec::date("time", "Time"),
                    FieldSpec::number("party_size", "Party Size"),
                    FieldSpec::relation("customer_id", "Customer", EntityKind::User),
                    FieldSpec::relation("restaurant_id", "Restaurant", EntityKind::Restaurant),
                ],
                groups: vec![],
                schema: Schema::new()
                    .field("party_size", &[Rule::Required, Rule::Integer, Rule::NonNegative])
                    .field("customer_id", &[Rule::Required])
                    .field("restaurant_id", &[Rule::Required]),
            },
            EntityKind::Inventory => FormSpec {
                fields: vec![
                    FieldSpec::text("ingredient_name", "Ingredient Name"),
                    FieldSpec::number("quantity", "Quantity"),
                    FieldSpec::text("unit", "Unit"),
                    FieldSpec::relation("restaurant_id", "Restaurant", EntityKind::Restaurant),
                ],
                groups: vec![],
                schema: Schema::new()
                    .field("ingredient_name", &[Rule::Required])
                    .field("quantity", &[Rule::Required, Rule::Integer])
                    .field("unit", &[Rule::Required])
                    .field("restaurant_id", &[Rule::Required]),
            },
            EntityKind::Promotion => FormSpec {
                fields: vec![
                    FieldSpec::text("title", "Title"),
                    FieldSpec::text("description", "Description"),
                    FieldSpec::date("start_date", "Start Date"),
                    FieldSpec::date("end_date", "End Date"),
                    FieldSpec::number("discount_amount", "Discount Amount"),
                    FieldSpec::relation("restaurant_id", "Restaurant", EntityKind::Restaurant),
                ],
                groups: vec![],
                schema: Schema::new()
                    .field("title", &[Rule::Required])
                    .field("discount_amount", &[Rule::NonNegative])
                    .field("restaurant_id", &[Rule::Required]),
            },
        }
    }
}

fn employee_group_for_user() -> GroupSpec {
    GroupSpec {
        name: "employee",
        title: "Employee Roles",
        fields: vec![
            FieldSpec::text("role", "role"),
            FieldSpec::text("permissions", "permissions"),
            FieldSpec::relation("restaurant_id", "restaurant", EntityKind::Restaurant),
        ],
    }
}

fn order_group_for_user() -> GroupSpec {
    GroupSpec {
        name: "order",
        title: "Orders",
        fields: vec![
            FieldSpec::text("status", "status"),
            FieldSpec::number("total_price", "total_price"),
            FieldSpec::date("created_at", "created_at"),
            FieldSpec::relation("restaurant_id", "restaurant", EntityKind::Restaurant),
        ],
    }
}

fn reservation_group_for_user() -> GroupSpec {
    GroupSpec {
        name: "reservation",
        title: "Reservations",
        fields: vec![
            FieldSpec::date("date", "date"),
            FieldSpec::date("time", "time"),
            FieldSpec::number("party_size", "party_size"),
            FieldSpec::relation("restaurant_id", "restaurant", EntityKind::Restaurant),
        ],
    }
}

/// Widget kind of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Relation(EntityKind),
}

/// One scalar or relation field of an entity form
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
        }
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
        }
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Date,
        }
    }

    pub fn relation(name: &'static str, label: &'static str, target: EntityKind) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Relation(target),
        }
    }

    pub fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text => FieldValue::text(""),
            FieldKind::Number => FieldValue::Number(0.0),
            FieldKind::Date => FieldValue::Date(chrono::Local::now().date_naive()),
            FieldKind::Relation(_) => FieldValue::Relation(None),
        }
    }
}

/// One repeatable group of an entity form
#[derive(Debug, Clone)]
pub struct GroupSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl GroupSpec {
    /// Default row used when the user appends; every declared field at its
    /// kind's empty value
    pub fn template(&self) -> RowDraft {
        let fields = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.default_value()))
            .collect();
        RowDraft::new(fields)
    }

    pub fn row_group(&self) -> RowGroup {
        RowGroup::new(
            self.name,
            self.title,
            self.fields
                .iter()
                .map(|f| GroupField::new(f.name, f.label))
                .collect(),
            self.template(),
        )
    }
}

/// Everything the generic form page needs to drive one entity's form
#[derive(Debug, Clone)]
pub struct FormSpec {
    pub fields: Vec<FieldSpec>,
    pub groups: Vec<GroupSpec>,
    pub schema: Schema,
}

impl FormSpec {
    /// Initial values for a create form: scalar defaults plus an empty row
    /// sequence per group
    pub fn defaults(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in &self.fields {
            values.insert(field.name, field.default_value());
        }
        for group in &self.groups {
            values.insert(group.name, FieldValue::Rows(vec![]));
        }
        values
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
