//! Static entity model: tables, columns and column types for the seven site entities.
//! Column names are snake_case (storage); the API layer converts to camelCase.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

/// A stored row: JSON object keyed by snake_case column name.
pub type Record = Map<String, Value>;

/// Fixed-width RFC 3339 with microseconds, so string order matches time order.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Fixed primary key of the single site configuration row.
pub const SITE_CONFIG_ID: &str = "default";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Double,
    Boolean,
    Timestamp,
}

impl ColumnType {
    /// PostgreSQL type name used in DDL and parameter casts.
    pub fn pg_type(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::Double => "double precision",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamptz",
        }
    }
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
    pub unique: bool,
}

impl Column {
    const fn required(name: &'static str, ty: ColumnType) -> Self {
        Column { name, ty, nullable: false, unique: false }
    }

    const fn optional(name: &'static str, ty: ColumnType) -> Self {
        Column { name, ty, nullable: true, unique: false }
    }

    const fn unique(name: &'static str) -> Self {
        Column { name, ty: ColumnType::Text, nullable: false, unique: true }
    }

    const fn text(name: &'static str) -> Self {
        Self::required(name, ColumnType::Text)
    }

    const fn opt_text(name: &'static str) -> Self {
        Self::optional(name, ColumnType::Text)
    }
}

#[derive(Debug)]
pub struct EntityDef {
    /// Display name used in log lines and messages.
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [Column],
}

impl EntityDef {
    pub const PK: &'static str = "id";

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns carrying a unique constraint, primary key excluded.
    pub fn unique_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.unique)
    }

    /// ContactMessage rows are immutable apart from `read` and carry no update stamp.
    pub fn tracks_updates(&self) -> bool {
        self.has_column("updated_at")
    }
}

const ID: Column = Column::required(EntityDef::PK, ColumnType::Text);
const CREATED_AT: Column = Column::required("created_at", ColumnType::Timestamp);
const UPDATED_AT: Column = Column::required("updated_at", ColumnType::Timestamp);
const PUBLISHED: Column = Column::required("published", ColumnType::Boolean);
const ORDER: Column = Column::required("order", ColumnType::Integer);

pub static USER: EntityDef = EntityDef {
    name: "User",
    table: "users",
    columns: &[
        ID,
        Column::unique("email"),
        Column::opt_text("name"),
        Column::text("password"),
        Column::text("role"),
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub static SITE_CONFIG: EntityDef = EntityDef {
    name: "SiteConfig",
    table: "site_config",
    columns: &[
        ID,
        Column::text("site_name"),
        Column::opt_text("site_tagline"),
        Column::opt_text("description"),
        Column::opt_text("logo"),
        Column::opt_text("favicon"),
        Column::text("theme"),
        Column::opt_text("header_bg_color"),
        Column::opt_text("header_text_color"),
        Column::opt_text("header_bg_image"),
        Column::opt_text("hero_bg_color"),
        Column::opt_text("hero_title_color"),
        Column::opt_text("hero_text_color"),
        Column::opt_text("hero_button_bg_color"),
        Column::opt_text("hero_button_text_color"),
        Column::opt_text("hero_button_style"),
        Column::opt_text("hero_bg_image"),
        Column::opt_text("about_bg_color"),
        Column::opt_text("about_title_color"),
        Column::opt_text("about_text_color"),
        Column::opt_text("about_bg_image"),
        Column::opt_text("gallery_bg_color"),
        Column::opt_text("gallery_title_color"),
        Column::opt_text("gallery_text_color"),
        Column::opt_text("gallery_card_bg_color"),
        Column::opt_text("gallery_bg_image"),
        Column::opt_text("contact_bg_color"),
        Column::opt_text("contact_title_color"),
        Column::opt_text("contact_text_color"),
        Column::opt_text("contact_button_bg_color"),
        Column::opt_text("contact_button_text_color"),
        Column::opt_text("contact_bg_image"),
        Column::opt_text("pages_bg_color"),
        Column::opt_text("pages_title_color"),
        Column::opt_text("pages_text_color"),
        Column::opt_text("pages_bg_image"),
        Column::opt_text("footer_bg_color"),
        Column::opt_text("footer_text_color"),
        Column::opt_text("footer_bg_image"),
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub static PAGE: EntityDef = EntityDef {
    name: "Page",
    table: "pages",
    columns: &[
        ID,
        Column::unique("slug"),
        Column::text("title"),
        Column::text("content"),
        Column::opt_text("meta_title"),
        Column::opt_text("meta_description"),
        PUBLISHED,
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub static GALLERY_IMAGE: EntityDef = EntityDef {
    name: "GalleryImage",
    table: "gallery_images",
    columns: &[
        ID,
        Column::text("title"),
        Column::opt_text("description"),
        Column::text("image_url"),
        Column::opt_text("image_alt"),
        Column::text("category"),
        ORDER,
        PUBLISHED,
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub static SERVICE: EntityDef = EntityDef {
    name: "Service",
    table: "services",
    columns: &[
        ID,
        Column::text("name"),
        Column::text("description"),
        Column::opt_text("icon"),
        Column::optional("price", ColumnType::Double),
        Column::opt_text("duration"),
        ORDER,
        PUBLISHED,
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub static TESTIMONIAL: EntityDef = EntityDef {
    name: "Testimonial",
    table: "testimonials",
    columns: &[
        ID,
        Column::text("client_name"),
        Column::opt_text("client_role"),
        Column::opt_text("client_image"),
        Column::text("content"),
        Column::required("rating", ColumnType::Integer),
        ORDER,
        PUBLISHED,
        CREATED_AT,
        UPDATED_AT,
    ],
};

pub static CONTACT_MESSAGE: EntityDef = EntityDef {
    name: "ContactMessage",
    table: "contact_messages",
    columns: &[
        ID,
        Column::text("name"),
        Column::text("email"),
        Column::opt_text("phone"),
        Column::text("subject"),
        Column::text("message"),
        Column::required("read", ColumnType::Boolean),
        CREATED_AT,
    ],
};

/// All entities in table-creation order.
pub static ENTITIES: [&EntityDef; 7] = [
    &USER,
    &SITE_CONFIG,
    &PAGE,
    &GALLERY_IMAGE,
    &SERVICE,
    &TESTIMONIAL,
    &CONTACT_MESSAGE,
];

/// The row created lazily when no site configuration exists yet.
pub fn default_site_config() -> Record {
    let value = json!({
        "id": SITE_CONFIG_ID,
        "site_name": "Presentation Site",
        "site_tagline": "Your professional presentation site",
        "theme": "light",
        "header_bg_color": "#ffffff",
        "header_text_color": "#1e293b",
        "hero_title_color": "#1e293b",
        "hero_text_color": "#64748b",
        "hero_button_bg_color": "#9333ea",
        "hero_button_text_color": "#ffffff",
        "hero_button_style": "filled",
        "about_bg_color": "#ffffff",
        "about_title_color": "#1e293b",
        "about_text_color": "#64748b",
        "gallery_bg_color": "#f8fafc",
        "gallery_title_color": "#1e293b",
        "gallery_text_color": "#64748b",
        "gallery_card_bg_color": "#ffffff",
        "contact_bg_color": "#ffffff",
        "contact_title_color": "#1e293b",
        "contact_text_color": "#64748b",
        "contact_button_bg_color": "#9333ea",
        "contact_button_text_color": "#ffffff",
        "pages_bg_color": "#ffffff",
        "pages_title_color": "#1e293b",
        "pages_text_color": "#64748b",
        "footer_bg_color": "#64748b",
        "footer_text_color": "#ffffff"
    });
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}
