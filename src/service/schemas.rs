//! Input schemas for every writable resource. Field names are the camelCase wire names.

use super::validation::{DefaultValue, Field, Refinement, Rule, Schema};

const EMAIL: &[Rule] = &[Rule::Email("Invalid email address")];
const PASSWORD: &[Rule] = &[Rule::MinLength(6, "Password must be at least 6 characters")];
const COLOR: &[Rule] = &[Rule::Color("Invalid color format")];
const UNPUBLISHED: DefaultValue = DefaultValue::Bool(false);

pub static LOGIN: Schema = Schema {
    name: "login",
    fields: &[
        Field::string("email").rules(EMAIL),
        Field::string("password").rules(PASSWORD),
    ],
    refinements: &[],
};

pub static REGISTER: Schema = Schema {
    name: "register",
    fields: &[
        Field::string("email").rules(EMAIL),
        Field::string("name").rules(&[Rule::MinLength(2, "Name must be at least 2 characters")]),
        Field::string("password").rules(PASSWORD),
        Field::string("confirmPassword"),
    ],
    refinements: &[Refinement::Matches {
        field: "confirmPassword",
        other: "password",
        message: "Passwords don't match",
    }],
};

pub static CONTACT: Schema = Schema {
    name: "contact",
    fields: &[
        Field::string("name").rules(&[Rule::MinLength(2, "Name must be at least 2 characters")]),
        Field::string("email").rules(EMAIL),
        Field::string("phone").optional(),
        Field::string("subject").rules(&[Rule::MinLength(5, "Subject must be at least 5 characters")]),
        Field::string("message").rules(&[Rule::MinLength(10, "Message must be at least 10 characters")]),
    ],
    refinements: &[],
};

/// Admin-side message update: only the read flag is mutable.
pub static CONTACT_STATUS: Schema = Schema {
    name: "contact_status",
    fields: &[Field::boolean("read").optional()],
    refinements: &[],
};

pub static PAGE: Schema = Schema {
    name: "page",
    fields: &[
        Field::string("slug").rules(&[Rule::MinLength(1, "Slug is required")]),
        Field::string("title").rules(&[Rule::MinLength(1, "Title is required")]),
        Field::string("content").rules(&[Rule::MinLength(1, "Content is required")]),
        Field::string("metaTitle").optional(),
        Field::string("metaDescription").optional(),
        Field::boolean("published").default(UNPUBLISHED),
    ],
    refinements: &[],
};

pub static GALLERY_IMAGE: Schema = Schema {
    name: "gallery_image",
    fields: &[
        Field::string("title").rules(&[Rule::MinLength(1, "Title is required")]),
        Field::string("description").optional(),
        Field::string("imageUrl").rules(&[Rule::Url("Invalid image URL")]),
        Field::string("imageAlt").optional(),
        Field::string("category").default(DefaultValue::Str("general")),
        Field::integer("order").default(DefaultValue::Int(0)),
        Field::boolean("published").default(UNPUBLISHED),
    ],
    refinements: &[],
};

pub static SERVICE: Schema = Schema {
    name: "service",
    fields: &[
        Field::string("name").rules(&[Rule::MinLength(1, "Name is required")]),
        Field::string("description").rules(&[Rule::MinLength(1, "Description is required")]),
        Field::string("icon").optional(),
        Field::number("price").optional().rules(&[Rule::Min(0.0, "Price cannot be negative")]),
        Field::string("duration").optional(),
        Field::integer("order").default(DefaultValue::Int(0)),
        Field::boolean("published").default(UNPUBLISHED),
    ],
    refinements: &[],
};

pub static TESTIMONIAL: Schema = Schema {
    name: "testimonial",
    fields: &[
        Field::string("clientName").rules(&[Rule::MinLength(1, "Client name is required")]),
        Field::string("clientRole").optional(),
        Field::string("clientImage").optional(),
        Field::string("content").rules(&[Rule::MinLength(1, "Content is required")]),
        Field::integer("rating").default(DefaultValue::Int(5)).rules(&[
            Rule::Min(1.0, "Rating must be at least 1"),
            Rule::Max(5.0, "Rating must be at most 5"),
        ]),
        Field::integer("order").default(DefaultValue::Int(0)),
        Field::boolean("published").default(UNPUBLISHED),
    ],
    refinements: &[],
};

pub static SITE_CONFIG: Schema = Schema {
    name: "site_config",
    fields: &[
        Field::string("siteName").rules(&[Rule::MinLength(1, "Site name is required")]),
        Field::string("siteTagline").optional(),
        Field::string("description").optional(),
        Field::string("logo").optional(),
        Field::string("favicon").optional(),
        Field::string("theme")
            .default(DefaultValue::Str("light"))
            .rules(&[Rule::OneOf(&["light", "dark", "auto"], "Invalid theme")]),
        Field::string("headerBgColor").optional().rules(COLOR),
        Field::string("headerTextColor").optional().rules(COLOR),
        Field::string("headerBgImage").optional(),
        Field::string("heroBgColor").optional().rules(COLOR),
        Field::string("heroTitleColor").optional().rules(COLOR),
        Field::string("heroTextColor").optional().rules(COLOR),
        Field::string("heroButtonBgColor").optional().rules(COLOR),
        Field::string("heroButtonTextColor").optional().rules(COLOR),
        Field::string("heroButtonStyle")
            .optional()
            .rules(&[Rule::OneOf(&["filled", "outline"], "Invalid button style")]),
        Field::string("heroBgImage").optional(),
        Field::string("aboutBgColor").optional().rules(COLOR),
        Field::string("aboutTitleColor").optional().rules(COLOR),
        Field::string("aboutTextColor").optional().rules(COLOR),
        Field::string("aboutBgImage").optional(),
        Field::string("galleryBgColor").optional().rules(COLOR),
        Field::string("galleryTitleColor").optional().rules(COLOR),
        Field::string("galleryTextColor").optional().rules(COLOR),
        Field::string("galleryCardBgColor").optional().rules(COLOR),
        Field::string("galleryBgImage").optional(),
        Field::string("contactBgColor").optional().rules(COLOR),
        Field::string("contactTitleColor").optional().rules(COLOR),
        Field::string("contactTextColor").optional().rules(COLOR),
        Field::string("contactButtonBgColor").optional().rules(COLOR),
        Field::string("contactButtonTextColor").optional().rules(COLOR),
        Field::string("contactBgImage").optional(),
        Field::string("pagesBgColor").optional().rules(COLOR),
        Field::string("pagesTitleColor").optional().rules(COLOR),
        Field::string("pagesTextColor").optional().rules(COLOR),
        Field::string("pagesBgImage").optional(),
        Field::string("footerBgColor").optional().rules(COLOR),
        Field::string("footerTextColor").optional().rules(COLOR),
        Field::string("footerBgImage").optional(),
    ],
    refinements: &[],
};
