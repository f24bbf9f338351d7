//! REST routes under `/api`. Collection resources share the generic handlers and differ
//! only in the [`Resource`] descriptor layered onto their router.

use crate::handlers::resource::{self, Resource, CONTACT_MESSAGES, GALLERY, PAGES, SERVICES, TESTIMONIALS};
use crate::handlers::{auth, contact, pages, site_config};
use crate::state::AppState;
use axum::{
    routing::{get, post, MethodRouter},
    Extension, Router,
};

fn item_routes() -> MethodRouter<AppState> {
    get(resource::read).put(resource::update).delete(resource::delete)
}

/// GET/POST on the collection, GET/PUT/DELETE on `/:id`.
fn crud_routes(res: &'static Resource) -> Router<AppState> {
    Router::new()
        .route("/", get(resource::list).post(resource::create))
        .route("/:id", item_routes())
        .layer(Extension(res))
}

pub fn api_routes() -> Router<AppState> {
    let pages = crud_routes(&PAGES).route("/slug/:slug", get(pages::by_slug));
    // Contact creation is the rate-limited public form, not the generic create.
    let contact = Router::new()
        .route("/", get(resource::list).post(contact::submit))
        .route("/:id", item_routes())
        .layer(Extension(&CONTACT_MESSAGES));

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/config", get(site_config::get_config).put(site_config::update_config))
        .nest("/pages", pages)
        .nest("/gallery", crud_routes(&GALLERY))
        .nest("/services", crud_routes(&SERVICES))
        .nest("/testimonials", crud_routes(&TESTIMONIALS))
        .nest("/contact", contact)
}
