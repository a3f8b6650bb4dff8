//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Products
//! GET  /products                   - Product listing (?q=&category=&min_price=&max_price=)
//! GET  /products/featured          - Featured products
//! GET  /products/categories        - Categories and highest price
//! GET  /products/{id}              - Product detail
//!
//! # Cart
//! GET  /cart                       - Cart lines, count and total
//! GET  /cart/count                 - Item count badge
//! POST /cart/add                   - Add a product
//! POST /cart/update                - Set a line quantity
//! POST /cart/remove                - Remove a line
//! POST /cart/clear                 - Empty the cart
//!
//! # Checkout
//! POST /checkout                   - Turn the cart into an order
//!
//! # Testimonials
//! GET  /testimonials               - Testimonial wall
//! POST /testimonials               - Submit a testimonial
//!
//! # Contact
//! POST /contact                    - Contact form
//!
//! # Order administration
//! GET  /admin/orders               - Order listing (?q=&status=)
//! GET  /admin/orders/{id}          - Order detail
//! POST /admin/orders/{id}/status   - Move an order to another status
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod orders;
pub mod products;
pub mod testimonials;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/categories", get(products::categories))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the testimonial routes router.
pub fn testimonial_routes() -> Router<AppState> {
    Router::new().route("/", get(testimonials::index).post(testimonials::create))
}

/// Create the order administration routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(orders::index))
        .route("/orders/{id}", get(orders::show))
        .route("/orders/{id}/status", post(orders::update_status))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        .nest("/testimonials", testimonial_routes())
        .route("/contact", post(contact::submit))
        .nest("/admin", admin_routes())
}

/// The full application: health check, API routes and HTTP tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check storage.
async fn health() -> &'static str {
    "ok"
}
