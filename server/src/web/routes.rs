// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  auth_handlers, cart_handlers, checkout_handlers, external_handlers, history_handlers, product_handlers,
  repair_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/signup", web::post().to(auth_handlers::signup_handler))
          .route("/signin", web::post().to(auth_handlers::signin_handler))
          .route("/signout", web::post().to(auth_handlers::signout_handler))
          .route("/password", web::post().to(auth_handlers::change_password_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          // Must precede the `{product_id}` matcher.
          .route("/recommended", web::get().to(product_handlers::recommended_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("/add", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/quantity", web::post().to(cart_handlers::set_quantity_handler))
          .route("/remove", web::post().to(cart_handlers::remove_from_cart_handler))
          .route("/clear", web::post().to(cart_handlers::clear_cart_handler)),
      )
      .route("/checkout", web::post().to(checkout_handlers::start_checkout_handler))
      .service(
        web::scope("/history")
          .route("", web::get().to(history_handlers::history_handler))
          .route("/report-issue", web::post().to(history_handlers::report_issue_handler)),
      )
      .service(
        web::scope("/repairs")
          .route("", web::get().to(repair_handlers::list_repairs_handler))
          .route("", web::post().to(repair_handlers::create_repair_handler))
          .route("/{repair_id}", web::get().to(repair_handlers::get_repair_handler))
          .route("/{repair_id}", web::delete().to(repair_handlers::delete_repair_handler))
          .route("/{repair_id}/status", web::post().to(repair_handlers::set_repair_status_handler))
          .route("/{repair_id}/costs", web::post().to(repair_handlers::set_repair_costs_handler))
          .route("/{repair_id}/notes", web::post().to(repair_handlers::set_repair_notes_handler)),
      )
      .service(
        web::scope("/external")
          .route("/products", web::get().to(external_handlers::external_products_handler)),
      )
      .route("/directions", web::get().to(external_handlers::directions_handler)),
  );
}
