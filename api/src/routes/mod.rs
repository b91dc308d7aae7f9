//! Route handlers and their registration under `/api`.
//!
//! Access control is attached per route with `JwtAuth`, so every protected
//! handler can rely on an `AuthContext` being present.

pub mod auth;
pub mod livreurs;
pub mod orders;
pub mod products;

use actix_web::web;
use dm_core::domain::entities::user::Role;
use dm_core::repositories::{OrderRepository, ProductRepository, UserRepository};

use crate::middleware::JwtAuth;

/// Register every `/api` route; mount inside `web::scope("/api")`
pub fn configure<U, P, O>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
    O: OrderRepository + 'static,
{
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register::<U, P, O>))
            .route("/login", web::post().to(auth::login::<U, P, O>))
            .route(
                "/users",
                web::get()
                    .to(auth::list_users::<U, P, O>)
                    .wrap(JwtAuth::require(Role::Admin)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::put().to(auth::update_user::<U, P, O>))
                    .route(web::delete().to(auth::delete_user::<U, P, O>))
                    .wrap(JwtAuth::require(Role::Admin)),
            ),
    )
    .service(
        web::scope("/produits").service(
            web::resource(["", "/"])
                .route(web::get().to(products::list::<U, P, O>))
                .route(
                    web::post()
                        .to(products::create::<U, P, O>)
                        .wrap(JwtAuth::require(Role::Commercant)),
                ),
        ),
    )
    .service(
        web::scope("/commandes")
            .service(
                web::resource(["", "/"]).route(
                    web::post()
                        .to(orders::create::<U, P, O>)
                        .wrap(JwtAuth::require(Role::Client)),
                ),
            )
            .route("/test", web::get().to(orders::route_check))
            .route(
                "/my",
                web::get()
                    .to(orders::list_mine::<U, P, O>)
                    .wrap(JwtAuth::require(Role::Client)),
            )
            .route(
                "/available",
                web::get()
                    .to(orders::list_available::<U, P, O>)
                    .wrap(JwtAuth::require(Role::Livreur)),
            )
            .route(
                "/my-deliveries",
                web::get()
                    .to(orders::list_deliveries::<U, P, O>)
                    .wrap(JwtAuth::require(Role::Livreur)),
            )
            .route(
                "/{id}/status",
                web::put()
                    .to(orders::update_status::<U, P, O>)
                    .wrap(JwtAuth::authenticated()),
            )
            .route(
                "/{id}/track",
                web::get()
                    .to(orders::track::<U, P, O>)
                    .wrap(JwtAuth::authenticated()),
            )
            .route(
                "/{id}/assign",
                web::put()
                    .to(orders::assign::<U, P, O>)
                    .wrap(JwtAuth::require(Role::Livreur)),
            )
            .route(
                "/{id}/location",
                web::put()
                    .to(orders::update_location::<U, P, O>)
                    .wrap(JwtAuth::require(Role::Livreur)),
            ),
    )
    .service(
        web::scope("/livreurs").route(
            "/earnings",
            web::get()
                .to(livreurs::earnings::<U, P, O>)
                .wrap(JwtAuth::require(Role::Livreur)),
        ),
    );
}
