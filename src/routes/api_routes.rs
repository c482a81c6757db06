use axum::{Router, routing::get};

use crate::{
    AppState,
    controllers::{purchase_api_controller, security_api_controller},
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/api/securities",
            get(security_api_controller::get_all_securities)
                .post(security_api_controller::create_security),
        )
        .route(
            "/api/securities/:id",
            get(security_api_controller::get_security)
                .put(security_api_controller::update_security)
                .patch(security_api_controller::partial_update_security)
                .delete(security_api_controller::delete_security),
        )
        .route(
            "/api/purchases",
            get(purchase_api_controller::get_all_purchases)
                .post(purchase_api_controller::create_purchase),
        )
        .route(
            "/api/purchases/:id",
            get(purchase_api_controller::get_purchase)
                .put(purchase_api_controller::update_purchase)
                .patch(purchase_api_controller::partial_update_purchase)
                .delete(purchase_api_controller::delete_purchase),
        )
}
