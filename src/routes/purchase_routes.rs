use axum::{Router, routing::get};

use crate::{
    AppState,
    controllers::{crud_controller, purchase_controller},
    models::Purchase,
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/purchase", get(purchase_controller::get_purchase_list))
        .route(
            "/purchase/new",
            get(purchase_controller::get_purchase_new).post(purchase_controller::post_purchase_new),
        )
        .route("/purchase/:id", get(purchase_controller::get_purchase_detail))
        .route(
            "/purchase/:id/edit",
            get(purchase_controller::get_purchase_edit).post(purchase_controller::post_purchase_edit),
        )
        .route(
            "/purchase/:id/delete",
            get(crud_controller::get_delete_dialog::<Purchase>)
                .post(crud_controller::post_delete::<Purchase>),
        )
}
