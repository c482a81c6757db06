use axum::{Router, routing::get};

use crate::{
    AppState,
    controllers::{crud_controller, security_controller},
    models::Security,
};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/security", get(security_controller::get_security_list))
        .route(
            "/security/new",
            get(security_controller::get_security_new).post(security_controller::post_security_new),
        )
        .route("/security/:id", get(security_controller::get_security_detail))
        .route(
            "/security/:id/edit",
            get(security_controller::get_security_edit).post(security_controller::post_security_edit),
        )
        .route(
            "/security/:id/delete",
            get(crud_controller::get_delete_dialog::<Security>)
                .post(crud_controller::post_delete::<Security>),
        )
}
