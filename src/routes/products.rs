use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::products::{
    attach_session_image, clear_session, clear_session_image, create_from_session,
    create_producto, delete_producto, delete_session_selection, get_informe, get_producto,
    get_productos, get_session, report_session, select_session, set_session_form,
    update_from_session, update_producto,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/productos", get(get_productos).post(create_producto))
        .route(
            "/productos/{codigo}",
            get(get_producto).put(update_producto).delete(delete_producto),
        )
        .route("/productos/{codigo}/informe", get(get_informe))
        .route("/session", get(get_session))
        .route("/session/select/{codigo}", post(select_session))
        .route("/session/clear", post(clear_session))
        .route("/session/form", put(set_session_form))
        .route(
            "/session/imagen",
            put(attach_session_image).delete(clear_session_image),
        )
        .route("/session/create", post(create_from_session))
        .route("/session/update", post(update_from_session))
        .route("/session/selection", delete(delete_session_selection))
        .route("/session/report", post(report_session))
}
