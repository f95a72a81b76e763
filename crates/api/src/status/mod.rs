use actix_web::{web, HttpResponse};
use promptbot_api_structs::get_service_health::*;
use promptbot_infra::BotContext;

async fn status(ctx: web::Data<BotContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        store_available: ctx.repos.is_some(),
        playlists_available: ctx.playlists.is_some(),
        notifier_available: ctx.notifier.is_some(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}
