mod get_month;
mod get_playlist;
mod get_prompt;
mod setup_month;
mod submit_song;
mod sync_playlist;

use actix_web::web;
use get_month::get_month_controller;
use get_playlist::get_playlist_controller;
use get_prompt::get_prompt_controller;
use setup_month::setup_month_controller;
use submit_song::submit_song_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/music", web::post().to(submit_song_controller));
    cfg.route("/music/setup", web::post().to(setup_month_controller));
    cfg.route("/music/month", web::get().to(get_month_controller));
    cfg.route("/music/prompt", web::get().to(get_prompt_controller));
    cfg.route("/music/playlist", web::post().to(get_playlist_controller));
}
