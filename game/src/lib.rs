//====================================================================

use config::ClientConfig;
use engine::window::{Runner, WindowSettings};
use scenes::{battle_scene, BattleScene};

pub mod api;
pub mod battle;
pub mod board;
pub mod characters;
pub mod config;
pub mod scenes;
pub mod session;

//====================================================================

pub fn run() {
    let config = load_config();
    init_logging(&config);

    log::info!("Starting battle client against '{}'", config.api_base);

    let settings = WindowSettings {
        title: battle_scene::TITLE.into(),
        size: battle_scene::FRAME_SIZE,
        ..Default::default()
    };

    if let Err(e) = Runner::run(settings, move |state| BattleScene::new(state, &config)) {
        log::error!("Event loop stopped with error: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> ClientConfig {
    ClientConfig::from_args()
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> ClientConfig {
    ClientConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(config: &ClientConfig) {
    env_logger::Builder::new()
        .filter_level(config.log_level)
        // wgpu and naga are very chatty below warn
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("naga", log::LevelFilter::Warn)
        .parse_default_env()
        .init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging(config: &ClientConfig) {
    console_error_panic_hook::set_once();
    console_log::init_with_level(config.log_level.to_level().unwrap_or(log::Level::Info)).ok();
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    run();
}

//====================================================================
