//====================================================================

pub mod battle_scene;

pub use battle_scene::BattleScene;

//====================================================================
