//====================================================================

pub mod canvas_pipeline;

//====================================================================
