//! Utility modules shared by the pipeline stages.

pub mod css;
pub mod html;
pub mod minify;
pub mod slug;
