pub mod carousel;
pub mod config;
pub mod cycler;
pub mod document;
pub mod error;
pub mod events;
pub mod render;
pub mod scroll;
pub mod tasks {
    pub mod autoplay;
    pub mod carousel;
    pub mod controls;
}
