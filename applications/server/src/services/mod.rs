/// Server services
pub mod music;

pub use music::MusicService;
