mod filter;
mod music;
mod paging;
mod sort;
mod stats;

pub use filter::{contains_pattern, MusicFilter};
pub use music::{
    format_duration, CreateMusic, Music, MusicId, MAX_ALBUM_LEN, MAX_ARTIST_LEN, MAX_GENRE_LEN,
    MAX_TITLE_LEN, MAX_URL_LEN,
};
pub use paging::{Page, PageRequest, DEFAULT_PAGE_SIZE};
pub use sort::{Sort, SortDirection, SortField};
pub use stats::{CatalogStats, Tally};
