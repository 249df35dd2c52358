pub mod id;
pub mod track;

pub use id::TrackId;
pub use track::Track;
