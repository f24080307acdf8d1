//! Data shapes leaving the service: the profile view model and the small
//! operational responses.

pub mod responses;
pub mod view;

pub use responses::{CacheStatsResponse, HealthResponse};
pub use view::{
    ClipDisplay, ClutchStats, Medal, Metric, MusicKit, ProfileIdentity, ProfileViewModel,
    RankDisplay, Sticker, Teammate, WeaponSkin,
};
