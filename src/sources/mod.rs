//! Source adapters
//!
//! One adapter per upstream API. Public lookups never fail: any upstream
//! problem is logged and turned into `None` or an empty list.

pub mod allstar;
pub mod http;
pub mod inventory;
pub mod leetify;
pub mod music;
pub mod steam;
pub mod teammates;

pub use allstar::{format_duration, AllstarSource};
pub use http::SourceContext;
pub use leetify::{format_premier_rank, LeetifyData, LeetifyRank, LeetifySource, RankKind};
pub use steam::{format_playtime, SteamPlayer, SteamSource};
pub use teammates::TeammateSource;
