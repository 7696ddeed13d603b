pub mod aggregator;
pub mod config;
pub mod data;
pub mod error;
pub mod feed;
pub mod hosted;
pub mod models;
pub mod normalize;
pub mod risk;
pub mod storage;
pub mod view;

pub use aggregator::aggregate;
pub use config::{AppConfig, FeedConfig, StorageConfig, StoreKind};
pub use data::DashboardApi;
pub use error::{StoreError, UpstreamError};
pub use feed::{PageLinks, RawFeedPage, RawNeo};
pub use hosted::RestTrackedStore;
pub use models::{NearEarthObject, RiskAssessment, RiskLabel, TrackedItem};
pub use normalize::{normalize, normalize_entry};
pub use risk::score;
pub use storage::{JsonTrackedStore, TrackedStore};
pub use view::{apply_filters, closest_approaches, format_km, DashboardStats, Filter};
