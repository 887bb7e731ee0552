pub mod codec;
pub mod errors;
mod gsettings;
pub mod store;
pub mod types;

// Re-export public API
pub use codec::{decode_feature_list, encode_feature_list, normalize_empty_sentinel};
pub use errors::SettingsError;
pub use gsettings::GSettings;
pub use store::SettingsStore;
pub use types::FeatureSet;
