mod loader;
mod schema;

pub use loader::{
    apply_env, default_config_path, load_from_file, load_from_str, resolve, resolve_with,
    validate, LoadError, ENV_SECRET, ENV_WEBHOOK,
};
pub use schema::NotifierConfig;
