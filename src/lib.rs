pub mod annotation;
pub mod backends;
pub mod cache;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod lexicon;

pub use backends::{Backend, BackendOptions, BackendRegistry, Parser};
pub use config::Config;
pub use error::{Result, SceneGraphError};
pub use graph::{Entity, EntityType, Graph, Modifier, Relation};
