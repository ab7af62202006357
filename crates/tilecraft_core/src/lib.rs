//! Core data structures for the tilecraft level editor
//!
//! This crate provides the fundamental types for representing an editable
//! scene:
//! - `Scene` - A complete map with layers and entities
//! - `Layer` / `LayerId` - The four named tile grids of a scene
//! - `TilesetTable` - Category to global-tile-id mapping
//! - `EntityInstance` - Placed entities with properties
//! - `Value` - Generic property value type

mod entity;
mod layer;
mod scene;
mod tileset;
mod value;

pub use entity::EntityInstance;
pub use layer::{Layer, LayerId, EMPTY_TILE};
pub use scene::Scene;
pub use tileset::{TileCategory, TileRef, TilesetTable};
pub use value::Value;
