//! # AASD Common Library
//!
//! Layout and recommendation engine for the AASD audio system designer:
//! - Room model and form range limits
//! - Speaker grid placement
//! - Floor-plan scale conversion
//! - Product catalog loading and equipment recommendation
//! - Floor-plan SVG rendering
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod design;
pub mod error;
pub mod floorplan;
pub mod layout;
pub mod recommend;
pub mod room;
pub mod scale;

pub use catalog::{Catalog, ProductRecord};
pub use error::{Error, Result};
pub use layout::{generate_positions, SpeakerPosition};
pub use recommend::{recommend, RecommendationQuery, RecommendationResult, UseCase, UseCaseSelection};
pub use room::RoomSpec;
