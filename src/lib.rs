//! Seeded six-fold snowflake generator.
//!
//! A seed string is hashed into a list of branches, the branch list is laid
//! out as six rotated arms and written as SVG. The branch list also has a
//! compact `position:length,...` form meant for a URL fragment, so a
//! snowflake can be shared without its seed.

pub mod builder;
pub mod codec;
pub mod config;
pub mod dng;
pub mod error;
pub mod export;
pub mod geometry;
pub mod model;
pub mod session;
pub mod settings;
pub mod svg;

pub use config::{DigestKind, DrawSettings};
pub use error::{Error, Result};
pub use geometry::Figure;
pub use model::{Branch, Configuration};
pub use session::{GenerationRequest, Session, State};
