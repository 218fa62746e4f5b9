//! File domain entities.

pub mod category;
pub mod content;
pub mod model;
pub mod size;
pub mod version;

pub use category::FileCategory;
pub use content::{ContentRef, RawFile};
pub use model::FileEntity;
pub use size::format_file_size;
pub use version::FileVersion;
