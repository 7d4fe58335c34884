pub mod composer;
pub mod gallery;
pub mod tabs;

pub use composer::{compose, Field, GeneratorPanel, PanelOptions, Panel};
pub use gallery::{CatalogStatus, DocType, Gallery, GalleryKind};
pub use tabs::{ResultKind, TabDescriptor, TabId};
