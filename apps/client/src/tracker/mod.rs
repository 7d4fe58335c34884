pub mod view;

pub use view::{ListStatus, Modal, TrackerPanel};
