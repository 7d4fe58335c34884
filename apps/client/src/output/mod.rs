pub mod export;
pub mod machine;
pub mod render;

pub use export::{export, ExportFormat, ExportedFile};
pub use machine::{Action, OutputMachine, OutputState, OutputView};
