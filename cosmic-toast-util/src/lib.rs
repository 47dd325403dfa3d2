pub mod dismissal;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod outcome;
pub mod text;
pub mod wrap;

pub use dismissal::{DismissError, DismissalCoordinator, RaceState};
pub use input::{InputEvent, Key, PointerButton};
pub use layout::{BoxGeometry, BoxSize, EdgeGaps, Point, ScreenBounds, box_size, place};
pub use metrics::{CellMetrics, TextMeasure};
pub use outcome::DismissOutcome;
pub use text::NotificationText;
pub use wrap::{DisplayLine, LineBreak, LineSet, wrap};

pub use cosmic_toast_config::Corner;
