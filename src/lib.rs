//! Segmented scroll-progress engine.
//!
//! One normalized scroll value per act is mapped, through a static segment table, into active
//! section, per-section local progress and a memoized bag of continuous visual signals. Sections
//! near the active one are mounted and rendered; everything else is torn down.
//!
//! The browser is abstracted behind [`Host`]; [`SimulatedPage`] is an in-memory implementation
//! used by tests and the CLI.
#![forbid(unsafe_code)]

pub mod act;
pub mod animation;
pub mod engine;
pub mod foundation;
pub mod scroll;
pub mod segment;
pub mod story;

pub use crate::act::orchestrator::{ActFrame, ActOrchestrator};
pub use crate::act::section::{SectionFrame, SectionProps, SectionRenderer, StagedSection};
pub use crate::animation::curve::{Hsl, Reveal, Style};
pub use crate::animation::ease::Ease;
pub use crate::animation::series::{KeyPoint, Series};
pub use crate::engine::frame::ProgressFrame;
pub use crate::engine::mount::MountWindow;
pub use crate::engine::resolver::{Carry, Resolver};
pub use crate::engine::signals::{Jump, Signals};
pub use crate::foundation::core::{Direction, Progress, Rect, Vec2};
pub use crate::foundation::error::{StoryError, StoryResult};
pub use crate::scroll::host::{ContainerId, Host, SimulatedPage};
pub use crate::scroll::motion::{MotionPreference, ReducedMotion};
pub use crate::scroll::source::{ProgressSource, ScrollSample};
pub use crate::segment::table::{Segment, SegmentTable, SegmentTableDef};
pub use crate::story::content::{Captions, ContentCatalog, ContentKey};
pub use crate::story::data::StoryData;
pub use crate::story::page::{ActContainers, Story, StoryFrame};
