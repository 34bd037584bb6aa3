// Text layout for the proposal document: Helvetica metrics, `**bold**` spans,
// greedy wrapping and the paginated draw-command builder the renderers replay.

pub mod font_metrics;
pub mod page;
pub mod spans;
pub mod wrap;

pub use font_metrics::{text_width_mm, Font};
pub use page::{Align, DrawCommand, PageBuilder, RunningHeader};
