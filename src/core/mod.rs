pub mod primitives;
pub mod projector;
pub mod sample_input;
pub mod scale;
pub mod ticks;
pub mod types;

pub use projector::{Projector, ProjectorInput, SampleField, build_projector};
pub use sample_input::{RawSample, TimeInput, samples_from_json};
pub use scale::{LinearScale, Scale, TimeScale};
pub use ticks::{TickSet, format_time_tick, linear_ticks, time_ticks};
pub use types::{Domain, PixelPoint, PixelRange, PlotInsets, Sample, Viewport};
