pub mod julian;
pub mod provider;
pub mod types;

pub use julian::{datetime_to_julian_day, julian_day_to_datetime};
pub use provider::PositionProvider;
pub use types::{BodyPosition, ChartPositions, HousePositions};
