pub mod error;
pub mod weather_frame;

pub use error::StoreError;
pub use weather_frame::WeatherFrame;
