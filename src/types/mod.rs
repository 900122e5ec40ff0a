pub mod clock;
pub mod day_window;
pub mod lat_lon;
pub mod observation;
pub mod weather_window;
