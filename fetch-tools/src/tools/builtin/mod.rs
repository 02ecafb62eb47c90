pub mod todo;
pub mod weather;

pub use todo::TodoTool;
pub use weather::WeatherTool;
