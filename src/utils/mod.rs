pub mod html;
pub mod tags;
pub mod time;
pub mod upload;
