pub mod input;
pub mod logging;
pub mod picker;
pub mod spinner;
