pub mod day_7;
pub mod day_9;
pub mod day_12;
pub mod day_14;
pub mod day_16;
pub mod day_18;
pub mod day_19;
pub mod day_21;
pub mod day_22;
pub mod day_24;
pub mod day_25;
