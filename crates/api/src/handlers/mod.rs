pub mod categories;
pub mod cities;
pub mod tickets;
pub mod uploads;
