mod request;
mod reservation;
mod spot;

pub use request::*;
pub use reservation::*;
pub use spot::*;
