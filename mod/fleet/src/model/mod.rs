mod alert;
mod contract;
mod device;
mod engineer;
mod facility;
mod installation;
mod media;
mod visit;

pub use alert::*;
pub use contract::*;
pub use device::*;
pub use engineer::*;
pub use facility::*;
pub use installation::*;
pub use media::*;
pub use visit::*;
