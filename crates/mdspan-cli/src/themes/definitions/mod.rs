mod midnight;
mod material;

pub use midnight::midnight;
pub use material::material;
