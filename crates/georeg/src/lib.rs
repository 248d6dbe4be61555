#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use georeg_geometry as geometry;

#[doc(inline)]
pub use georeg_linalg as linalg;

#[doc(inline)]
pub use georeg_optim as optim;

#[doc(inline)]
pub use georeg_fitting as fitting;
