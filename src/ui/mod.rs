pub mod central;
pub mod side;
pub mod top;
