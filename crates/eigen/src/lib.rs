#![forbid(unsafe_code)]

pub mod sym_eigen;

pub use sym_eigen::{sym_eigen_3x3, SymEigen3};
