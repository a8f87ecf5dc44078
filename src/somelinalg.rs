//! some linear algebra functions used throughout the code
#![allow(non_snake_case)]
/// matrix inversion algorithms
pub mod some_matrix_inv;
/// diagnostics for linear systems and matrices: if it is singular,
/// poorly conditioned or diagonally dominant
pub mod linear_sys_diagnostics;
