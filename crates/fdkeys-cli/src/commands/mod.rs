pub mod check;
pub mod closure;
pub mod keys;
