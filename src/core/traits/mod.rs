pub mod audit;
pub mod dialer;
pub mod identity;
pub mod resolver;
