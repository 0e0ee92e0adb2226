pub mod system_resolver;
pub mod tcp_dialer;
