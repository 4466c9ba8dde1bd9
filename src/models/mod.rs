pub mod adjustment;
pub mod attendance;
pub mod payment;
pub mod player;
pub mod role;
pub mod session;
pub mod status;
