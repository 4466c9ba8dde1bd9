pub mod backup;
pub mod balances;
pub mod calculator;
pub mod gate;
pub mod log;
pub mod payment;
pub mod player;
pub mod recalc;
pub mod session;
