pub mod aggregate;
pub mod ledger;
pub mod roster;
pub mod rules;
