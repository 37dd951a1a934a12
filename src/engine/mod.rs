pub mod crossover;
pub mod direction;
pub mod pnl;
