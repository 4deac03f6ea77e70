//! `mt-ledger`: per-node / per-edge reservation bookkeeping.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`reservation`] | `Reservation` and the blocking rule                     |
//! | [`ledger`]      | `Ledger`: capacity, reservations, cached counters       |
//!
//! # Blocking rule
//!
//! A reservation `R` blocks a query `(window w, priority p, agent a)` iff
//!
//! ```text
//! w ∩ R.window ≠ ∅   and   p <= R.priority   and   not (R.agent == a and p == R.priority)
//! ```
//!
//! Lower-priority reservations never block.  An agent never collides with
//! its own reservation at equal priority, but a strictly stronger claim
//! blocks even its owner.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Reservation`.          |

pub mod ledger;
pub mod reservation;


pub use ledger::Ledger;
pub use reservation::Reservation;
