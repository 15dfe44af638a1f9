//! Timestamps
//!
//! Every store keeps microseconds (PostgreSQL `TIMESTAMPTZ`). Entities take
//! their timestamps from [`now`] so an in-memory value equals what a later
//! read from the database returns.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at store precision (microseconds)
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
