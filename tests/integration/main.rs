//! Integration tests; they need PostgreSQL and are ignored by default.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test -- --ignored`

mod api_tests;
mod store_tests;
