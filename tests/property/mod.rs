//! Property-based tests

mod booking_proptest;
