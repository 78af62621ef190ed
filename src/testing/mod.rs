//! Testing utilities for code built on this client.
//!
//! Provides a mock [`ProjectClient`](crate::ProjectClient) implementation
//! that records calls and returns canned responses.

mod mock;

pub use mock::{MockBitbucketClient, MockCall, MockResponse};
